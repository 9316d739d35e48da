//! TUI 应用状态和主循环

use crate::acquisition::ContentFetcher;
use crate::ai::{ChatTransport, Sleeper};
use crate::analysis::{AnalysisInput, AnalysisReport, Analyzer, InputKind};
use crate::tui::event::{handle_event, poll_event};
use crate::tui::input::TextInput;
use crate::tui::state::{LogEntry, Phase};
use crate::tui::ui::render;
use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::debug;

pub type AppResult<T> = Result<T>;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// 最多保留的提示条数
pub const MAX_LOG_ENTRIES: usize = 50;

/// TUI 应用状态
pub struct App {
    /// 是否退出
    pub should_quit: bool,
    /// 当前输入方式
    pub input_kind: InputKind,
    /// 文本模式输入框
    pub text_input: TextInput,
    /// URL 模式输入框
    pub url_input: TextInput,
    /// 最近一次分析报告
    pub report: Option<AnalysisReport>,
    /// 提示历史（旧在前）
    pub log: Vec<LogEntry>,
    /// 分析阶段
    pub phase: Phase,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            input_kind: InputKind::Text,
            text_input: TextInput::new(),
            url_input: TextInput::new(),
            report: None,
            log: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// 切换 Text / URL
    pub fn toggle_input_kind(&mut self) {
        self.input_kind = self.input_kind.toggle();
    }

    pub fn active_input(&self) -> &TextInput {
        match self.input_kind {
            InputKind::Text => &self.text_input,
            InputKind::Url => &self.url_input,
        }
    }

    pub fn active_input_mut(&mut self) -> &mut TextInput {
        match self.input_kind {
            InputKind::Text => &mut self.text_input,
            InputKind::Url => &mut self.url_input,
        }
    }

    /// 按下 Analyze；分析中重复触发无效
    pub fn request_analysis(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Pending;
        }
    }

    /// 当前输入框内容
    pub fn current_input(&self) -> AnalysisInput {
        AnalysisInput::new(self.input_kind, self.active_input().text())
    }

    /// 记录报告及其提示
    pub fn apply_report(&mut self, report: AnalysisReport) {
        for advisory in &report.advisories {
            self.log.push(LogEntry::from_advisory(advisory));
        }
        if self.log.len() > MAX_LOG_ENTRIES {
            let excess = self.log.len() - MAX_LOG_ENTRIES;
            self.log.drain(..excess);
        }
        self.report = Some(report);
        self.phase = Phase::Idle;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// 进入 raw mode 和备用屏幕
pub fn init_terminal() -> AppResult<Tui> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    Ok(terminal)
}

/// 恢复终端
pub fn restore_terminal(terminal: &mut Tui) -> AppResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;
    Ok(())
}

/// 主循环
///
/// 分析在本线程同步执行：先画出 "Analyzing" 状态，再阻塞直到结束。
pub fn run<T, F, S>(terminal: &mut Tui, app: &mut App, analyzer: &Analyzer<T, F, S>) -> AppResult<()>
where
    T: ChatTransport,
    F: ContentFetcher,
    S: Sleeper,
{
    let tick = Duration::from_millis(250);

    while !app.should_quit {
        terminal.draw(|frame| render(app, frame))?;

        if app.phase == Phase::Pending {
            app.phase = Phase::Analyzing;
            terminal.draw(|frame| render(app, frame))?;

            let input = app.current_input();
            debug!(kind = %input.kind(), "Running analysis from TUI");
            let report = analyzer.analyze(&input);
            app.apply_report(report);
            continue;
        }

        if let Some(event) = poll_event(tick)? {
            handle_event(app, event);
        }
    }

    Ok(())
}
