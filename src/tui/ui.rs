//! TUI 渲染模块

use crate::ai::{AdvisoryLevel, ClassificationResult, Prediction};
use crate::analysis::{AnalysisOutcome, AnalysisReport, InputKind};
use crate::cli::output::format_percent;
use crate::tui::state::Phase;
use crate::tui::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// 提示区域高度
const LOG_HEIGHT: u16 = 7;

/// 渲染主界面
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // 垂直分割: 标题栏 | 主区域 | 提示 | 底部栏
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(12),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(" 🗞  Fake News Detector │ Educational Purpose Only ")
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(title, vertical[0]);

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vertical[1]);

    render_input(app, frame, main_area[0]);
    render_result(app, frame, main_area[1]);
    render_log(app, frame, vertical[2]);

    let help = match app.phase {
        Phase::Idle => " [Tab] Text/URL  [Enter] Analyze  [Ctrl-U] clear  [Esc] quit ",
        Phase::Pending | Phase::Analyzing => " Analyzing...  [Esc] quit ",
    };
    let help_bar = Paragraph::new(help).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(help_bar, vertical[3]);
}

/// 输入区：模式切换 + 输入框
fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let mode_span = |kind: InputKind| {
        let label = format!(" {} ", kind);
        if app.input_kind == kind {
            Span::styled(label, Style::default().bg(Color::Cyan).fg(Color::Black))
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };
    let modes = Paragraph::new(Line::from(vec![
        mode_span(InputKind::Text),
        Span::raw("  "),
        mode_span(InputKind::Url),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Select your input type "),
    );
    frame.render_widget(modes, chunks[0]);

    let (title, placeholder) = match app.input_kind {
        InputKind::Text => (" Enter the text to analyze ", "Paste your news text here..."),
        InputKind::Url => (" Enter the URL to analyze ", "e.g., https://www.nytimes.com/..."),
    };
    let input = app.active_input();
    let content = if input.text().is_empty() && app.phase == Phase::Idle {
        Line::from(vec![
            Span::raw("│"),
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let (before, after) = input.split_at_cursor();
        let cursor = if app.phase == Phase::Idle { "│" } else { "" };
        Line::from(format!("{}{}{}", before, cursor, after))
    };
    let border_style = if app.phase == Phase::Idle {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        );
    frame.render_widget(paragraph, chunks[1]);
}

/// 结果区
fn render_result(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Result ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.phase != Phase::Idle {
        let waiting = Paragraph::new("🔍 Analyzing, please wait...")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(waiting, inner);
        return;
    }

    let Some(report) = &app.report else {
        let hint = Paragraph::new("Enter text or a URL to analyze its authenticity.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, inner);
        return;
    };

    match &report.outcome {
        AnalysisOutcome::EmptyInput => {
            let warning = Paragraph::new("⚠ Please provide text or a URL to analyze.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(warning, inner);
        }
        AnalysisOutcome::AcquisitionFailed { message } => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, inner);
        }
        AnalysisOutcome::Classified { result } => render_verdict(report, result, frame, inner),
    }
}

fn render_verdict(report: &AnalysisReport, result: &ClassificationResult, frame: &mut Frame, area: Rect) {
    if result.is_error() {
        let error = Paragraph::new(result.prediction.verdict_message())
            .style(Style::default().fg(Color::Red));
        frame.render_widget(error, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "✅ Analysis complete!",
        Style::default().fg(Color::Green),
    ))];
    if let Some(url) = &report.source_url {
        lines.push(Line::from(format!("URL Analyzed: {}", url)));
    }
    lines.push(Line::from(vec![
        Span::raw("Prediction: "),
        Span::styled(
            result.prediction.as_str(),
            Style::default()
                .fg(prediction_color(result.prediction))
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(result.prediction.verdict_message()));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);

    if let (Some(real), Some(fake)) = (result.real_confidence, result.fake_confidence) {
        frame.render_widget(confidence_gauge(" Real News Confidence ", real, Color::Green), chunks[1]);
        frame.render_widget(confidence_gauge(" Fake News Confidence ", fake, Color::Red), chunks[2]);
    }
}

fn confidence_gauge(title: &str, value: f64, color: Color) -> Gauge<'_> {
    let ratio = if value.is_finite() { value.clamp(0.0, 1.0) } else { 0.0 };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format_percent(ratio))
}

fn prediction_color(prediction: Prediction) -> Color {
    match prediction {
        Prediction::True => Color::Green,
        Prediction::Fake => Color::Red,
        Prediction::Unverifiable => Color::Yellow,
        Prediction::Error => Color::Magenta,
    }
}

/// 提示历史，最新的在最上面
fn render_log(app: &App, frame: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .log
        .iter()
        .rev()
        .take(visible)
        .map(|entry| {
            let color = match entry.level {
                AdvisoryLevel::Warning => Color::Yellow,
                AdvisoryLevel::Error => Color::Red,
            };
            let text = format!(
                "[{}] {} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.icon(),
                entry.message
            );
            ListItem::new(text).style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}
