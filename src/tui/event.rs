//! 事件处理模块

use crate::tui::state::Phase;
use crate::tui::App;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// TUI 事件
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
}

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        match event::read()? {
            // Windows 上按下和松开各有一个事件
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                return Ok(Some(TuiEvent::Key(key)))
            }
            Event::Paste(text) => return Ok(Some(TuiEvent::Paste(text))),
            _ => {}
        }
    }
    Ok(None)
}

/// 分发事件
pub fn handle_event(app: &mut App, event: TuiEvent) {
    match event {
        TuiEvent::Key(key) => handle_key(app, key),
        TuiEvent::Paste(text) => {
            if app.phase == Phase::Idle {
                app.active_input_mut().insert_str(&text);
            }
        }
    }
}

/// 处理按键事件
pub fn handle_key(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.quit(),
        KeyCode::Esc => app.quit(),
        // 分析进行中只响应退出
        _ if app.phase != Phase::Idle => {}
        KeyCode::Tab | KeyCode::BackTab => app.toggle_input_kind(),
        KeyCode::Enter => app.request_analysis(),
        KeyCode::Char('u') if ctrl => app.active_input_mut().clear(),
        KeyCode::Char(c) if !ctrl => app.active_input_mut().insert(c),
        KeyCode::Backspace => app.active_input_mut().backspace(),
        KeyCode::Delete => app.active_input_mut().delete(),
        KeyCode::Left => app.active_input_mut().move_left(),
        KeyCode::Right => app.active_input_mut().move_right(),
        KeyCode::Home => app.active_input_mut().move_home(),
        KeyCode::End => app.active_input_mut().move_end(),
        _ => {}
    }
}
