//! TUI 交互界面模块

mod app;
mod event;
mod input;
mod state;
mod ui;


pub use app::{init_terminal, restore_terminal, run, App, AppResult, Tui, MAX_LOG_ENTRIES};
pub use event::{handle_event, handle_key, poll_event, TuiEvent};
pub use input::TextInput;
pub use state::{LogEntry, Phase};
pub use ui::render;
