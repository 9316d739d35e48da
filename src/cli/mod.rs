//! CLI command handling

pub mod analyze;
pub mod output;
pub mod show_config;

pub use analyze::*;
pub use output::*;
pub use show_config::*;
