//! Config 命令 - 显示当前生效的配置（key 已掩码）

use crate::cli::output::format_output;
use crate::config::DetectorConfig;
use serde::Serialize;

/// 可展示的配置
#[derive(Debug, Serialize)]
pub struct ConfigSummary {
    pub api_key: String,
    pub key_source: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub fetch_timeout_ms: u64,
    pub max_article_chars: usize,
}

impl From<&DetectorConfig> for ConfigSummary {
    fn from(config: &DetectorConfig) -> Self {
        Self {
            api_key: config.masked_api_key(),
            key_source: config.key_source.to_string(),
            base_url: config.groq.base_url.clone(),
            model: config.groq.model.clone(),
            temperature: config.groq.temperature,
            timeout_ms: config.groq.timeout_ms,
            max_attempts: config.retry.max_attempts,
            initial_backoff_ms: config.retry.initial_backoff_ms,
            fetch_timeout_ms: config.fetch.timeout_ms,
            max_article_chars: config.fetch.max_chars,
        }
    }
}

/// 处理 config 命令
pub fn handle_show_config(config: &DetectorConfig, json: bool) -> String {
    let summary = ConfigSummary::from(config);
    if json {
        return format_output(&summary);
    }
    [
        format!("API key:        {} ({})", summary.api_key, summary.key_source),
        format!("Endpoint:       {}", summary.base_url),
        format!("Model:          {}", summary.model),
        format!("Temperature:    {}", summary.temperature),
        format!("Timeout:        {}ms", summary.timeout_ms),
        format!(
            "Retry:          {} attempts, {}ms initial backoff",
            summary.max_attempts, summary.initial_backoff_ms
        ),
        format!(
            "Article fetch:  {}ms timeout, first {} chars",
            summary.fetch_timeout_ms, summary.max_article_chars
        ),
    ]
    .join("\n")
}
