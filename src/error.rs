//! 错误类型定义
//!
//! 配置缺失是唯一的致命错误；其余错误只会中止当前这一次分析，
//! 在分类客户端边界统一折叠成 `Prediction::Error` 结果。

use thiserror::Error;

/// 配置加载错误（启动期致命）
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 所有来源都没有找到 API key
    #[error(
        "No Groq API key found. Create ~/.config/fake-news-detector/config.json with groq_api_key, \
         set GROQ_API_KEY env var, or create ~/.groq/api_key"
    )]
    ConfigurationMissing,
}

/// 内容获取错误
///
/// 所有变体的 Display 都以 `Error fetching URL:` 开头，便于直接展示给用户。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AcquisitionError {
    #[error("Error fetching URL: invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Error fetching URL: {0}")]
    Network(String),
    #[error("Error fetching URL: server returned HTTP {0}")]
    HttpStatus(u16),
    #[error("Error fetching URL: unsupported content type '{0}'")]
    UnsupportedContent(String),
    #[error("Error fetching URL: no article text found on page")]
    EmptyArticle,
}

/// 用户可见的失败标记
pub const ACQUISITION_FAILURE_MARKER: &str = "Error fetching URL";

/// 分类请求错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectorError {
    #[error(transparent)]
    AcquisitionFailure(#[from] AcquisitionError),
    /// 429，重试耗尽后仍被限流
    #[error("Rate limit exceeded after {attempts} attempts")]
    RateLimited { attempts: u32 },
    /// 不可重试的 HTTP 错误
    #[error("HTTP error occurred ({status}): {message}")]
    RemoteError { status: u16, message: String },
    /// 网络或传输层失败
    #[error("Error calling the Groq API: {0}")]
    TransportFailure(String),
    /// 200 但内容不是合法的分类 JSON
    #[error("API response was empty or malformed: {0}")]
    MalformedResponse(String),
}

impl DetectorError {
    /// 是否值得重试（仅限流）
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
