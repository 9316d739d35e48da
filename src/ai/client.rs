//! Groq chat-completion 客户端
//!
//! 只负责一次 HTTP 往返：发请求、读状态码和响应体。状态码的解释与重试
//! 由 [`crate::ai::Classifier`] 完成，这里不做任何判断。

use crate::ai::types::ChatCompletionRequest;
use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::debug;

/// Groq OpenAI 兼容接口
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// 默认模型
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// 低温度，结果更稳定
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// 默认单次请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Groq 客户端配置
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API 密钥
    pub api_key: String,
    /// 完整的 chat completions URL
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// 采样温度
    pub temperature: f64,
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: GROQ_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// 一次 HTTP 往返的原始结果
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// chat-completion 传输层
///
/// `Err` 只表示网络/传输失败；任何 HTTP 状态码都应以 `Ok` 返回。
pub trait ChatTransport {
    fn send(&self, request: &ChatCompletionRequest) -> Result<TransportResponse>;
}

impl<T: ChatTransport + ?Sized> ChatTransport for &T {
    fn send(&self, request: &ChatCompletionRequest) -> Result<TransportResponse> {
        (**self).send(request)
    }
}

/// Groq API 客户端
pub struct GroqClient {
    client: reqwest::blocking::Client,
    pub(crate) config: GroqConfig,
}

impl GroqClient {
    /// 创建新客户端
    pub fn new(config: GroqConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

impl ChatTransport for GroqClient {
    fn send(&self, request: &ChatCompletionRequest) -> Result<TransportResponse> {
        debug!(
            model = %request.model,
            base_url = %self.config.base_url,
            timeout_ms = self.config.timeout_ms,
            "Sending request to Groq API"
        );

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(&self.config.base_url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                let elapsed = start.elapsed();
                anyhow!("API request failed after {}ms: {}", elapsed.as_millis(), e)
            })?;

        let status = response.status().as_u16();
        debug!(status, elapsed_ms = start.elapsed().as_millis(), "API request completed");

        let body = response
            .text()
            .map_err(|e| anyhow!("Failed to read response: {}", e))?;

        Ok(TransportResponse { status, body })
    }
}
