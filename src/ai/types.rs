//! 分类相关类型
//!
//! 包含分类结果、提示消息（advisory）以及 chat-completion 线上格式。

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Prediction - 分类结论
// ============================================================================

/// 分类结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    True,
    Fake,
    Unverifiable,
    /// 本地失败，远端模型不应返回该值
    Error,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::Fake => "Fake",
            Self::Unverifiable => "Unverifiable",
            Self::Error => "Error",
        }
    }

    /// 面向用户的结论说明
    pub fn verdict_message(&self) -> &'static str {
        match self {
            Self::True => "This content is likely to be REAL NEWS.",
            Self::Fake => "This content is likely to be FAKE NEWS.",
            Self::Unverifiable => "Unable to make a definitive prediction.",
            Self::Error => "Could not get a valid response from the API.",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ClassificationResult - 单次分类结果
// ============================================================================

/// 单次分类结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: Prediction,
    pub real_confidence: Option<f64>,
    pub fake_confidence: Option<f64>,
}

impl ClassificationResult {
    /// 统一的失败结果：`Error` + 两个 0.0
    pub fn error() -> Self {
        Self {
            prediction: Prediction::Error,
            real_confidence: Some(0.0),
            fake_confidence: Some(0.0),
        }
    }

    pub fn is_error(&self) -> bool {
        self.prediction == Prediction::Error
    }
}

// ============================================================================
// Advisory - 分析过程中给用户的提示
// ============================================================================

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryLevel {
    Warning,
    Error,
}

/// 用户可见的提示消息（不是异常）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub level: AdvisoryLevel,
    pub message: String,
}

impl Advisory {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: AdvisoryLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AdvisoryLevel::Error,
            message: message.into(),
        }
    }
}

/// 提示消息接收端，由展示层决定如何呈现
pub trait AdvisorySink {
    fn push(&mut self, advisory: Advisory);
}

impl AdvisorySink for Vec<Advisory> {
    fn push(&mut self, advisory: Advisory) {
        Vec::push(self, advisory);
    }
}

/// 只写日志、不保留消息的接收端
#[derive(Debug, Default)]
pub struct LogSink;

impl AdvisorySink for LogSink {
    fn push(&mut self, advisory: Advisory) {
        match advisory.level {
            AdvisoryLevel::Warning => tracing::warn!("{}", advisory.message),
            AdvisoryLevel::Error => tracing::error!("{}", advisory.message),
        }
    }
}

// ============================================================================
// Chat completion 线上格式
// ============================================================================

/// Chat completion 请求体
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub temperature: f64,
    pub response_format: ResponseFormat,
}

/// 消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// 响应格式约束
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            format_type: "json_object".to_string(),
        }
    }
}

/// Chat completion 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    pub content: Option<String>,
}

/// API 错误响应
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}
