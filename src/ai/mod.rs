//! AI 集成 - Groq 客户端、prompt 与分类重试

pub mod classifier;
pub mod client;
pub mod prompt;
pub mod retry;
pub mod types;

pub use classifier::{parse_verdict, Classifier};
pub use client::{ChatTransport, GroqClient, GroqConfig, TransportResponse};
pub use prompt::build_classification_prompt;
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use types::{
    Advisory, AdvisoryLevel, AdvisorySink, ChatCompletionRequest, ChatMessage,
    ClassificationResult, LogSink, Prediction,
};
