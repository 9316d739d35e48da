//! Fake News Detector - 借助远端 LLM 判断新闻文本或文章的真伪

pub mod acquisition;
pub mod ai;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod tui;

pub use acquisition::{extract, ContentFetcher, FetchConfig, HttpFetcher};
pub use ai::{
    Advisory, AdvisoryLevel, AdvisorySink, ChatTransport, ClassificationResult, Classifier,
    GroqClient, GroqConfig, Prediction, RetryPolicy, Sleeper, ThreadSleeper, TransportResponse,
};
pub use analysis::{AnalysisInput, AnalysisOutcome, AnalysisReport, Analyzer, InputKind};
pub use config::{ConfigSources, DetectorConfig, KeySource};
pub use error::{AcquisitionError, ConfigError, DetectorError, ACQUISITION_FAILURE_MARKER};
