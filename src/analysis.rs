//! 单次分析流程：输入校验 → 内容获取 → 分类 → 报告

use crate::acquisition::{ContentFetcher, HttpFetcher};
use crate::ai::{
    Advisory, ChatTransport, ClassificationResult, Classifier, GroqClient, Sleeper, ThreadSleeper,
};
use crate::config::DetectorConfig;
use crate::error::DetectorError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// 空输入时的提示
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide text or a URL to analyze.";

/// 输入方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Text,
    Url,
}

impl InputKind {
    pub fn toggle(self) -> Self {
        match self {
            Self::Text => Self::Url,
            Self::Url => Self::Text,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Url => f.write_str("URL"),
        }
    }
}

/// 用户输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    Text(String),
    Url(String),
}

impl AnalysisInput {
    pub fn new(kind: InputKind, value: impl Into<String>) -> Self {
        match kind {
            InputKind::Text => Self::Text(value.into()),
            InputKind::Url => Self::Url(value.into()),
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            Self::Text(_) => InputKind::Text,
            Self::Url(_) => InputKind::Url,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Text(s) | Self::Url(s) => s,
        }
    }
}

/// 分析结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// 输入为空，未调用任何服务
    EmptyInput,
    /// URL 抓取失败，未调用分类
    AcquisitionFailed { message: String },
    /// 已分类（可能是 `Error` 结论）
    Classified { result: ClassificationResult },
}

/// 一次分析的完整报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub input_kind: InputKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(flatten)]
    pub outcome: AnalysisOutcome,
    pub advisories: Vec<Advisory>,
}

impl AnalysisReport {
    /// 拿到了有效结论
    pub fn is_success(&self) -> bool {
        matches!(&self.outcome, AnalysisOutcome::Classified { result } if !result.is_error())
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.outcome {
            AnalysisOutcome::Classified { result } => Some(result),
            _ => None,
        }
    }
}

/// 分析器
pub struct Analyzer<T, F, S = ThreadSleeper> {
    classifier: Classifier<T, S>,
    fetcher: F,
}

impl Analyzer<GroqClient, HttpFetcher, ThreadSleeper> {
    /// 用真实 HTTP 客户端构建
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        let client = GroqClient::new(config.groq.clone())?;
        let fetcher = HttpFetcher::new(&config.fetch)?;
        let classifier = Classifier::new(client, &config.groq, config.retry.clone());
        Ok(Self::new(classifier, fetcher))
    }
}

impl<T: ChatTransport, F: ContentFetcher, S: Sleeper> Analyzer<T, F, S> {
    pub fn new(classifier: Classifier<T, S>, fetcher: F) -> Self {
        Self {
            classifier,
            fetcher,
        }
    }

    /// 执行一次分析，不会失败；所有问题都体现在报告里
    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisReport {
        let mut advisories: Vec<Advisory> = Vec::new();
        let source_url = match input {
            AnalysisInput::Url(url) => Some(url.trim().to_string()),
            AnalysisInput::Text(_) => None,
        };
        let report = |outcome: AnalysisOutcome, advisories: Vec<Advisory>| AnalysisReport {
            input_kind: input.kind(),
            source_url: source_url.clone(),
            outcome,
            advisories,
        };

        if input.value().trim().is_empty() {
            advisories.push(Advisory::warning(EMPTY_INPUT_MESSAGE));
            return report(AnalysisOutcome::EmptyInput, advisories);
        }

        let text = match input {
            AnalysisInput::Text(text) => text.clone(),
            AnalysisInput::Url(url) => match self.fetcher.fetch_article(url.trim()) {
                Ok(text) => text,
                Err(e) => {
                    let err = DetectorError::from(e);
                    warn!(url = %url, error = %err, "Content acquisition failed");
                    let message = err.to_string();
                    advisories.push(Advisory::error(message.clone()));
                    return report(AnalysisOutcome::AcquisitionFailed { message }, advisories);
                }
            },
        };

        info!(kind = %input.kind(), chars = text.chars().count(), "Analyzing content");
        let result = self.classifier.classify_with_advisories(&text, &mut advisories);
        report(AnalysisOutcome::Classified { result }, advisories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_toggle() {
        assert_eq!(InputKind::Text.toggle(), InputKind::Url);
        assert_eq!(InputKind::Url.toggle(), InputKind::Text);
    }

    #[test]
    fn test_analysis_input_accessors() {
        let input = AnalysisInput::new(InputKind::Url, "https://example.com");
        assert_eq!(input.kind(), InputKind::Url);
        assert_eq!(input.value(), "https://example.com");
    }

    #[test]
    fn test_report_serializes_flat_status() {
        let report = AnalysisReport {
            input_kind: InputKind::Text,
            source_url: None,
            outcome: AnalysisOutcome::AcquisitionFailed {
                message: "Error fetching URL: boom".to_string(),
            },
            advisories: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "acquisition_failed");
        assert_eq!(json["message"], "Error fetching URL: boom");
        assert_eq!(json["input_kind"], "text");
        assert!(json.get("source_url").is_none());
    }
}
