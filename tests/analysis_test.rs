//! 分析流程测试：输入校验、内容获取失败短路、文本透传

use anyhow::Result;
use fake_news_detector::acquisition::{extract, ContentFetcher};
use fake_news_detector::ai::{
    ChatCompletionRequest, ChatTransport, Classifier, GroqConfig, Prediction, RetryPolicy, Sleeper,
    TransportResponse,
};
use fake_news_detector::analysis::{
    AnalysisInput, AnalysisOutcome, Analyzer, InputKind, EMPTY_INPUT_MESSAGE,
};
use fake_news_detector::{AcquisitionError, AdvisoryLevel, ACQUISITION_FAILURE_MARKER};
use std::cell::{Cell, RefCell};
use std::time::Duration;

// ============================================================================
// 测试替身
// ============================================================================

/// 总是返回同一个结论，并记录收到的 prompt
struct FixedTransport {
    content: String,
    prompts: RefCell<Vec<String>>,
}

impl FixedTransport {
    fn fake_verdict() -> Self {
        Self {
            content: r#"{"prediction":"Fake","real_confidence":0.2,"fake_confidence":0.8}"#
                .to_string(),
            prompts: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl ChatTransport for FixedTransport {
    fn send(&self, request: &ChatCompletionRequest) -> Result<TransportResponse> {
        self.prompts
            .borrow_mut()
            .push(request.messages[0].content.clone());
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": self.content } }]
        });
        Ok(TransportResponse::new(200, body.to_string()))
    }
}

/// 返回预设结果的抓取器
struct StubFetcher {
    result: Result<String, AcquisitionError>,
    calls: Cell<usize>,
}

impl StubFetcher {
    fn ok(text: &str) -> Self {
        Self {
            result: Ok(text.to_string()),
            calls: Cell::new(0),
        }
    }

    fn failing(error: AcquisitionError) -> Self {
        Self {
            result: Err(error),
            calls: Cell::new(0),
        }
    }
}

impl ContentFetcher for StubFetcher {
    fn fetch_article(&self, _url: &str) -> Result<String, AcquisitionError> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone()
    }
}

struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}

fn analyzer<'a>(
    transport: &'a FixedTransport,
    fetcher: &'a StubFetcher,
) -> Analyzer<&'a FixedTransport, &'a StubFetcher, NoSleep> {
    let classifier =
        Classifier::with_sleeper(transport, NoSleep, &GroqConfig::default(), RetryPolicy::default());
    Analyzer::new(classifier, fetcher)
}

// ============================================================================
// 文本输入
// ============================================================================

mod text_input_tests {
    use super::*;

    #[test]
    fn test_text_is_passed_through_unchanged() {
        let transport = FixedTransport::fake_verdict();
        let fetcher = StubFetcher::ok("unused");
        let text = "  Breaking: aliens   endorse candidate \n";

        let report = analyzer(&transport, &fetcher).analyze(&AnalysisInput::Text(text.to_string()));

        assert!(report.is_success());
        assert_eq!(report.input_kind, InputKind::Text);
        assert!(report.source_url.is_none());
        assert_eq!(fetcher.calls.get(), 0);
        assert!(transport.prompts.borrow()[0].contains(text));
        assert_eq!(report.result().unwrap().prediction, Prediction::Fake);
    }

    #[test]
    fn test_blank_input_skips_everything() {
        let transport = FixedTransport::fake_verdict();
        let fetcher = StubFetcher::ok("unused");

        for input in [
            AnalysisInput::Text("   ".to_string()),
            AnalysisInput::Url(String::new()),
        ] {
            let report = analyzer(&transport, &fetcher).analyze(&input);
            assert_eq!(report.outcome, AnalysisOutcome::EmptyInput);
            assert_eq!(report.advisories.len(), 1);
            assert_eq!(report.advisories[0].level, AdvisoryLevel::Warning);
            assert_eq!(report.advisories[0].message, EMPTY_INPUT_MESSAGE);
            assert!(!report.is_success());
        }

        assert_eq!(transport.calls(), 0);
        assert_eq!(fetcher.calls.get(), 0);
    }
}

// ============================================================================
// URL 输入
// ============================================================================

mod url_input_tests {
    use super::*;

    #[test]
    fn test_url_article_is_classified() {
        let transport = FixedTransport::fake_verdict();
        let fetcher = StubFetcher::ok("Article body about the election results.");

        let report = analyzer(&transport, &fetcher)
            .analyze(&AnalysisInput::Url(" https://example.com/story ".to_string()));

        assert!(report.is_success());
        assert_eq!(report.source_url.as_deref(), Some("https://example.com/story"));
        assert_eq!(fetcher.calls.get(), 1);
        assert!(transport.prompts.borrow()[0].contains("Article body about the election results."));
    }

    #[test]
    fn test_acquisition_failure_skips_classification() {
        let transport = FixedTransport::fake_verdict();
        let fetcher =
            StubFetcher::failing(AcquisitionError::Network("connection refused".to_string()));

        let report =
            analyzer(&transport, &fetcher).analyze(&AnalysisInput::Url("https://down.example".into()));

        assert_eq!(transport.calls(), 0);
        match &report.outcome {
            AnalysisOutcome::AcquisitionFailed { message } => {
                assert!(message.contains(ACQUISITION_FAILURE_MARKER));
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(report.advisories[0].level, AdvisoryLevel::Error);
    }

    #[test]
    fn test_article_mentioning_error_is_still_classified() {
        let transport = FixedTransport::fake_verdict();
        let fetcher = StubFetcher::ok("Error rates in the census were lower than expected.");

        let report =
            analyzer(&transport, &fetcher).analyze(&AnalysisInput::Url("https://example.com".into()));

        assert!(report.is_success());
        assert_eq!(transport.calls(), 1);
    }
}

// ============================================================================
// 真实抓取器
// ============================================================================

mod extract_tests {
    use super::*;

    #[test]
    fn test_extract_unreachable_url_returns_marked_error() {
        let err = extract("http://127.0.0.1:1/unreachable").unwrap_err();
        assert!(err.to_string().contains(ACQUISITION_FAILURE_MARKER));
    }

    #[test]
    fn test_extract_rejects_non_http_scheme() {
        let err = extract("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, AcquisitionError::InvalidUrl { .. }));
        assert!(err.to_string().starts_with(ACQUISITION_FAILURE_MARKER));
    }
}
