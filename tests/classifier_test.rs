//! 分类器重试与响应校验测试
//!
//! 使用脚本化的传输层和记录型 sleeper，不访问网络也不真正等待。

use anyhow::{anyhow, Result};
use fake_news_detector::ai::{
    Advisory, AdvisoryLevel, ChatCompletionRequest, ChatTransport, ClassificationResult,
    Classifier, GroqConfig, Prediction, RetryPolicy, Sleeper, TransportResponse,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

// ============================================================================
// 测试替身
// ============================================================================

/// 按顺序返回预设响应的传输层
struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<TransportResponse>>>,
    requests: RefCell<Vec<ChatCompletionRequest>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<TransportResponse>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl ChatTransport for ScriptedTransport {
    fn send(&self, request: &ChatCompletionRequest) -> Result<TransportResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no scripted response left")))
    }
}

/// 只记录等待时长
#[derive(Default)]
struct RecordingSleeper {
    delays: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.delays.borrow_mut().push(duration);
    }
}

fn completion(content: &str) -> TransportResponse {
    let body = serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    });
    TransportResponse::new(200, body.to_string())
}

fn rate_limited() -> Result<TransportResponse> {
    Ok(TransportResponse::new(
        429,
        r#"{"error":{"message":"Rate limit reached for model"}}"#,
    ))
}

fn classify(
    responses: Vec<Result<TransportResponse>>,
) -> (ClassificationResult, Vec<Advisory>, usize, Vec<Duration>) {
    let transport = ScriptedTransport::new(responses);
    let sleeper = RecordingSleeper::default();
    let classifier = Classifier::with_sleeper(
        &transport,
        &sleeper,
        &GroqConfig::default(),
        RetryPolicy::default(),
    );
    let mut advisories: Vec<Advisory> = Vec::new();
    let result = classifier.classify_with_advisories("Some news text", &mut advisories);
    let delays = sleeper.delays.borrow().clone();
    (result, advisories, transport.calls(), delays)
}

// ============================================================================
// 成功路径
// ============================================================================

mod success_tests {
    use super::*;

    #[test]
    fn test_well_formed_verdicts_are_accepted() {
        for (prediction, expected) in [
            ("True", Prediction::True),
            ("Fake", Prediction::Fake),
            ("Unverifiable", Prediction::Unverifiable),
        ] {
            let content = format!(
                r#"{{"prediction":"{}","real_confidence":0.35,"fake_confidence":0.65}}"#,
                prediction
            );
            let (result, advisories, calls, delays) = classify(vec![Ok(completion(&content))]);

            assert_eq!(result.prediction, expected);
            for value in [result.real_confidence.unwrap(), result.fake_confidence.unwrap()] {
                assert!((0.0..=1.0).contains(&value));
            }
            assert!(advisories.is_empty());
            assert_eq!(calls, 1);
            assert!(delays.is_empty());
        }
    }

    #[test]
    fn test_fabricated_response_round_trips_unmodified() {
        let (result, _, _, _) = classify(vec![Ok(completion(
            r#"{"prediction":"Fake","real_confidence":0.1,"fake_confidence":0.9}"#,
        ))]);

        assert_eq!(
            result,
            ClassificationResult {
                prediction: Prediction::Fake,
                real_confidence: Some(0.1),
                fake_confidence: Some(0.9),
            }
        );
    }

    #[test]
    fn test_request_shape() {
        let transport = ScriptedTransport::new(vec![Ok(completion(
            r#"{"prediction":"True","real_confidence":0.9,"fake_confidence":0.1}"#,
        ))]);
        let config = GroqConfig::default();
        let classifier =
            Classifier::with_sleeper(&transport, RecordingSleeper::default(), &config, RetryPolicy::default());
        classifier.classify("The central bank raised rates by 0.25%.");

        let requests = transport.requests.borrow();
        let request = &requests[0];
        assert_eq!(request.model, "llama3-8b-8192");
        assert!((request.temperature - 0.1).abs() < f64::EPSILON);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert!(request.messages[0]
            .content
            .contains("The central bank raised rates by 0.25%."));

        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }
}

// ============================================================================
// 限流重试
// ============================================================================

mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_three_rate_limits_exhaust_retries() {
        let (result, advisories, calls, delays) =
            classify(vec![rate_limited(), rate_limited(), rate_limited()]);

        assert_eq!(calls, 3);
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8)
            ]
        );
        assert_eq!(result, ClassificationResult::error());

        let warnings: Vec<_> = advisories
            .iter()
            .filter(|a| a.level == AdvisoryLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].message.contains("Retrying in 2 seconds"));
        assert!(warnings[2].message.contains("Retrying in 8 seconds"));
        assert_eq!(advisories.last().unwrap().level, AdvisoryLevel::Error);
    }

    #[test]
    fn test_rate_limit_then_success() {
        let (result, advisories, calls, delays) = classify(vec![
            rate_limited(),
            Ok(completion(
                r#"{"prediction":"True","real_confidence":0.7,"fake_confidence":0.3}"#,
            )),
        ]);

        assert_eq!(calls, 2);
        assert_eq!(delays, vec![Duration::from_secs(2)]);
        assert_eq!(result.prediction, Prediction::True);
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].level, AdvisoryLevel::Warning);
    }
}

// ============================================================================
// 不可重试的失败
// ============================================================================

mod failure_tests {
    use super::*;

    #[test]
    fn test_server_error_is_not_retried() {
        let (result, advisories, calls, delays) = classify(vec![Ok(TransportResponse::new(
            500,
            "Internal Server Error",
        ))]);

        assert_eq!(calls, 1);
        assert!(delays.is_empty());
        assert_eq!(result, ClassificationResult::error());
        assert_eq!(advisories.len(), 1);
        assert!(advisories[0].message.contains("500"));
    }

    #[test]
    fn test_unauthorized_reports_api_message() {
        let (result, advisories, calls, _) = classify(vec![Ok(TransportResponse::new(
            401,
            r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#,
        ))]);

        assert_eq!(calls, 1);
        assert!(result.is_error());
        assert!(advisories[0].message.contains("Invalid API Key"));
    }

    #[test]
    fn test_transport_failure_is_not_retried() {
        let (result, advisories, calls, delays) =
            classify(vec![Err(anyhow!("operation timed out"))]);

        assert_eq!(calls, 1);
        assert!(delays.is_empty());
        assert_eq!(result, ClassificationResult::error());
        assert!(advisories[0].message.contains("operation timed out"));
    }

    #[test]
    fn test_non_json_body_is_error_without_retry() {
        let (result, _, calls, delays) =
            classify(vec![Ok(TransportResponse::new(200, "<html>oops</html>"))]);

        assert_eq!(calls, 1);
        assert!(delays.is_empty());
        assert_eq!(result, ClassificationResult::error());
    }

    #[test]
    fn test_non_json_content_is_error() {
        let (result, advisories, calls, _) =
            classify(vec![Ok(completion("The text appears to be fake news."))]);

        assert_eq!(calls, 1);
        assert!(result.is_error());
        assert_eq!(advisories.len(), 1);
        assert_eq!(advisories[0].level, AdvisoryLevel::Error);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let (result, _, _, _) = classify(vec![Ok(completion(
            r#"{"prediction":"True","real_confidence":0.9}"#,
        ))]);
        assert_eq!(result, ClassificationResult::error());
    }

    #[test]
    fn test_empty_choices_is_rejected() {
        let (result, _, calls, _) =
            classify(vec![Ok(TransportResponse::new(200, r#"{"choices":[]}"#))]);
        assert_eq!(calls, 1);
        assert!(result.is_error());
    }
}
