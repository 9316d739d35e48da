//! 分类器 - prompt、重试与响应校验
//!
//! `classify` 永远不会返回错误：任何失败都折叠成 `Prediction::Error`，
//! 并通过 [`AdvisorySink`] 给出一条用户可见的提示。

use crate::ai::client::{ChatTransport, GroqConfig, TransportResponse};
use crate::ai::prompt::build_classification_prompt;
use crate::ai::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use crate::ai::types::{
    Advisory, AdvisorySink, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
    ClassificationResult, ErrorResponse, LogSink, Prediction, ResponseFormat,
};
use crate::error::DetectorError;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

/// 429 状态码
const TOO_MANY_REQUESTS: u16 = 429;

/// 远端返回的分类 JSON（未校验）
#[derive(Debug, Deserialize)]
struct RawVerdict {
    prediction: Option<Prediction>,
    real_confidence: Option<f64>,
    fake_confidence: Option<f64>,
}

/// 分类器
pub struct Classifier<T, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    model: String,
    temperature: f64,
    retry: RetryPolicy,
}

impl<T: ChatTransport> Classifier<T, ThreadSleeper> {
    pub fn new(transport: T, config: &GroqConfig, retry: RetryPolicy) -> Self {
        Self::with_sleeper(transport, ThreadSleeper, config, retry)
    }
}

impl<T: ChatTransport, S: Sleeper> Classifier<T, S> {
    pub fn with_sleeper(transport: T, sleeper: S, config: &GroqConfig, retry: RetryPolicy) -> Self {
        Self {
            transport,
            sleeper,
            model: config.model.clone(),
            temperature: config.temperature,
            retry,
        }
    }

    /// 分类文本，提示只写入日志
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classify_with_advisories(text, &mut LogSink)
    }

    /// 分类文本，提示推送到 `sink`
    pub fn classify_with_advisories(
        &self,
        text: &str,
        sink: &mut dyn AdvisorySink,
    ) -> ClassificationResult {
        match self.try_classify(text, sink) {
            Ok(result) => {
                info!(prediction = %result.prediction, "Classification complete");
                result
            }
            Err(e) => {
                error!(error = %e, "Classification failed");
                sink.push(Advisory::error(e.to_string()));
                ClassificationResult::error()
            }
        }
    }

    fn build_request(&self, text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_classification_prompt(text),
            }],
            model: self.model.clone(),
            temperature: self.temperature,
            response_format: ResponseFormat::json_object(),
        }
    }

    fn try_classify(
        &self,
        text: &str,
        sink: &mut dyn AdvisorySink,
    ) -> Result<ClassificationResult, DetectorError> {
        let request = self.build_request(text);
        let max_attempts = self.retry.max_attempts.max(1);

        for attempt in 0..max_attempts {
            debug!(attempt = attempt + 1, max_attempts, text_len = text.len(), "Calling completion API");

            let response = self
                .transport
                .send(&request)
                .map_err(|e| DetectorError::TransportFailure(e.to_string()))?;

            if response.status == TOO_MANY_REQUESTS {
                let delay = self.retry.delay_for(attempt);
                let message = format!(
                    "Rate limit exceeded. Retrying in {} seconds...",
                    delay.as_secs()
                );
                warn!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "Rate limited by API");
                sink.push(Advisory::warning(message));
                self.sleeper.sleep(delay);
                continue;
            }

            if !response.is_success() {
                return Err(remote_error(&response));
            }

            return parse_completion(&response.body);
        }

        Err(DetectorError::RateLimited {
            attempts: max_attempts,
        })
    }
}

/// 从错误响应中提取可读信息
fn remote_error(response: &TransportResponse) -> DetectorError {
    let message = match serde_json::from_str::<ErrorResponse>(&response.body) {
        Ok(error_resp) => error_resp.error.message,
        Err(_) => response.body.trim().to_string(),
    };
    DetectorError::RemoteError {
        status: response.status,
        message,
    }
}

/// 解析 completion 响应体并校验分类 JSON
pub(crate) fn parse_completion(body: &str) -> Result<ClassificationResult, DetectorError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| DetectorError::MalformedResponse(format!("invalid response body: {}", e)))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| DetectorError::MalformedResponse("no completion content".to_string()))?;

    parse_verdict(&content)
}

/// 校验模型输出：三个字段必须齐全，结论只能是 True/Fake/Unverifiable，
/// 置信度必须在 [0, 1] 内
pub fn parse_verdict(content: &str) -> Result<ClassificationResult, DetectorError> {
    let raw: RawVerdict = serde_json::from_str(content.trim())
        .map_err(|e| DetectorError::MalformedResponse(format!("invalid verdict JSON: {}", e)))?;

    let prediction = match raw.prediction {
        Some(Prediction::Error) => {
            return Err(DetectorError::MalformedResponse(
                "model returned prediction \"Error\"".to_string(),
            ))
        }
        Some(p) => p,
        None => return Err(missing_field("prediction")),
    };
    let real = raw.real_confidence.ok_or_else(|| missing_field("real_confidence"))?;
    let fake = raw.fake_confidence.ok_or_else(|| missing_field("fake_confidence"))?;

    for (name, value) in [("real_confidence", real), ("fake_confidence", fake)] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DetectorError::MalformedResponse(format!(
                "{} out of range: {}",
                name, value
            )));
        }
    }

    Ok(ClassificationResult {
        prediction,
        real_confidence: Some(real),
        fake_confidence: Some(fake),
    })
}

fn missing_field(name: &str) -> DetectorError {
    DetectorError::MalformedResponse(format!("missing field `{}`", name))
}
