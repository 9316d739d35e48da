//! Output formatting for CLI commands

use crate::ai::{Advisory, AdvisoryLevel, ClassificationResult};
use crate::analysis::{AnalysisOutcome, AnalysisReport};
use serde::Serialize;

/// 置信度条宽度（字符）
pub const BAR_WIDTH: usize = 20;

/// Format output as JSON or human-readable text based on --json flag
pub fn format_output<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// 渲染分析报告
pub fn format_report(report: &AnalysisReport, json: bool) -> String {
    if json {
        return format_output(report);
    }

    match &report.outcome {
        AnalysisOutcome::EmptyInput | AnalysisOutcome::AcquisitionFailed { .. } => String::new(),
        AnalysisOutcome::Classified { result } if result.is_error() => {
            format!("❌ {}", result.prediction.verdict_message())
        }
        AnalysisOutcome::Classified { result } => {
            format_verdict(result, report.source_url.as_deref())
        }
    }
}

fn format_verdict(result: &ClassificationResult, source_url: Option<&str>) -> String {
    let mut lines = vec!["✅ Analysis complete!".to_string(), String::new()];

    if let Some(url) = source_url {
        lines.push(format!("URL Analyzed: {}", url));
    }
    lines.push(format!("Prediction: {}", result.prediction));
    lines.push(result.prediction.verdict_message().to_string());

    if let (Some(real), Some(fake)) = (result.real_confidence, result.fake_confidence) {
        lines.push(String::new());
        lines.push("Confidence Levels".to_string());
        lines.push(format!(
            "  Real News Confidence  {} {:>7}",
            confidence_bar(real, BAR_WIDTH),
            format_percent(real)
        ));
        lines.push(format!(
            "  Fake News Confidence  {} {:>7}",
            confidence_bar(fake, BAR_WIDTH),
            format_percent(fake)
        ));
    }

    lines.join("\n")
}

/// `[████░░░░]` 形式的条形图，值会被限制在 [0, 1]
pub fn confidence_bar(value: f64, width: usize) -> String {
    let filled = (value.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// 0.625 -> "62.50%"
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// 提示消息一行
pub fn format_advisory(advisory: &Advisory) -> String {
    match advisory.level {
        AdvisoryLevel::Warning => format!("⚠️  {}", advisory.message),
        AdvisoryLevel::Error => format!("❌ {}", advisory.message),
    }
}
