//! Analyze 命令 - 分析一段文本或一篇文章

use crate::analysis::{AnalysisInput, Analyzer, InputKind};
use crate::cli::output::{format_advisory, format_report};
use crate::config::DetectorConfig;
use anyhow::{anyhow, Result};
use clap::Args;
use dialoguer::{Input, Select};

/// Analyze 命令参数
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// 要分析的新闻文本
    #[arg(long, short, conflicts_with = "url")]
    pub text: Option<String>,

    /// 要分析的文章 URL
    #[arg(long, short)]
    pub url: Option<String>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,

    /// 覆盖模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 单次请求超时（秒）
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// 命令行参数覆盖已加载的配置
pub fn apply_overrides(config: &mut DetectorConfig, model: Option<String>, timeout_secs: Option<u64>) {
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        config.groq.model = model;
    }
    if let Some(secs) = timeout_secs {
        config.groq.timeout_ms = secs.saturating_mul(1000);
    }
}

/// 由参数决定输入；都没有时交互式询问
pub fn resolve_input(args: &AnalyzeArgs) -> Result<AnalysisInput> {
    if let Some(text) = &args.text {
        return Ok(AnalysisInput::Text(text.clone()));
    }
    if let Some(url) = &args.url {
        return Ok(AnalysisInput::Url(url.clone()));
    }
    prompt_input()
}

fn prompt_input() -> Result<AnalysisInput> {
    let kinds = [InputKind::Text, InputKind::Url];
    let selection = Select::new()
        .with_prompt("Select your input type")
        .items(&["Text", "URL"])
        .default(0)
        .interact()
        .map_err(|e| anyhow!("输入已取消: {}", e))?;
    let kind = kinds[selection];

    let prompt = match kind {
        InputKind::Text => "Enter the text to analyze",
        InputKind::Url => "Enter the URL to analyze",
    };
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow!("输入已取消: {}", e))?;

    Ok(AnalysisInput::new(kind, value))
}

/// 处理 analyze 命令，返回是否得到有效结论
pub fn handle_analyze(args: AnalyzeArgs, mut config: DetectorConfig) -> Result<bool> {
    let input = resolve_input(&args)?;
    apply_overrides(&mut config, args.model.clone(), args.timeout);

    let analyzer = Analyzer::from_config(&config)?;
    if !args.json {
        eprintln!("🔍 Analyzing, please wait...");
    }
    let report = analyzer.analyze(&input);

    if !args.json {
        for advisory in &report.advisories {
            eprintln!("{}", format_advisory(advisory));
        }
    }

    let output = format_report(&report, args.json);
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(report.is_success())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigSources, KeySource};

    fn config() -> DetectorConfig {
        DetectorConfig::load_from(&ConfigSources {
            env_api_key: Some("gsk_test".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_input_from_flags() {
        let args = AnalyzeArgs {
            text: Some("The moon is made of cheese".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args).unwrap(),
            AnalysisInput::Text("The moon is made of cheese".to_string())
        );

        let args = AnalyzeArgs {
            url: Some("https://example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_input(&args).unwrap(),
            AnalysisInput::Url("https://example.com".to_string())
        );
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = config();
        assert_eq!(config.key_source, KeySource::Environment);

        apply_overrides(&mut config, Some("llama-3.1-8b-instant".to_string()), Some(20));
        assert_eq!(config.groq.model, "llama-3.1-8b-instant");
        assert_eq!(config.groq.timeout_ms, 20_000);
    }

    #[test]
    fn test_blank_model_override_is_ignored() {
        let mut config = config();
        let before = config.groq.model.clone();
        apply_overrides(&mut config, Some("  ".to_string()), None);
        assert_eq!(config.groq.model, before);
    }
}
