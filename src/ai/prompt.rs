//! 分类 prompt 构造

/// 构造事实核查 prompt，原文逐字嵌入
pub fn build_classification_prompt(text: &str) -> String {
    format!(
        r#"You are an expert fact-checker. Classify the following text as "True", "Fake", or "Unverifiable".
Give your prediction together with two confidence scores between 0.0 and 1.0: one that the text is real news and one that it is fake news.

Text to analyze: "{text}"

Respond with exactly one JSON object and nothing else: no explanations, no markdown, no code fences.
{{
  "prediction": "True" | "Fake" | "Unverifiable",
  "real_confidence": number,
  "fake_confidence": number
}}

If the text is not a news statement, is too short, or is an opinion, classify it as "Unverifiable"."#
    )
}
