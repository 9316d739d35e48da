//! 文章正文提取
//!
//! 按以下顺序尝试：
//! 1. JSON-LD 中的 `articleBody`
//! 2. 正文容器（`article`、`main` 等）内的段落
//! 3. 去掉导航、脚本等噪音后的 `<body>` 文本

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// 正文至少多少字符才认为找到了文章
const MIN_ARTICLE_CHARS: usize = 200;

/// 正文容器选择器，按优先级排列
const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".article-body",
    ".article-content",
    ".article__body",
    ".story-body",
    ".entry-content",
    ".post-content",
    "#article-body",
    "#content",
];

/// 回退提取时跳过的元素
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside", "iframe", "form",
];

/// 文章正文提取器
pub struct ArticleExtractor {
    whitespace: Regex,
}

impl Default for ArticleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleExtractor {
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// 提取正文并截断到前 `max_chars` 个字符，找不到正文时返回 `None`
    pub fn extract(&self, html: &str, max_chars: usize) -> Option<String> {
        let document = Html::parse_document(html);

        let text = self
            .from_json_ld(&document)
            .or_else(|| self.from_containers(&document))
            .or_else(|| self.from_body(&document))?;

        Some(truncate_chars(&text, max_chars))
    }

    fn from_json_ld(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("script[type='application/ld+json']").ok()?;
        document
            .select(&selector)
            .filter_map(|el| {
                let raw = el.text().collect::<String>();
                serde_json::from_str::<serde_json::Value>(&raw).ok()
            })
            .filter_map(|value| find_article_body(&value))
            .map(|body| self.normalize(&body))
            .find(|body| body.chars().count() >= MIN_ARTICLE_CHARS)
    }

    fn from_containers(&self, document: &Html) -> Option<String> {
        let paragraph = Selector::parse("p").ok()?;

        for selector_str in CONTAINER_SELECTORS {
            let Ok(selector) = Selector::parse(selector_str) else {
                continue;
            };
            let Some(container) = document.select(&selector).next() else {
                continue;
            };

            let paragraphs: Vec<String> = container
                .select(&paragraph)
                .map(|p| self.normalize(&p.text().collect::<Vec<_>>().join(" ")))
                .filter(|p| !p.is_empty())
                .collect();
            let joined = paragraphs.join("\n\n");
            if joined.chars().count() >= MIN_ARTICLE_CHARS {
                return Some(joined);
            }

            // 没有 <p> 的页面直接取容器文本
            let mut raw = String::new();
            collect_text(container, &mut raw);
            let whole = self.normalize(&raw);
            if whole.chars().count() >= MIN_ARTICLE_CHARS {
                return Some(whole);
            }
        }
        None
    }

    fn from_body(&self, document: &Html) -> Option<String> {
        let selector = Selector::parse("body").ok()?;
        let body = document.select(&selector).next()?;
        let mut raw = String::new();
        collect_text(body, &mut raw);
        let text = self.normalize(&raw);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn normalize(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }
}

/// 递归收集文本，跳过噪音元素
fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            if NOISE_TAGS.contains(&child_el.value().name()) {
                continue;
            }
            collect_text(child_el, out);
            out.push(' ');
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

/// 在 JSON-LD 中递归查找 `articleBody`（兼容数组和 `@graph`）
fn find_article_body(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(body) = map.get("articleBody").and_then(|b| b.as_str()) {
                return Some(body.to_string());
            }
            map.values().find_map(find_article_body)
        }
        serde_json::Value::Array(items) => items.iter().find_map(find_article_body),
        _ => None,
    }
}

/// 按字符（非字节）截断
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
