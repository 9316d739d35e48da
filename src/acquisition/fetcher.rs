//! 文章下载

use crate::acquisition::extractor::ArticleExtractor;
use crate::error::AcquisitionError;
use anyhow::{anyhow, Result};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, warn};

/// 默认抓取超时（毫秒）
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 15_000;

/// 正文最多保留的字符数
pub const DEFAULT_MAX_ARTICLE_CHARS: usize = 2000;

/// 部分新闻站点会拒绝没有浏览器 UA 的请求
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 抓取配置
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub max_chars: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            max_chars: DEFAULT_MAX_ARTICLE_CHARS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// 把 URL 变成正文文本
pub trait ContentFetcher {
    fn fetch_article(&self, url: &str) -> Result<String, AcquisitionError>;
}

impl<F: ContentFetcher + ?Sized> ContentFetcher for &F {
    fn fetch_article(&self, url: &str) -> Result<String, AcquisitionError> {
        (**self).fetch_article(url)
    }
}

/// 校验 URL，只接受 http/https
pub fn validate_url(url: &str) -> Result<Url, AcquisitionError> {
    let parsed = Url::parse(url.trim()).map_err(|e| AcquisitionError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(AcquisitionError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

/// 基于 reqwest 的抓取器
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    extractor: ArticleExtractor,
    max_chars: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self {
            client,
            extractor: ArticleExtractor::new(),
            max_chars: config.max_chars,
        })
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch_article(&self, url: &str) -> Result<String, AcquisitionError> {
        let parsed = validate_url(url)?;
        debug!(url = %parsed, "Fetching article");

        let response = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Article fetch returned error status");
            return Err(AcquisitionError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !content_type.is_empty() && !is_textual(&content_type) {
            return Err(AcquisitionError::UnsupportedContent(content_type));
        }

        let html = response
            .text()
            .map_err(|e| AcquisitionError::Network(e.to_string()))?;

        let text = self
            .extractor
            .extract(&html, self.max_chars)
            .ok_or(AcquisitionError::EmptyArticle)?;
        debug!(url, chars = text.chars().count(), "Article extracted");
        Ok(text)
    }
}

fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type.contains("html")
        || content_type.contains("xml")
}
