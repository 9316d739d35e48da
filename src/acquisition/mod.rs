//! 内容获取 - 把 URL 转成正文，原始文本直接透传

pub mod extractor;
pub mod fetcher;

pub use extractor::{truncate_chars, ArticleExtractor};
pub use fetcher::{validate_url, ContentFetcher, FetchConfig, HttpFetcher};

use crate::error::AcquisitionError;

/// 使用默认配置抓取并提取文章正文（前 2000 个字符）
pub fn extract(url: &str) -> Result<String, AcquisitionError> {
    let fetcher = HttpFetcher::new(&FetchConfig::default())
        .map_err(|e| AcquisitionError::Network(e.to_string()))?;
    fetcher.fetch_article(url)
}
