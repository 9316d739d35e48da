//! 启动配置
//!
//! API Key 读取优先级：
//! 1. 配置文件 `~/.config/fake-news-detector/config.json`（字段 `groq_api_key`，可选 `groq_base_url`、`model`、`temperature`、`timeout_ms`）
//! 2. 环境变量 `GROQ_API_KEY`（可选 `GROQ_BASE_URL`）
//! 3. 文件 `~/.groq/api_key`
//!
//! 找不到 key 时返回 [`ConfigError::ConfigurationMissing`]，由 main 终止启动。

use crate::acquisition::FetchConfig;
use crate::ai::{GroqConfig, RetryPolicy};
use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 配置文件相对 home 的路径
pub const CONFIG_FILE_PATH: &str = ".config/fake-news-detector/config.json";

/// key 文件相对 home 的路径
pub const KEY_FILE_PATH: &str = ".groq/api_key";

/// API key 来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    ConfigFile(PathBuf),
    Environment,
    KeyFile(PathBuf),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFile(p) => write!(f, "config file {}", p.display()),
            Self::Environment => write!(f, "environment variable GROQ_API_KEY"),
            Self::KeyFile(p) => write!(f, "key file {}", p.display()),
        }
    }
}

/// 配置文件内容
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    groq_api_key: Option<String>,
    groq_base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    timeout_ms: Option<u64>,
}

/// 候选配置来源，测试中可以指向临时目录
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub config_file: Option<PathBuf>,
    pub env_api_key: Option<String>,
    pub env_base_url: Option<String>,
    pub key_file: Option<PathBuf>,
}

impl ConfigSources {
    /// 真实环境：home 目录下的文件 + 进程环境变量
    pub fn from_environment() -> Self {
        let home = dirs::home_dir();
        Self {
            config_file: home.as_ref().map(|h| h.join(CONFIG_FILE_PATH)),
            env_api_key: std::env::var("GROQ_API_KEY").ok(),
            env_base_url: std::env::var("GROQ_BASE_URL").ok(),
            key_file: home.as_ref().map(|h| h.join(KEY_FILE_PATH)),
        }
    }
}

/// 完整运行配置
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub groq: GroqConfig,
    pub retry: RetryPolicy,
    pub fetch: FetchConfig,
    pub key_source: KeySource,
}

impl DetectorConfig {
    /// 从默认来源加载
    pub fn auto_load() -> Result<Self, ConfigError> {
        Self::load_from(&ConfigSources::from_environment())
    }

    /// 按优先级从给定来源加载
    pub fn load_from(sources: &ConfigSources) -> Result<Self, ConfigError> {
        let mut groq = GroqConfig::default();
        let mut key_source = None;

        // 1. 配置文件
        if let Some(path) = sources.config_file.as_deref() {
            if let Some(file) = read_config_file(path) {
                if let Some(url) = file.groq_base_url.as_deref().filter(|u| !u.is_empty()) {
                    groq.base_url = normalize_base_url(url);
                }
                if let Some(model) = file.model.filter(|m| !m.is_empty()) {
                    groq.model = model;
                }
                if let Some(t) = file.temperature {
                    groq.temperature = t;
                }
                if let Some(ms) = file.timeout_ms {
                    groq.timeout_ms = ms;
                }
                if let Some(key) = file.groq_api_key.filter(|k| !k.trim().is_empty()) {
                    debug!("Using API key from {}, base_url: {}", path.display(), groq.base_url);
                    groq.api_key = key.trim().to_string();
                    key_source = Some(KeySource::ConfigFile(path.to_path_buf()));
                }
            }
        }

        // 2. 环境变量
        if key_source.is_none() {
            if let Some(key) = sources.env_api_key.as_deref().filter(|k| !k.trim().is_empty()) {
                debug!("Using GROQ_API_KEY from environment");
                groq.api_key = key.trim().to_string();
                if let Some(url) = sources.env_base_url.as_deref().filter(|u| !u.is_empty()) {
                    groq.base_url = normalize_base_url(url);
                }
                key_source = Some(KeySource::Environment);
            }
        }

        // 3. key 文件
        if key_source.is_none() {
            if let Some(path) = sources.key_file.as_deref() {
                if let Ok(key) = fs::read_to_string(path) {
                    let key = key.trim();
                    if !key.is_empty() {
                        debug!("Using API key from {}", path.display());
                        groq.api_key = key.to_string();
                        key_source = Some(KeySource::KeyFile(path.to_path_buf()));
                    }
                }
            }
        }

        let key_source = key_source.ok_or(ConfigError::ConfigurationMissing)?;

        Ok(Self {
            groq,
            retry: RetryPolicy::default(),
            fetch: FetchConfig::default(),
            key_source,
        })
    }

    /// 用于展示的掩码 key
    pub fn masked_api_key(&self) -> String {
        mask_key(&self.groq.api_key)
    }
}

fn read_config_file(path: &Path) -> Option<ConfigFile> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<ConfigFile>(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unparseable config file");
            None
        }
    }
}

/// 确保 URL 以 `/chat/completions` 结尾
pub fn normalize_base_url(url: &str) -> String {
    let u = url.trim().trim_end_matches('/');
    if u.ends_with("/chat/completions") {
        u.to_string()
    } else if u.ends_with("/v1") {
        format!("{}/chat/completions", u)
    } else {
        format!("{}/v1/chat/completions", u)
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
