//! 重试策略与可注入的 sleep
//!
//! 仅 HTTP 429 会触发重试。第 n 次（从 0 开始）失败后等待
//! `initial_backoff * 2^n`，默认即 2s、4s、8s。

use std::time::Duration;

/// 默认最大尝试次数（含第一次）
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// 默认初始退避（毫秒）
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 2000;

/// 重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数
    pub max_attempts: u32,
    /// 初始退避（毫秒）
    pub initial_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF_MS,
        }
    }
}

impl RetryPolicy {
    /// 第 `attempt` 次尝试（从 0 开始）被限流后的等待时间
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }
}

/// 阻塞等待的抽象，测试中替换为记录器
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

impl<S: Sleeper + ?Sized> Sleeper for &S {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

/// 真实线程 sleep
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
