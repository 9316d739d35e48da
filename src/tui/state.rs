//! TUI 状态数据结构

use crate::ai::{Advisory, AdvisoryLevel};
use chrono::{DateTime, Local};

/// 提示记录（带时间）
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: AdvisoryLevel,
    pub message: String,
}

impl LogEntry {
    pub fn from_advisory(advisory: &Advisory) -> Self {
        Self {
            timestamp: Local::now(),
            level: advisory.level,
            message: advisory.message.clone(),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self.level {
            AdvisoryLevel::Warning => "⚠",
            AdvisoryLevel::Error => "✗",
        }
    }
}

/// 当前阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// 等待输入
    #[default]
    Idle,
    /// 已请求分析，下一帧执行
    Pending,
    /// 正在分析（阻塞）
    Analyzing,
}
