//! 控制循环指标
//!
//! 原子计数器，控制线程写入，任意线程读取快照。

use std::sync::atomic::{AtomicU64, Ordering};

/// 控制循环实时指标
#[derive(Debug, Default)]
pub struct LoopMetrics {
    /// 已完成的控制周期数
    pub ticks: AtomicU64,

    /// 指令发送失败次数（不重试，只计数）
    pub dispatch_failures: AtomicU64,

    /// dt 超过钳位阈值的次数
    pub time_jumps: AtomicU64,

    /// 事件通道已满或已关闭时丢弃的事件数
    pub dropped_events: AtomicU64,
}

impl LoopMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次发送失败，返回累计失败次数
    pub fn record_dispatch_failure(&self) -> u64 {
        self.dispatch_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn snapshot(&self) -> LoopMetricsSnapshot {
        LoopMetricsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            dispatch_failures: self.dispatch_failures.load(Ordering::Relaxed),
            time_jumps: self.time_jumps.load(Ordering::Relaxed),
            dropped_events: self.dropped_events.load(Ordering::Relaxed),
        }
    }
}

/// 指标快照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopMetricsSnapshot {
    pub ticks: u64,
    pub dispatch_failures: u64,
    pub time_jumps: u64,
    pub dropped_events: u64,
}
