//! 动作计时器与停止计时器
//!
//! 两个计时器都由控制循环每个周期推进一次，时间单位统一为 [`Duration`]，
//! 避免浮点累加误差（200 次 5ms 恰好等于 1s）。

use std::time::Duration;

/// 一次性动作计时器 (elapsed, duration)
///
/// `duration` 为零表示未启用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionTimer {
    elapsed: Duration,
    duration: Duration,
}

impl ActionTimer {
    /// 未启用的计时器
    pub const fn disarmed() -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// 以指定时长重新启动（时长为零等价于 `clear()`）
    pub fn arm(&mut self, duration: Duration) {
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    pub fn clear(&mut self) {
        *self = Self::disarmed();
    }

    pub fn is_armed(&self) -> bool {
        !self.duration.is_zero()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// 剩余时间（未启用时为零）
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// 推进计时器
    ///
    /// 本次推进使 `elapsed` 达到 `duration` 时返回 `true`，并清除计时器。
    pub fn advance(&mut self, dt: Duration) -> bool {
        if !self.is_armed() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.duration {
            self.clear();
            true
        } else {
            false
        }
    }
}

/// 移动自动停止计时器
///
/// 每次移动按键事件都重新装填；倒计时归零时触发一次自动停止。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveStopTimer {
    remaining: Option<Duration>,
}

impl MoveStopTimer {
    pub const fn disarmed() -> Self {
        Self { remaining: None }
    }

    /// 重新装填为完整窗口
    pub fn arm(&mut self, window: Duration) {
        self.remaining = Some(window);
    }

    pub fn disarm(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// 剩余时间（未启用时为 `None`）
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// 推进计时器，归零时返回 `true` 并解除
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let left = remaining.saturating_sub(dt);
        if left.is_zero() {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }
}
