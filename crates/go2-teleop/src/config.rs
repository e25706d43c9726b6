//! 遥操作配置

use std::time::Duration;

use crate::control::{LoopConfig, MAX_PERIOD};
use crate::error::TeleopError;
use crate::state::DEFAULT_MOVE_STOP_WINDOW;

/// 遥操作配置
///
/// 没有配置文件，CLI 参数直接覆盖这里的默认值。
/// 两个周期都必须在 (0, [`MAX_PERIOD`]] 之内，否则退出键要等一个周期才生效。
#[derive(Debug, Clone)]
pub struct TeleopConfig {
    /// 控制周期（默认 5ms）
    pub tick_period: Duration,
    /// 按键轮询周期（默认 10ms）
    pub poll_period: Duration,
    /// 移动停止窗口（默认 500ms）
    pub move_stop_window: Duration,
    /// dt 钳位倍数（默认 2.0）
    pub dt_clamp_multiplier: f64,
    /// 控制线程到输入线程的事件通道容量
    pub event_capacity: usize,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(5),
            poll_period: Duration::from_millis(10),
            move_stop_window: DEFAULT_MOVE_STOP_WINDOW,
            dt_clamp_multiplier: 2.0,
            event_capacity: 64,
        }
    }
}

impl TeleopConfig {
    pub fn validate(&self) -> Result<(), TeleopError> {
        self.loop_config().validate()?;
        if self.poll_period.is_zero() {
            return Err(TeleopError::InvalidConfig(
                "poll_period must be > 0".to_string(),
            ));
        }
        if self.poll_period > MAX_PERIOD {
            return Err(TeleopError::InvalidConfig(format!(
                "poll_period {:?} exceeds {:?}",
                self.poll_period, MAX_PERIOD
            )));
        }
        if self.move_stop_window.is_zero() {
            return Err(TeleopError::InvalidConfig(
                "move_stop_window must be > 0".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(TeleopError::InvalidConfig(
                "event_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 控制线程的循环配置
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            period: self.tick_period,
            dt_clamp_multiplier: self.dt_clamp_multiplier,
            max_iterations: None,
        }
    }
}
