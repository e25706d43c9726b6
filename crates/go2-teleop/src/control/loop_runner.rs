//! Loop Runner - 固定周期控制循环
//!
//! 每个周期：
//!
//! 1. 计算实际 dt，超过 `dt_clamp_multiplier` 倍周期时记录时间跳变并钳位
//! 2. 持锁调用 `tick(dt)` 和 `emit_directive()`
//! 3. 把计时器事件转发到事件通道（满了就丢弃）
//! 4. 释放锁后把指令发给运动服务；失败只计数和记录日志，不重试
//! 5. 使用 `spin_sleep` 休眠到下一个周期
//!
//! 停止标志在每个周期开始时检查，调用方 join 控制线程即可保证退出。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use spin_sleep::SpinSleeper;
use tracing::{info, trace, warn};

use super::metrics::LoopMetrics;
use crate::error::TeleopError;
use crate::motion::{SportClient, dispatch};
use crate::state::{TeleopEvent, TeleopMachine, TeleopStatus};

/// 首次失败之后每隔多少次失败再记录一条日志
pub const FAILURE_LOG_INTERVAL: u64 = 200;

/// 周期上限
///
/// 控制线程在一个周期的休眠结束后才检查停止标志，周期过长会拖慢退出。
pub const MAX_PERIOD: Duration = Duration::from_secs(1);

/// 在输入线程和控制线程之间共享的状态机
pub type SharedMachine = Arc<Mutex<TeleopMachine>>;

/// 控制循环配置
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// 控制周期
    pub period: Duration,

    /// dt 钳位倍数
    ///
    /// 实际 dt 超过 `period * dt_clamp_multiplier` 时钳位，避免线程被挂起后
    /// 计时器一次跳过整个动作。
    pub dt_clamp_multiplier: f64,

    /// 最大迭代次数（None 表示直到停止标志被设置）
    pub max_iterations: Option<usize>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            period: Duration::from_millis(5), // 200Hz
            dt_clamp_multiplier: 2.0,
            max_iterations: None,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<(), TeleopError> {
        if self.period.is_zero() {
            return Err(TeleopError::InvalidConfig(
                "control period must be > 0".to_string(),
            ));
        }
        if self.period > MAX_PERIOD {
            return Err(TeleopError::InvalidConfig(format!(
                "control period {:?} exceeds {:?}",
                self.period, MAX_PERIOD
            )));
        }
        if !self.dt_clamp_multiplier.is_finite() || self.dt_clamp_multiplier < 1.0 {
            return Err(TeleopError::InvalidConfig(format!(
                "Invalid dt_clamp_multiplier: {} (must be finite and >= 1)",
                self.dt_clamp_multiplier
            )));
        }
        self.max_dt()?;
        if self.period < Duration::from_micros(100) {
            warn!(
                "Very short control period: {:?}. This may cause performance issues.",
                self.period
            );
        }
        Ok(())
    }

    /// dt 钳位上限 `period * dt_clamp_multiplier`
    ///
    /// 乘积无法表示为 `Duration` 时返回 [`TeleopError::InvalidConfig`]。
    pub fn max_dt(&self) -> Result<Duration, TeleopError> {
        Duration::try_from_secs_f64(self.period.as_secs_f64() * self.dt_clamp_multiplier).map_err(
            |e| {
                TeleopError::InvalidConfig(format!(
                    "dt clamp {:?} * {} out of range: {e}",
                    self.period, self.dt_clamp_multiplier
                ))
            },
        )
    }
}

/// 控制线程需要的共享句柄
#[derive(Clone)]
pub struct ControlShared {
    pub machine: SharedMachine,
    pub stop: Arc<AtomicBool>,
    pub metrics: Arc<LoopMetrics>,
    /// 计时器事件和事件产生时的状态快照
    pub events: Sender<(TeleopEvent, TeleopStatus)>,
}

/// 运行控制循环（阻塞）
///
/// 返回条件：停止标志被设置，或达到 `max_iterations`。
pub fn run_control_loop<C>(
    shared: &ControlShared,
    client: &mut C,
    config: &LoopConfig,
) -> Result<(), TeleopError>
where
    C: SportClient + ?Sized,
{
    config.validate()?;

    let period = config.period;
    let max_dt = config.max_dt()?;
    let sleeper = SpinSleeper::default();

    let mut last_time = Instant::now();
    let mut deadline = last_time;
    let mut iteration = 0usize;

    info!(period_us = period.as_micros() as u64, "control loop started");

    loop {
        if shared.stop.load(Ordering::Acquire) {
            break;
        }
        if let Some(max_iter) = config.max_iterations {
            if iteration >= max_iter {
                break;
            }
        }

        // 1. 计算 dt
        let now = Instant::now();
        let real_dt = now - last_time;
        let mut dt = real_dt;
        if real_dt > max_dt {
            shared.metrics.time_jumps.fetch_add(1, Ordering::Relaxed);
            warn!(
                real_dt_us = real_dt.as_micros() as u64,
                "control loop time jump, clamping dt"
            );
            dt = max_dt;
        }
        last_time = now;

        // 2. 推进计时器并生成指令（持锁时间只覆盖纯内存操作）
        let (directive, events, status) = {
            let mut machine = shared.machine.lock();
            let events = machine.tick(dt);
            (machine.emit_directive(), events, machine.status())
        };

        // 3. 转发事件（附带本周期的状态快照）
        for event in events {
            if shared.events.try_send((event, status)).is_err() {
                shared.metrics.dropped_events.fetch_add(1, Ordering::Relaxed);
                trace!(?event, "event channel unavailable, event dropped");
            }
        }

        // 4. 发送指令
        if let Err(e) = dispatch(client, &directive) {
            let failures = shared.metrics.record_dispatch_failure();
            if failures == 1 || failures % FAILURE_LOG_INTERVAL == 0 {
                warn!(
                    error = %e,
                    command = directive.command.name(),
                    failures,
                    "directive send failed"
                );
            }
        }

        shared.metrics.ticks.fetch_add(1, Ordering::Relaxed);
        iteration += 1;

        // 5. 休眠到下一个周期；落后时以当前时间重新对齐
        deadline += period;
        let now = Instant::now();
        if deadline > now {
            sleeper.sleep(deadline - now);
        } else {
            deadline = now;
        }
    }

    info!(
        ticks = shared.metrics.ticks.load(Ordering::Relaxed),
        "control loop stopped"
    );
    Ok(())
}
