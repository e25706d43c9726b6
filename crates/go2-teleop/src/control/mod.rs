//! 控制循环模块
//!
//! - [`loop_runner`]: 固定周期驱动，`tick()` → `emit_directive()` → `dispatch()`
//! - [`metrics`]: 控制循环原子计数器

pub mod loop_runner;
pub mod metrics;

pub use loop_runner::{
    ControlShared, FAILURE_LOG_INTERVAL, LoopConfig, MAX_PERIOD, SharedMachine, run_control_loop,
};
pub use metrics::{LoopMetrics, LoopMetricsSnapshot};
