//! 遥操作状态
//!
//! - [`machine`]: 模式/菜单状态机
//! - [`timer`]: 动作计时器与停止计时器
//! - [`event`]: 状态机输出的日志事件

pub mod event;
pub mod machine;
pub mod timer;

pub use event::{Events, TeleopEvent};
pub use machine::{DEFAULT_MOVE_STOP_WINDOW, TeleopMachine, TeleopStatus};
pub use timer::{ActionTimer, MoveStopTimer};
