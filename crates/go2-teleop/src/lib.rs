//! GO2 Teleop - 四足机器人键盘遥操作
//!
//! 把终端按键转换为 GO2 高层运动服务调用：按键经菜单映射表改变状态机，
//! 控制线程以固定周期（默认 5ms）把状态投影为一条指令并发送。
//!
//! # 分层
//!
//! - **输入层** (`input`, `terminal`): 原始终端模式、ESC-[ 方向键解码
//! - **状态层** (`keymap`, `mode`, `state`): 静态按键表、模式表、状态机与计时器
//! - **控制层** (`control`, `motion`): 固定周期循环、指令投影与发送
//! - **外壳** (`teleop`): 组装输入线程和控制线程，提供 initialize/run/stop
//!
//! 运动服务通过 [`SportClient`] trait 注入，具体传输层不在本 crate 内。
//!
//! ```rust,ignore
//! use go2_teleop::prelude::*;
//!
//! let mut teleop = Teleop::new(client, KeyReader::new(std::io::stdin()), TeleopConfig::default())?;
//! teleop.initialize();
//! teleop.run()?;
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod keymap;
pub mod mode;
pub mod motion;
pub mod state;
pub mod telemetry;
pub mod teleop;
pub mod terminal;

pub mod prelude;

pub use config::TeleopConfig;
pub use error::TeleopError;
pub use input::{Key, KeyReader};
pub use keymap::{KeyAction, Menu, MoveDirection};
pub use mode::{Mode, SubFlag, SubFlags};
pub use motion::{Directive, MotionCommand, SportClient, Velocity};
pub use state::{TeleopEvent, TeleopMachine, TeleopStatus};
pub use telemetry::{SportModeState, TelemetryMailbox};
pub use teleop::{StopHandle, Teleop, TeleopListener, TracingListener};
pub use terminal::RawTerminal;
