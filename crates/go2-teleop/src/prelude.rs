//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use go2_teleop::prelude::*;
//! ```

// 外壳
pub use crate::config::TeleopConfig;
pub use crate::teleop::{StopHandle, Teleop, TeleopListener};

// 输入
pub use crate::input::{Key, KeyReader};
pub use crate::terminal::RawTerminal;

// 状态
pub use crate::keymap::Menu;
pub use crate::mode::Mode;
pub use crate::state::{TeleopEvent, TeleopStatus};

// 运动服务
pub use crate::motion::{MotionCommand, SportClient, Velocity};
pub use crate::telemetry::{SportModeState, TelemetryMailbox};

// 错误类型
pub use crate::error::TeleopError;
