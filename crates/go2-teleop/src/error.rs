//! 遥操作错误类型定义

use thiserror::Error;

/// 遥操作错误类型
///
/// 只覆盖启动和线程管理阶段的失败。运行期的按键读取失败和指令发送失败
/// 不会上升为错误：前者按"无按键"处理，后者只计数并记录日志。
#[derive(Error, Debug)]
pub enum TeleopError {
    /// 配置参数非法（周期为零等）
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 终端模式切换或恢复失败
    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),

    /// 控制线程创建失败
    #[error("Failed to spawn control thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// 控制线程 panic
    #[error("Control thread panicked")]
    ControlThreadPanicked,

    /// 运动客户端正被另一个 `run()` 持有
    #[error("Teleop is already running")]
    AlreadyRunning,
}
