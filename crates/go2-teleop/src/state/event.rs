//! 状态机输出的日志事件

use std::fmt;

use smallvec::SmallVec;

use crate::keymap::{Menu, MoveDirection};
use crate::mode::{Mode, SubFlag};
use crate::motion::Velocity;

/// 单次 `handle_key()` / `tick()` 产生的事件列表
pub type Events = SmallVec<[TeleopEvent; 4]>;

/// 状态机事件
///
/// 事件只用于展示和日志，状态变更已经在产生事件之前完成。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TeleopEvent {
    /// 请求显示帮助
    HelpRequested { menu: Menu },
    /// 请求退出
    ExitRequested,
    /// 菜单切换
    MenuChanged { from: Menu, to: Menu },
    /// 按键进入模式
    ModeEntered { mode: Mode, previous: Mode },
    /// 子开关翻转
    SubFlagToggled { flag: SubFlag, enabled: bool },
    /// 移动按键把非可移动模式切换到 Walk
    WalkEngaged { previous: Mode },
    /// 新的移动按键按下
    VelocitySet {
        direction: MoveDirection,
        velocity: Velocity,
    },
    /// 手动停止移动
    MovementStopped,
    /// 定时动作结束，回到 Idle
    ActionFinished { mode: Mode },
    /// 停止计时器归零，速度清零
    AutoStopped,
}

impl TeleopEvent {
    /// 是否为退出请求
    pub fn is_exit(&self) -> bool {
        matches!(self, TeleopEvent::ExitRequested)
    }
}

impl fmt::Display for TeleopEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeleopEvent::HelpRequested { menu } => write!(f, ">> Help ({menu} menu)"),
            TeleopEvent::ExitRequested => write!(f, ">> Exiting..."),
            TeleopEvent::MenuChanged { to, .. } => write!(f, ">> Switched to {to} menu"),
            TeleopEvent::ModeEntered { mode, .. } => {
                write!(f, ">> Executing: {}", mode.label())
            },
            TeleopEvent::SubFlagToggled { flag, enabled } => {
                let state = if *enabled { "enabled" } else { "disabled" };
                write!(f, ">> {flag} {state}")
            },
            TeleopEvent::WalkEngaged { .. } => write!(f, ">> Switched to Walk Mode"),
            TeleopEvent::VelocitySet {
                direction,
                velocity,
            } => write!(f, ">> {} ({velocity})", direction.label()),
            TeleopEvent::MovementStopped => write!(f, ">> Stopping Movement"),
            TeleopEvent::ActionFinished { mode } => {
                write!(f, ">> {} finished, back to {}", mode.label(), Mode::Idle)
            },
            TeleopEvent::AutoStopped => write!(f, ">> Movement auto-stopped"),
        }
    }
}
