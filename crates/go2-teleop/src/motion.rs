//! 运动指令与运动能力接口
//!
//! - [`Velocity`]: 速度设定值 (vx, vy, vyaw)
//! - [`MotionCommand`]: 与 [`SportClient`] 方法一一对应的指令描述
//! - [`Directive`]: 单个控制周期内要发出的指令（步态调用 + 可选的移动调用）
//! - [`dispatch`]: 把 `Directive` 翻译成对 `SportClient` 的调用
//!
//! `SportClient` 的具体实现（DDS/RPC 传输、超时处理）不在本 crate 内。

use std::fmt;

use tracing::trace;

use crate::mode::{Mode, SubFlags};

/// 速度设定值
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    /// 前向速度（m/s）
    pub vx: f64,
    /// 侧向速度（m/s，左为正）
    pub vy: f64,
    /// 偏航角速度（rad/s，左转为正）
    pub vyaw: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity::new(0.0, 0.0, 0.0);

    pub const fn new(vx: f64, vy: f64, vyaw: f64) -> Self {
        Self { vx, vy, vyaw }
    }

    pub fn is_zero(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0 && self.vyaw == 0.0
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vx={} vy={} vyaw={}", self.vx, self.vy, self.vyaw)
    }
}

/// 运动指令
///
/// 每个变体对应 [`SportClient`] 的一个方法。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionCommand {
    StopMove,
    StandUp,
    StandDown,
    BalanceStand,
    Sit,
    Damp,
    RecoveryStand,
    Move(Velocity),
    Hello,
    Stretch,
    Content,
    Heart,
    Scrape,
    Dance1,
    Dance2,
    FrontJump,
    FrontPounce,
    FrontFlip,
    BackFlip,
    LeftFlip,
    ClassicWalk(bool),
    FreeWalk,
    FreeBound(bool),
    FreeJump(bool),
    FreeAvoid(bool),
    WalkUpright(bool),
    CrossStep(bool),
    StaticWalk,
    TrotRun,
    Pose(bool),
    HandStand(bool),
}

impl MotionCommand {
    /// 模式对应的主指令
    ///
    /// `Walk` 在速度为零时发送 `StopMove`，避免每个周期都发送零速度移动指令。
    pub fn for_mode(mode: Mode, velocity: Velocity, flags: SubFlags) -> Self {
        match mode {
            Mode::Idle => MotionCommand::StopMove,
            Mode::Stand => MotionCommand::StandUp,
            Mode::StandDown => MotionCommand::StandDown,
            Mode::BalanceStand => MotionCommand::BalanceStand,
            Mode::Walk if velocity.is_zero() => MotionCommand::StopMove,
            Mode::Walk => MotionCommand::Move(velocity),
            Mode::Sit => MotionCommand::Sit,
            Mode::Damping => MotionCommand::Damp,
            Mode::Recovery => MotionCommand::RecoveryStand,
            Mode::Hello => MotionCommand::Hello,
            Mode::Stretch => MotionCommand::Stretch,
            Mode::Content => MotionCommand::Content,
            Mode::Heart => MotionCommand::Heart,
            Mode::Scrape => MotionCommand::Scrape,
            Mode::Dance1 => MotionCommand::Dance1,
            Mode::Dance2 => MotionCommand::Dance2,
            Mode::FrontJump => MotionCommand::FrontJump,
            Mode::FrontPounce => MotionCommand::FrontPounce,
            Mode::FrontFlip => MotionCommand::FrontFlip,
            Mode::BackFlip => MotionCommand::BackFlip,
            Mode::LeftFlip => MotionCommand::LeftFlip,
            Mode::ClassicWalk => MotionCommand::ClassicWalk(true),
            Mode::FreeWalk => MotionCommand::FreeWalk,
            Mode::FreeBound => MotionCommand::FreeBound(true),
            Mode::FreeJump => MotionCommand::FreeJump(true),
            Mode::FreeAvoid => MotionCommand::FreeAvoid(true),
            Mode::WalkUpright => MotionCommand::WalkUpright(true),
            Mode::CrossStep => MotionCommand::CrossStep(true),
            Mode::StaticWalk => MotionCommand::StaticWalk,
            Mode::TrotRun => MotionCommand::TrotRun,
            Mode::Pose => MotionCommand::Pose(flags.pose),
            Mode::HandStand => MotionCommand::HandStand(flags.hand_stand),
        }
    }

    /// 指令名称（日志用）
    pub fn name(&self) -> &'static str {
        match self {
            MotionCommand::StopMove => "stop_move",
            MotionCommand::StandUp => "stand_up",
            MotionCommand::StandDown => "stand_down",
            MotionCommand::BalanceStand => "balance_stand",
            MotionCommand::Sit => "sit",
            MotionCommand::Damp => "damp",
            MotionCommand::RecoveryStand => "recovery_stand",
            MotionCommand::Move(_) => "move",
            MotionCommand::Hello => "hello",
            MotionCommand::Stretch => "stretch",
            MotionCommand::Content => "content",
            MotionCommand::Heart => "heart",
            MotionCommand::Scrape => "scrape",
            MotionCommand::Dance1 => "dance1",
            MotionCommand::Dance2 => "dance2",
            MotionCommand::FrontJump => "front_jump",
            MotionCommand::FrontPounce => "front_pounce",
            MotionCommand::FrontFlip => "front_flip",
            MotionCommand::BackFlip => "back_flip",
            MotionCommand::LeftFlip => "left_flip",
            MotionCommand::ClassicWalk(_) => "classic_walk",
            MotionCommand::FreeWalk => "free_walk",
            MotionCommand::FreeBound(_) => "free_bound",
            MotionCommand::FreeJump(_) => "free_jump",
            MotionCommand::FreeAvoid(_) => "free_avoid",
            MotionCommand::WalkUpright(_) => "walk_upright",
            MotionCommand::CrossStep(_) => "cross_step",
            MotionCommand::StaticWalk => "static_walk",
            MotionCommand::TrotRun => "trot_run",
            MotionCommand::Pose(_) => "pose",
            MotionCommand::HandStand(_) => "hand_stand",
        }
    }
}

/// 单个控制周期的输出
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directive {
    /// 产生该指令的模式
    pub mode: Mode,
    /// 主指令
    pub command: MotionCommand,
    /// 同一周期内追加的移动指令（仅可移动步态且速度非零）
    pub movement: Option<Velocity>,
}

impl Directive {
    /// 当前状态到指令的纯投影
    pub fn project(mode: Mode, velocity: Velocity, flags: SubFlags) -> Self {
        let command = MotionCommand::for_mode(mode, velocity, flags);
        let movement = match command {
            // Walk 的主指令本身就是移动指令
            MotionCommand::Move(_) | MotionCommand::StopMove => None,
            _ if mode.is_movable() && !velocity.is_zero() => Some(velocity),
            _ => None,
        };
        Self {
            mode,
            command,
            movement,
        }
    }
}

/// 运动能力接口
///
/// 每个方法对应一条高层运动服务调用。所有调用都是 fire-and-forget，
/// 超时和失败处理由实现方负责；控制循环不会重试失败的调用。
pub trait SportClient {
    /// 调用失败时的错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    fn stop_move(&mut self) -> Result<(), Self::Error>;
    fn stand_up(&mut self) -> Result<(), Self::Error>;
    fn stand_down(&mut self) -> Result<(), Self::Error>;
    fn balance_stand(&mut self) -> Result<(), Self::Error>;
    fn sit(&mut self) -> Result<(), Self::Error>;
    fn damp(&mut self) -> Result<(), Self::Error>;
    fn recovery_stand(&mut self) -> Result<(), Self::Error>;
    fn move_velocity(&mut self, vx: f64, vy: f64, vyaw: f64) -> Result<(), Self::Error>;

    fn hello(&mut self) -> Result<(), Self::Error>;
    fn stretch(&mut self) -> Result<(), Self::Error>;
    fn content(&mut self) -> Result<(), Self::Error>;
    fn heart(&mut self) -> Result<(), Self::Error>;
    fn scrape(&mut self) -> Result<(), Self::Error>;
    fn dance1(&mut self) -> Result<(), Self::Error>;
    fn dance2(&mut self) -> Result<(), Self::Error>;
    fn front_jump(&mut self) -> Result<(), Self::Error>;
    fn front_pounce(&mut self) -> Result<(), Self::Error>;
    fn front_flip(&mut self) -> Result<(), Self::Error>;
    fn back_flip(&mut self) -> Result<(), Self::Error>;
    fn left_flip(&mut self) -> Result<(), Self::Error>;

    fn classic_walk(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn free_walk(&mut self) -> Result<(), Self::Error>;
    fn free_bound(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn free_jump(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn free_avoid(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn walk_upright(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn cross_step(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn static_walk(&mut self) -> Result<(), Self::Error>;
    fn trot_run(&mut self) -> Result<(), Self::Error>;
    fn pose(&mut self, enable: bool) -> Result<(), Self::Error>;
    fn hand_stand(&mut self, enable: bool) -> Result<(), Self::Error>;
}

/// 发出单条指令
pub fn issue<C: SportClient + ?Sized>(
    client: &mut C,
    command: MotionCommand,
) -> Result<(), C::Error> {
    trace!(command = command.name(), "issue");
    match command {
        MotionCommand::StopMove => client.stop_move(),
        MotionCommand::StandUp => client.stand_up(),
        MotionCommand::StandDown => client.stand_down(),
        MotionCommand::BalanceStand => client.balance_stand(),
        MotionCommand::Sit => client.sit(),
        MotionCommand::Damp => client.damp(),
        MotionCommand::RecoveryStand => client.recovery_stand(),
        MotionCommand::Move(v) => client.move_velocity(v.vx, v.vy, v.vyaw),
        MotionCommand::Hello => client.hello(),
        MotionCommand::Stretch => client.stretch(),
        MotionCommand::Content => client.content(),
        MotionCommand::Heart => client.heart(),
        MotionCommand::Scrape => client.scrape(),
        MotionCommand::Dance1 => client.dance1(),
        MotionCommand::Dance2 => client.dance2(),
        MotionCommand::FrontJump => client.front_jump(),
        MotionCommand::FrontPounce => client.front_pounce(),
        MotionCommand::FrontFlip => client.front_flip(),
        MotionCommand::BackFlip => client.back_flip(),
        MotionCommand::LeftFlip => client.left_flip(),
        MotionCommand::ClassicWalk(on) => client.classic_walk(on),
        MotionCommand::FreeWalk => client.free_walk(),
        MotionCommand::FreeBound(on) => client.free_bound(on),
        MotionCommand::FreeJump(on) => client.free_jump(on),
        MotionCommand::FreeAvoid(on) => client.free_avoid(on),
        MotionCommand::WalkUpright(on) => client.walk_upright(on),
        MotionCommand::CrossStep(on) => client.cross_step(on),
        MotionCommand::StaticWalk => client.static_walk(),
        MotionCommand::TrotRun => client.trot_run(),
        MotionCommand::Pose(on) => client.pose(on),
        MotionCommand::HandStand(on) => client.hand_stand(on),
    }
}

/// 把一个周期的 `Directive` 发给运动服务
///
/// 主指令失败时仍会尝试追加的移动指令；返回第一个错误。
pub fn dispatch<C: SportClient + ?Sized>(
    client: &mut C,
    directive: &Directive,
) -> Result<(), C::Error> {
    let primary = issue(client, directive.command);
    let movement = match directive.movement {
        Some(v) => issue(client, MotionCommand::Move(v)),
        None => Ok(()),
    };
    primary.and(movement)
}
