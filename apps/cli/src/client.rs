//! 日志运动客户端
//!
//! 没有链接真实传输层时使用：每次调用写入 tracing 日志，从不失败。
//! 控制循环每 5ms 调用一次，只在指令变化时输出 debug 日志。

use std::convert::Infallible;

use go2_teleop::{MotionCommand, SportClient, Velocity};
use tracing::{debug, trace};

/// 把运动指令写入日志的客户端
#[derive(Debug)]
pub struct TracingSportClient {
    interface: String,
    last: Option<MotionCommand>,
    calls: u64,
}

impl TracingSportClient {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            last: None,
            calls: 0,
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }

    fn send(&mut self, command: MotionCommand) -> Result<(), Infallible> {
        self.calls += 1;
        trace!(interface = %self.interface, command = command.name(), "sport request");
        if self.last != Some(command) {
            debug!(interface = %self.interface, ?command, "sport command changed");
            self.last = Some(command);
        }
        Ok(())
    }
}

impl SportClient for TracingSportClient {
    type Error = Infallible;

    fn stop_move(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::StopMove)
    }

    fn stand_up(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::StandUp)
    }

    fn stand_down(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::StandDown)
    }

    fn balance_stand(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::BalanceStand)
    }

    fn sit(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Sit)
    }

    fn damp(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Damp)
    }

    fn recovery_stand(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::RecoveryStand)
    }

    fn move_velocity(&mut self, vx: f64, vy: f64, vyaw: f64) -> Result<(), Infallible> {
        self.send(MotionCommand::Move(Velocity::new(vx, vy, vyaw)))
    }

    fn hello(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Hello)
    }

    fn stretch(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Stretch)
    }

    fn content(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Content)
    }

    fn heart(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Heart)
    }

    fn scrape(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Scrape)
    }

    fn dance1(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Dance1)
    }

    fn dance2(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::Dance2)
    }

    fn front_jump(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::FrontJump)
    }

    fn front_pounce(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::FrontPounce)
    }

    fn front_flip(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::FrontFlip)
    }

    fn back_flip(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::BackFlip)
    }

    fn left_flip(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::LeftFlip)
    }

    fn classic_walk(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::ClassicWalk(enable))
    }

    fn free_walk(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::FreeWalk)
    }

    fn free_bound(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::FreeBound(enable))
    }

    fn free_jump(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::FreeJump(enable))
    }

    fn free_avoid(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::FreeAvoid(enable))
    }

    fn walk_upright(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::WalkUpright(enable))
    }

    fn cross_step(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::CrossStep(enable))
    }

    fn static_walk(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::StaticWalk)
    }

    fn trot_run(&mut self) -> Result<(), Infallible> {
        self.send(MotionCommand::TrotRun)
    }

    fn pose(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::Pose(enable))
    }

    fn hand_stand(&mut self, enable: bool) -> Result<(), Infallible> {
        self.send(MotionCommand::HandStand(enable))
    }
}
