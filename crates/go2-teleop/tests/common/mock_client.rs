//! Mock 运动服务
//!
//! 记录每一次调用，可选择让所有调用失败。

use std::io;
use std::sync::Arc;

use go2_teleop::{MotionCommand, SportClient, Velocity};
use parking_lot::Mutex;

/// 记录调用的运动客户端
#[derive(Debug, Clone, Default)]
pub struct RecordingClient {
    calls: Arc<Mutex<Vec<MotionCommand>>>,
    fail: bool,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次调用都记录后返回错误
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// 共享的调用记录（客户端被移入控制线程后仍可读取）
    pub fn log(&self) -> Arc<Mutex<Vec<MotionCommand>>> {
        self.calls.clone()
    }

    pub fn calls(&self) -> Vec<MotionCommand> {
        self.calls.lock().clone()
    }

    fn record(&mut self, command: MotionCommand) -> io::Result<()> {
        self.calls.lock().push(command);
        if self.fail {
            Err(io::Error::new(io::ErrorKind::TimedOut, "sport service timeout"))
        } else {
            Ok(())
        }
    }
}

impl SportClient for RecordingClient {
    type Error = io::Error;

    fn stop_move(&mut self) -> io::Result<()> {
        self.record(MotionCommand::StopMove)
    }

    fn stand_up(&mut self) -> io::Result<()> {
        self.record(MotionCommand::StandUp)
    }

    fn stand_down(&mut self) -> io::Result<()> {
        self.record(MotionCommand::StandDown)
    }

    fn balance_stand(&mut self) -> io::Result<()> {
        self.record(MotionCommand::BalanceStand)
    }

    fn sit(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Sit)
    }

    fn damp(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Damp)
    }

    fn recovery_stand(&mut self) -> io::Result<()> {
        self.record(MotionCommand::RecoveryStand)
    }

    fn move_velocity(&mut self, vx: f64, vy: f64, vyaw: f64) -> io::Result<()> {
        self.record(MotionCommand::Move(Velocity::new(vx, vy, vyaw)))
    }

    fn hello(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Hello)
    }

    fn stretch(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Stretch)
    }

    fn content(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Content)
    }

    fn heart(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Heart)
    }

    fn scrape(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Scrape)
    }

    fn dance1(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Dance1)
    }

    fn dance2(&mut self) -> io::Result<()> {
        self.record(MotionCommand::Dance2)
    }

    fn front_jump(&mut self) -> io::Result<()> {
        self.record(MotionCommand::FrontJump)
    }

    fn front_pounce(&mut self) -> io::Result<()> {
        self.record(MotionCommand::FrontPounce)
    }

    fn front_flip(&mut self) -> io::Result<()> {
        self.record(MotionCommand::FrontFlip)
    }

    fn back_flip(&mut self) -> io::Result<()> {
        self.record(MotionCommand::BackFlip)
    }

    fn left_flip(&mut self) -> io::Result<()> {
        self.record(MotionCommand::LeftFlip)
    }

    fn classic_walk(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::ClassicWalk(enable))
    }

    fn free_walk(&mut self) -> io::Result<()> {
        self.record(MotionCommand::FreeWalk)
    }

    fn free_bound(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::FreeBound(enable))
    }

    fn free_jump(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::FreeJump(enable))
    }

    fn free_avoid(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::FreeAvoid(enable))
    }

    fn walk_upright(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::WalkUpright(enable))
    }

    fn cross_step(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::CrossStep(enable))
    }

    fn static_walk(&mut self) -> io::Result<()> {
        self.record(MotionCommand::StaticWalk)
    }

    fn trot_run(&mut self) -> io::Result<()> {
        self.record(MotionCommand::TrotRun)
    }

    fn pose(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::Pose(enable))
    }

    fn hand_stand(&mut self, enable: bool) -> io::Result<()> {
        self.record(MotionCommand::HandStand(enable))
    }
}
