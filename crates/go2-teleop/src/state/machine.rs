//! 模式/菜单状态机
//!
//! [`TeleopMachine`] 持有菜单、模式、速度设定值、两个计时器、最近一次移动按键和子开关。
//!
//! - `handle_key()`: 应用一个逻辑按键（输入线程调用）
//! - `tick()`: 推进计时器（控制线程每周期调用一次）
//! - `emit_directive()`: 当前状态到单条指令的纯投影
//!
//! # 不变量
//!
//! - 非可移动模式下速度设定值恒为零
//! - 动作计时器只在定时模式下启用
//! - 菜单切换不改变模式、速度和计时器
//!
//! # 按住按键
//!
//! 终端不提供按键抬起事件，按住按键时只会重复收到同一个字符。
//! 状态机用"最近一次移动按键"区分新按下与重复，并在每次移动事件时重新装填
//! 停止计时器；重复停止后计时器归零即视为松开。

use std::time::Duration;

use tracing::{debug, info, trace};

use super::event::{Events, TeleopEvent};
use super::timer::{ActionTimer, MoveStopTimer};
use crate::input::Key;
use crate::keymap::{self, KeyAction, Menu, MoveDirection};
use crate::mode::{Mode, SubFlags};
use crate::motion::{Directive, Velocity};

/// 默认停止窗口
pub const DEFAULT_MOVE_STOP_WINDOW: Duration = Duration::from_millis(500);

/// 遥操作状态机
#[derive(Debug, Clone)]
pub struct TeleopMachine {
    menu: Menu,
    mode: Mode,
    velocity: Velocity,
    action_timer: ActionTimer,
    move_stop: MoveStopTimer,
    move_stop_window: Duration,
    last_move_key: Option<Key>,
    flags: SubFlags,
}

/// 状态快照（用于显示）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleopStatus {
    pub menu: Menu,
    pub mode: Mode,
    pub velocity: Velocity,
    pub action_timer: ActionTimer,
    pub move_stop_remaining: Option<Duration>,
    pub last_move_key: Option<Key>,
    pub flags: SubFlags,
}

impl Default for TeleopMachine {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_STOP_WINDOW)
    }
}

impl TeleopMachine {
    /// 创建状态机（Main 菜单、Idle 模式、零速度）
    pub fn new(move_stop_window: Duration) -> Self {
        Self {
            menu: Menu::Main,
            mode: Mode::Idle,
            velocity: Velocity::ZERO,
            action_timer: ActionTimer::disarmed(),
            move_stop: MoveStopTimer::disarmed(),
            move_stop_window,
            last_move_key: None,
            flags: SubFlags::default(),
        }
    }

    pub fn menu(&self) -> Menu {
        self.menu
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn action_timer(&self) -> &ActionTimer {
        &self.action_timer
    }

    pub fn move_stop(&self) -> &MoveStopTimer {
        &self.move_stop
    }

    pub fn move_stop_window(&self) -> Duration {
        self.move_stop_window
    }

    pub fn last_move_key(&self) -> Option<Key> {
        self.last_move_key
    }

    pub fn flags(&self) -> SubFlags {
        self.flags
    }

    /// 状态快照
    pub fn status(&self) -> TeleopStatus {
        TeleopStatus {
            menu: self.menu,
            mode: self.mode,
            velocity: self.velocity,
            action_timer: self.action_timer,
            move_stop_remaining: self.move_stop.remaining(),
            last_move_key: self.last_move_key,
            flags: self.flags,
        }
    }

    /// 应用一个逻辑按键
    ///
    /// 全局按键优先于菜单按键；未映射的按键不改变任何状态。
    pub fn handle_key(&mut self, key: Key) -> Events {
        let mut events = Events::new();
        let Some(action) = keymap::lookup(self.menu, key) else {
            trace!(%key, menu = %self.menu, "unmapped key ignored");
            return events;
        };
        debug!(%key, menu = %self.menu, ?action, "key");

        match action {
            KeyAction::Help => events.push(TeleopEvent::HelpRequested { menu: self.menu }),
            KeyAction::Exit => events.push(TeleopEvent::ExitRequested),
            KeyAction::SwitchMenu(to) => {
                let from = self.menu;
                self.menu = to;
                events.push(TeleopEvent::MenuChanged { from, to });
            },
            KeyAction::Enter(mode) => self.enter_mode(mode, &mut events),
            KeyAction::Move(direction) => self.apply_movement(key, direction, &mut events),
            KeyAction::StopMovement => {
                self.velocity = Velocity::ZERO;
                self.forget_movement();
                events.push(TeleopEvent::MovementStopped);
            },
        }
        events
    }

    /// 推进计时器
    ///
    /// 动作计时器到期时回到 Idle；停止计时器归零时速度清零。
    pub fn tick(&mut self, dt: Duration) -> Events {
        let mut events = Events::new();

        if self.action_timer.advance(dt) {
            let finished = self.mode;
            self.mode = Mode::Idle;
            self.velocity = Velocity::ZERO;
            self.forget_movement();
            info!(mode = %finished, "action finished");
            events.push(TeleopEvent::ActionFinished { mode: finished });
        }

        if self.move_stop.advance(dt) {
            self.velocity = Velocity::ZERO;
            self.last_move_key = None;
            debug!(mode = %self.mode, "movement auto-stopped");
            events.push(TeleopEvent::AutoStopped);
        }

        events
    }

    /// 当前周期的输出指令
    pub fn emit_directive(&self) -> Directive {
        Directive::project(self.mode, self.velocity, self.flags)
    }

    fn enter_mode(&mut self, mode: Mode, events: &mut Events) {
        let previous = self.mode;

        if let Some(flag) = mode.toggle() {
            let enabled = self.flags.toggle(flag);
            events.push(TeleopEvent::SubFlagToggled { flag, enabled });
        }

        self.mode = mode;
        self.velocity = Velocity::ZERO;
        self.forget_movement();
        self.action_timer.arm(mode.action_duration());

        info!(%mode, %previous, timed = mode.is_timed(), "mode entered");
        events.push(TeleopEvent::ModeEntered { mode, previous });
    }

    fn apply_movement(&mut self, key: Key, direction: MoveDirection, events: &mut Events) {
        let is_new_press = self.last_move_key != Some(key);

        if is_new_press && !self.mode.is_movable() {
            let previous = self.mode;
            self.mode = Mode::Walk;
            self.action_timer.clear();
            info!(%previous, "switched to walk");
            events.push(TeleopEvent::WalkEngaged { previous });
        }

        // 重复按键不会切换模式；此时若模式不可移动，速度保持为零
        if self.mode.is_movable() {
            let velocity = direction.velocity();
            self.velocity = velocity;
            if is_new_press {
                events.push(TeleopEvent::VelocitySet {
                    direction,
                    velocity,
                });
            }
        }

        self.move_stop.arm(self.move_stop_window);
        self.last_move_key = Some(key);
    }

    fn forget_movement(&mut self) {
        self.move_stop.disarm();
        self.last_move_key = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::SubFlag;
    use crate::motion::MotionCommand;

    const DT: Duration = Duration::from_millis(5);

    fn press(machine: &mut TeleopMachine, c: char) -> Events {
        machine.handle_key(Key::Char(c))
    }

    fn run_ticks(machine: &mut TeleopMachine, n: usize) {
        for _ in 0..n {
            machine.tick(DT);
        }
    }

    #[test]
    fn test_initial_state() {
        let m = TeleopMachine::default();
        assert_eq!(m.menu(), Menu::Main);
        assert_eq!(m.mode(), Mode::Idle);
        assert_eq!(m.velocity(), Velocity::ZERO);
        assert!(!m.action_timer().is_armed());
        assert!(!m.move_stop().is_armed());
        assert_eq!(m.last_move_key(), None);
        assert_eq!(m.emit_directive().command, MotionCommand::StopMove);
    }

    #[test]
    fn test_stand_has_no_timer() {
        let mut m = TeleopMachine::default();
        let events = press(&mut m, '1');
        assert_eq!(m.mode(), Mode::Stand);
        assert_eq!(m.velocity(), Velocity::ZERO);
        assert!(!m.action_timer().is_armed());
        assert_eq!(
            events.as_slice(),
            &[TeleopEvent::ModeEntered {
                mode: Mode::Stand,
                previous: Mode::Idle
            }]
        );

        run_ticks(&mut m, 5000);
        assert_eq!(m.mode(), Mode::Stand);
    }

    #[test]
    fn test_walk_auto_stop_keeps_walk_mode() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'w');
        assert_eq!(m.mode(), Mode::Walk);
        assert_eq!(m.velocity(), MoveDirection::Forward.velocity());

        run_ticks(&mut m, 8);
        assert_eq!(m.velocity(), MoveDirection::Forward.velocity());

        run_ticks(&mut m, 91);
        assert!(!m.velocity().is_zero(), "window not yet elapsed");

        let events = m.tick(DT);
        assert_eq!(events.as_slice(), &[TeleopEvent::AutoStopped]);
        assert_eq!(m.velocity(), Velocity::ZERO);
        assert_eq!(m.last_move_key(), None);
        assert_eq!(m.mode(), Mode::Walk);
        assert_eq!(m.emit_directive().command, MotionCommand::StopMove);
    }

    #[test]
    fn test_front_flip_returns_to_idle() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'n');
        press(&mut m, 'f');
        assert_eq!(m.mode(), Mode::FrontFlip);
        assert_eq!(m.action_timer().duration(), Duration::from_secs(3));

        run_ticks(&mut m, 599);
        assert_eq!(m.mode(), Mode::FrontFlip);

        let events = m.tick(DT);
        assert_eq!(
            events.as_slice(),
            &[TeleopEvent::ActionFinished {
                mode: Mode::FrontFlip
            }]
        );
        assert_eq!(m.mode(), Mode::Idle);
        assert!(!m.action_timer().is_armed());
    }

    #[test]
    fn test_repeat_does_not_reengage_walk() {
        let mut m = TeleopMachine::default();
        let first = press(&mut m, 'w');
        assert!(first.contains(&TeleopEvent::WalkEngaged {
            previous: Mode::Idle
        }));

        let repeat = press(&mut m, 'w');
        assert!(repeat.is_empty(), "repeat should be silent: {repeat:?}");
        assert_eq!(m.mode(), Mode::Walk);
    }

    #[test]
    fn test_repeat_rearms_stop_timer() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'w');
        for _ in 0..10 {
            run_ticks(&mut m, 60);
            press(&mut m, 'w');
        }
        assert_eq!(m.velocity(), MoveDirection::Forward.velocity());
        assert_eq!(m.move_stop().remaining(), Some(DEFAULT_MOVE_STOP_WINDOW));
    }

    #[test]
    fn test_later_direction_overwrites() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'w');
        press(&mut m, 'a');
        assert_eq!(m.velocity(), Velocity::new(0.0, 0.0, 0.5));
        assert_eq!(m.last_move_key(), Some(Key::Char('a')));

        m.handle_key(Key::Right);
        assert_eq!(m.velocity(), Velocity::new(0.0, 0.0, -0.5));
        assert_eq!(m.last_move_key(), Some(Key::Right));
    }

    #[test]
    fn test_stop_key() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'w');
        let events = press(&mut m, 'x');
        assert_eq!(events.as_slice(), &[TeleopEvent::MovementStopped]);
        assert_eq!(m.velocity(), Velocity::ZERO);
        assert!(!m.move_stop().is_armed());
        assert_eq!(m.last_move_key(), None);
        assert_eq!(m.mode(), Mode::Walk);

        // 停止后再次按下同一个键视为新按下
        let events = press(&mut m, 'w');
        assert!(events.iter().any(|e| matches!(e, TeleopEvent::VelocitySet { .. })));
    }

    #[test]
    fn test_movement_interrupts_timed_action() {
        let mut m = TeleopMachine::default();
        press(&mut m, '3');
        assert_eq!(m.mode(), Mode::Sit);
        assert!(m.action_timer().is_armed());

        press(&mut m, 's');
        assert_eq!(m.mode(), Mode::Walk);
        assert!(!m.action_timer().is_armed());
        run_ticks(&mut m, 1000);
        assert_eq!(m.mode(), Mode::Walk);
    }

    #[test]
    fn test_entering_mode_clears_movement() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'w');
        press(&mut m, '1');
        assert_eq!(m.mode(), Mode::Stand);
        assert_eq!(m.velocity(), Velocity::ZERO);
        assert_eq!(m.last_move_key(), None);

        // 同一个键再次按下会重新进入 Walk
        press(&mut m, 'w');
        assert_eq!(m.mode(), Mode::Walk);
    }

    #[test]
    fn test_gait_menu_movement_keeps_gait() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'g');
        press(&mut m, '2');
        assert_eq!(m.mode(), Mode::FreeWalk);

        press(&mut m, 'w');
        assert_eq!(m.mode(), Mode::FreeWalk);
        let d = m.emit_directive();
        assert_eq!(d.command, MotionCommand::FreeWalk);
        assert_eq!(d.movement, Some(MoveDirection::Forward.velocity()));
    }

    #[test]
    fn test_pose_on_gait_menu_engages_walk_on_move() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'g');
        press(&mut m, 'p');
        assert_eq!(m.mode(), Mode::Pose);
        press(&mut m, 'w');
        assert_eq!(m.mode(), Mode::Walk);
    }

    #[test]
    fn test_sub_flag_persists_across_reentry() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'g');

        let events = press(&mut m, 'p');
        assert_eq!(
            events[0],
            TeleopEvent::SubFlagToggled {
                flag: SubFlag::Pose,
                enabled: true
            }
        );
        assert_eq!(m.emit_directive().command, MotionCommand::Pose(true));

        press(&mut m, '1');
        assert_eq!(m.mode(), Mode::ClassicWalk);
        assert!(m.flags().pose, "flag survives leaving the mode");

        press(&mut m, 'p');
        assert_eq!(m.emit_directive().command, MotionCommand::Pose(false));

        press(&mut m, 't');
        assert_eq!(m.emit_directive().command, MotionCommand::HandStand(true));
        assert!(!m.flags().pose);
    }

    #[test]
    fn test_menu_switch_only_changes_menu() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'w');
        let before = m.status();

        let events = press(&mut m, 'n');
        assert_eq!(
            events.as_slice(),
            &[TeleopEvent::MenuChanged {
                from: Menu::Main,
                to: Menu::Actions
            }]
        );
        let after = m.status();
        assert_eq!(after.menu, Menu::Actions);
        assert_eq!(after.mode, before.mode);
        assert_eq!(after.velocity, before.velocity);
        assert_eq!(after.action_timer, before.action_timer);
        assert_eq!(after.move_stop_remaining, before.move_stop_remaining);
    }

    #[test]
    fn test_actions_menu_ignores_movement() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'n');
        let events = press(&mut m, 'w');
        assert!(events.is_empty());
        assert_eq!(m.mode(), Mode::Idle);
        assert_eq!(m.velocity(), Velocity::ZERO);
    }

    #[test]
    fn test_global_keys_in_every_menu() {
        for menu_key in ['m', 'n', 'g'] {
            let mut m = TeleopMachine::default();
            press(&mut m, menu_key);
            let menu = m.menu();

            let help = press(&mut m, 'h');
            assert_eq!(help.as_slice(), &[TeleopEvent::HelpRequested { menu }]);

            let exit = m.handle_key(Key::Escape);
            assert_eq!(exit.as_slice(), &[TeleopEvent::ExitRequested]);
            assert_eq!(m.menu(), menu);
            assert_eq!(m.mode(), Mode::Idle);
        }
    }

    #[test]
    fn test_unmapped_key_is_noop() {
        let mut m = TeleopMachine::default();
        press(&mut m, '1');
        let before = m.status();
        assert!(press(&mut m, 'z').is_empty());
        assert!(m.handle_key(Key::Up).is_empty());
        assert_eq!(m.status(), before);
    }

    #[test]
    fn test_idle_key_resets() {
        let mut m = TeleopMachine::default();
        press(&mut m, 'n');
        press(&mut m, '6');
        assert_eq!(m.mode(), Mode::Dance1);
        press(&mut m, '0');
        assert_eq!(m.mode(), Mode::Idle);
        assert!(!m.action_timer().is_armed());
    }
}
