//! 按键分发表
//!
//! (菜单, 按键) → [`KeyAction`] 的静态映射，不做任何 IO。
//! 查找顺序：全局按键 → 当前菜单专属按键 → 移动按键（仅 Main / Gait 菜单）。

use std::fmt;

use crate::input::Key;
use crate::mode::Mode;
use crate::motion::Velocity;

/// 当前生效的按键映射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Menu {
    #[default]
    Main,
    Actions,
    Gait,
}

impl Menu {
    pub const ALL: [Menu; 3] = [Menu::Main, Menu::Actions, Menu::Gait];

    /// 菜单标题
    pub fn title(self) -> &'static str {
        match self {
            Menu::Main => "Main",
            Menu::Actions => "Actions",
            Menu::Gait => "Gait",
        }
    }

    /// 该菜单是否响应移动按键
    pub fn accepts_movement(self) -> bool {
        matches!(self, Menu::Main | Menu::Gait)
    }

    fn table(self) -> &'static [Binding] {
        match self {
            Menu::Main => MAIN,
            Menu::Actions => ACTIONS,
            Menu::Gait => GAIT,
        }
    }
}

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// 移动方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
}

impl MoveDirection {
    /// 该方向对应的固定速度向量
    pub const fn velocity(self) -> Velocity {
        match self {
            MoveDirection::Forward => Velocity::new(0.3, 0.0, 0.0),
            MoveDirection::Backward => Velocity::new(-0.3, 0.0, 0.0),
            MoveDirection::StrafeLeft => Velocity::new(0.0, 0.2, 0.0),
            MoveDirection::StrafeRight => Velocity::new(0.0, -0.2, 0.0),
            MoveDirection::TurnLeft => Velocity::new(0.0, 0.0, 0.5),
            MoveDirection::TurnRight => Velocity::new(0.0, 0.0, -0.5),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveDirection::Forward => "Move Forward",
            MoveDirection::Backward => "Move Backward",
            MoveDirection::StrafeLeft => "Move Left",
            MoveDirection::StrafeRight => "Move Right",
            MoveDirection::TurnLeft => "Turn Left",
            MoveDirection::TurnRight => "Turn Right",
        }
    }
}

/// 按键触发的状态变更
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// 显示帮助
    Help,
    /// 退出程序
    Exit,
    /// 切换菜单（不影响模式和速度）
    SwitchMenu(Menu),
    /// 进入模式
    Enter(Mode),
    /// 移动
    Move(MoveDirection),
    /// 立即停止移动
    StopMovement,
}

impl KeyAction {
    /// 帮助菜单中的描述
    pub fn label(self) -> &'static str {
        match self {
            KeyAction::Help => "Show this help",
            KeyAction::Exit => "Exit program",
            KeyAction::SwitchMenu(Menu::Main) => "Main menu",
            KeyAction::SwitchMenu(Menu::Actions) => "Actions menu",
            KeyAction::SwitchMenu(Menu::Gait) => "Gait menu",
            KeyAction::Enter(mode) => mode.label(),
            KeyAction::Move(dir) => dir.label(),
            KeyAction::StopMovement => "Stop Movement",
        }
    }
}

/// 一条按键绑定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: Key,
    pub action: KeyAction,
}

const fn bind(key: Key, action: KeyAction) -> Binding {
    Binding { key, action }
}

const fn ch(c: char) -> Key {
    Key::Char(c)
}

/// 全局按键，在任何菜单下都优先匹配
pub const GLOBAL: &[Binding] = &[
    bind(ch('h'), KeyAction::Help),
    bind(Key::Escape, KeyAction::Exit),
    bind(ch('m'), KeyAction::SwitchMenu(Menu::Main)),
    bind(ch('n'), KeyAction::SwitchMenu(Menu::Actions)),
    bind(ch('g'), KeyAction::SwitchMenu(Menu::Gait)),
];

/// 移动按键（Main 与 Gait 菜单共用）
pub const MOVEMENT: &[Binding] = &[
    bind(ch('w'), KeyAction::Move(MoveDirection::Forward)),
    bind(ch('s'), KeyAction::Move(MoveDirection::Backward)),
    bind(ch('q'), KeyAction::Move(MoveDirection::StrafeLeft)),
    bind(ch('e'), KeyAction::Move(MoveDirection::StrafeRight)),
    bind(ch('a'), KeyAction::Move(MoveDirection::TurnLeft)),
    bind(ch('d'), KeyAction::Move(MoveDirection::TurnRight)),
    bind(Key::Left, KeyAction::Move(MoveDirection::TurnLeft)),
    bind(Key::Right, KeyAction::Move(MoveDirection::TurnRight)),
    bind(ch('x'), KeyAction::StopMovement),
];

const MAIN: &[Binding] = &[
    bind(ch('1'), KeyAction::Enter(Mode::Stand)),
    bind(ch('2'), KeyAction::Enter(Mode::StandDown)),
    bind(ch('3'), KeyAction::Enter(Mode::Sit)),
    bind(ch('4'), KeyAction::Enter(Mode::Recovery)),
    bind(ch('5'), KeyAction::Enter(Mode::Damping)),
    bind(ch('6'), KeyAction::Enter(Mode::BalanceStand)),
    bind(ch('0'), KeyAction::Enter(Mode::Idle)),
];

const ACTIONS: &[Binding] = &[
    bind(ch('1'), KeyAction::Enter(Mode::Hello)),
    bind(ch('2'), KeyAction::Enter(Mode::Stretch)),
    bind(ch('3'), KeyAction::Enter(Mode::Content)),
    bind(ch('4'), KeyAction::Enter(Mode::Heart)),
    bind(ch('5'), KeyAction::Enter(Mode::Scrape)),
    bind(ch('6'), KeyAction::Enter(Mode::Dance1)),
    bind(ch('7'), KeyAction::Enter(Mode::Dance2)),
    bind(ch('j'), KeyAction::Enter(Mode::FrontJump)),
    bind(ch('p'), KeyAction::Enter(Mode::FrontPounce)),
    bind(ch('f'), KeyAction::Enter(Mode::FrontFlip)),
    bind(ch('b'), KeyAction::Enter(Mode::BackFlip)),
    bind(ch('l'), KeyAction::Enter(Mode::LeftFlip)),
    bind(ch('0'), KeyAction::Enter(Mode::Idle)),
];

const GAIT: &[Binding] = &[
    bind(ch('1'), KeyAction::Enter(Mode::ClassicWalk)),
    bind(ch('2'), KeyAction::Enter(Mode::FreeWalk)),
    bind(ch('3'), KeyAction::Enter(Mode::FreeBound)),
    bind(ch('4'), KeyAction::Enter(Mode::FreeJump)),
    bind(ch('5'), KeyAction::Enter(Mode::FreeAvoid)),
    bind(ch('6'), KeyAction::Enter(Mode::WalkUpright)),
    bind(ch('7'), KeyAction::Enter(Mode::CrossStep)),
    bind(ch('8'), KeyAction::Enter(Mode::StaticWalk)),
    bind(ch('9'), KeyAction::Enter(Mode::TrotRun)),
    bind(ch('p'), KeyAction::Enter(Mode::Pose)),
    bind(ch('t'), KeyAction::Enter(Mode::HandStand)),
    bind(ch('0'), KeyAction::Enter(Mode::Idle)),
];

fn find(table: &[Binding], key: Key) -> Option<KeyAction> {
    table.iter().find(|b| b.key == key).map(|b| b.action)
}

/// 查找按键在指定菜单下的动作；未映射的按键返回 `None`
pub fn lookup(menu: Menu, key: Key) -> Option<KeyAction> {
    find(GLOBAL, key)
        .or_else(|| find(menu.table(), key))
        .or_else(|| {
            if menu.accepts_movement() {
                find(MOVEMENT, key)
            } else {
                None
            }
        })
}

/// 菜单专属按键（用于帮助输出，不含全局和移动按键）
pub fn menu_bindings(menu: Menu) -> &'static [Binding] {
    menu.table()
}

/// 找到进入某个模式的菜单和按键
///
/// `Walk` 没有专属按键（由移动按键进入），返回 `None`。
pub fn binding_for(mode: Mode) -> Option<(Menu, Key)> {
    Menu::ALL.into_iter().find_map(|menu| {
        menu.table()
            .iter()
            .find(|b| b.action == KeyAction::Enter(mode))
            .map(|b| (menu, b.key))
    })
}

/// 切换到指定菜单的全局按键
pub fn menu_key(menu: Menu) -> Key {
    GLOBAL
        .iter()
        .find(|b| b.action == KeyAction::SwitchMenu(menu))
        .map(|b| b.key)
        .unwrap_or(Key::Char('m'))
}
