//! 运动模式定义
//!
//! [`Mode`] 是封闭枚举，每个模式对应一条静态 [`ModeSpec`] 记录：
//!
//! - **名称**: 状态栏显示名（`STAND`、`WALK` ...）和帮助菜单中的动作描述
//! - **动作时长**: 非零表示一次性动作，计时结束后自动回到 `Idle`
//! - **可移动**: 速度设定值是否有意义
//! - **子开关**: `Pose` / `HandStand` 每次触发时翻转的布尔开关
//!
//! 新增模式只需要在 [`Mode::spec`] 中添加一行数据。

use std::fmt;
use std::time::Duration;

/// 短动作（站起/坐下/恢复、跳跃）
const SETTLE: Duration = Duration::from_secs(2);
/// 手势和翻转动作
const GESTURE: Duration = Duration::from_secs(3);
/// 舞蹈动作
const DANCE: Duration = Duration::from_secs(10);
/// 不会自行结束的模式
const ENDLESS: Duration = Duration::ZERO;

/// 机器人当前行为模式
///
/// 任意时刻只有一个模式处于活动状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// 空闲（发送 StopMove）
    #[default]
    Idle,
    Stand,
    StandDown,
    BalanceStand,
    /// 通用行走模式，由移动按键自动进入
    Walk,
    Sit,
    Damping,
    Recovery,

    // === 表情动作 ===
    Hello,
    Stretch,
    Content,
    Heart,
    Scrape,

    // === 舞蹈 ===
    Dance1,
    Dance2,

    // === 跳跃 ===
    FrontJump,
    FrontPounce,

    // === 翻转 ===
    FrontFlip,
    BackFlip,
    LeftFlip,

    // === 步态 ===
    ClassicWalk,
    FreeWalk,
    FreeBound,
    FreeJump,
    FreeAvoid,
    WalkUpright,
    CrossStep,
    StaticWalk,
    TrotRun,
    /// 姿态模式，带子开关
    Pose,
    /// 倒立行走，带子开关
    HandStand,
}

/// 模式附带的布尔子开关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubFlag {
    Pose,
    HandStand,
}

impl fmt::Display for SubFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubFlag::Pose => write!(f, "pose"),
            SubFlag::HandStand => write!(f, "handstand"),
        }
    }
}

/// 子开关的当前取值
///
/// 跨模式切换保持不变，只有再次按下对应按键才会翻转。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubFlags {
    pub pose: bool,
    pub hand_stand: bool,
}

impl SubFlags {
    /// 读取子开关
    pub fn get(&self, flag: SubFlag) -> bool {
        match flag {
            SubFlag::Pose => self.pose,
            SubFlag::HandStand => self.hand_stand,
        }
    }

    /// 翻转子开关，返回翻转后的值
    pub fn toggle(&mut self, flag: SubFlag) -> bool {
        let slot = match flag {
            SubFlag::Pose => &mut self.pose,
            SubFlag::HandStand => &mut self.hand_stand,
        };
        *slot = !*slot;
        *slot
    }
}

/// 模式的静态描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSpec {
    /// 状态栏显示名
    pub name: &'static str,
    /// 帮助菜单中的动作描述
    pub label: &'static str,
    /// 动作时长（`Duration::ZERO` 表示不会自行结束）
    pub action_duration: Duration,
    /// 速度设定值是否有意义
    pub movable: bool,
    /// 进入该模式时翻转的子开关
    pub toggle: Option<SubFlag>,
}

const fn spec(
    name: &'static str,
    label: &'static str,
    action_duration: Duration,
    movable: bool,
    toggle: Option<SubFlag>,
) -> ModeSpec {
    ModeSpec {
        name,
        label,
        action_duration,
        movable,
        toggle,
    }
}

impl Mode {
    /// 全部模式（用于遍历测试和帮助输出）
    pub const ALL: [Mode; 31] = [
        Mode::Idle,
        Mode::Stand,
        Mode::StandDown,
        Mode::BalanceStand,
        Mode::Walk,
        Mode::Sit,
        Mode::Damping,
        Mode::Recovery,
        Mode::Hello,
        Mode::Stretch,
        Mode::Content,
        Mode::Heart,
        Mode::Scrape,
        Mode::Dance1,
        Mode::Dance2,
        Mode::FrontJump,
        Mode::FrontPounce,
        Mode::FrontFlip,
        Mode::BackFlip,
        Mode::LeftFlip,
        Mode::ClassicWalk,
        Mode::FreeWalk,
        Mode::FreeBound,
        Mode::FreeJump,
        Mode::FreeAvoid,
        Mode::WalkUpright,
        Mode::CrossStep,
        Mode::StaticWalk,
        Mode::TrotRun,
        Mode::Pose,
        Mode::HandStand,
    ];

    /// 模式静态描述表
    pub const fn spec(self) -> ModeSpec {
        match self {
            Mode::Idle => spec("IDLE", "Stop/Idle", ENDLESS, false, None),
            Mode::Stand => spec("STAND", "Stand Up", ENDLESS, false, None),
            Mode::StandDown => spec("STAND_DOWN", "Stand Down", SETTLE, false, None),
            Mode::BalanceStand => spec("BALANCE_STAND", "Balance Stand", ENDLESS, false, None),
            Mode::Walk => spec("WALK", "Walk", ENDLESS, true, None),
            Mode::Sit => spec("SIT", "Sit", SETTLE, false, None),
            Mode::Damping => spec("DAMPING", "Damping Mode", ENDLESS, false, None),
            Mode::Recovery => spec("RECOVERY", "Recovery Stand", SETTLE, false, None),

            Mode::Hello => spec("HELLO", "Hello", GESTURE, false, None),
            Mode::Stretch => spec("STRETCH", "Stretch", GESTURE, false, None),
            Mode::Content => spec("CONTENT", "Content", GESTURE, false, None),
            Mode::Heart => spec("HEART", "Heart", GESTURE, false, None),
            Mode::Scrape => spec("SCRAPE", "Scrape", GESTURE, false, None),

            Mode::Dance1 => spec("DANCE1", "Dance 1", DANCE, false, None),
            Mode::Dance2 => spec("DANCE2", "Dance 2", DANCE, false, None),

            Mode::FrontJump => spec("FRONT_JUMP", "Front Jump", SETTLE, false, None),
            Mode::FrontPounce => spec("FRONT_POUNCE", "Front Pounce", SETTLE, false, None),

            Mode::FrontFlip => spec("FRONT_FLIP", "Front Flip", GESTURE, false, None),
            Mode::BackFlip => spec("BACK_FLIP", "Back Flip", GESTURE, false, None),
            Mode::LeftFlip => spec("LEFT_FLIP", "Left Flip", GESTURE, false, None),

            Mode::ClassicWalk => spec("CLASSIC_WALK", "Classic Walk", ENDLESS, true, None),
            Mode::FreeWalk => spec("FREE_WALK", "Free Walk", ENDLESS, true, None),
            Mode::FreeBound => spec("FREE_BOUND", "Free Bound", ENDLESS, true, None),
            Mode::FreeJump => spec("FREE_JUMP", "Free Jump", ENDLESS, true, None),
            Mode::FreeAvoid => spec("FREE_AVOID", "Free Avoid", ENDLESS, true, None),
            Mode::WalkUpright => spec("WALK_UPRIGHT", "Walk Upright", ENDLESS, true, None),
            Mode::CrossStep => spec("CROSS_STEP", "Cross Step", ENDLESS, true, None),
            Mode::StaticWalk => spec("STATIC_WALK", "Static Walk", ENDLESS, true, None),
            Mode::TrotRun => spec("TROT_RUN", "Trot Run", ENDLESS, true, None),
            Mode::Pose => spec("POSE", "Pose (toggle)", ENDLESS, false, Some(SubFlag::Pose)),
            Mode::HandStand => spec(
                "HAND_STAND",
                "Hand Stand (toggle)",
                ENDLESS,
                true,
                Some(SubFlag::HandStand),
            ),
        }
    }

    /// 状态栏显示名
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// 帮助菜单中的动作描述
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// 动作时长（`Duration::ZERO` 表示不会自行结束）
    pub fn action_duration(self) -> Duration {
        self.spec().action_duration
    }

    /// 是否为一次性定时动作
    pub fn is_timed(self) -> bool {
        !self.spec().action_duration.is_zero()
    }

    /// 速度设定值是否有意义
    pub fn is_movable(self) -> bool {
        self.spec().movable
    }

    /// 进入该模式时翻转的子开关
    pub fn toggle(self) -> Option<SubFlag> {
        self.spec().toggle
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
