//! 终端输出
//!
//! 事件行直接打印到 stdout，帮助键打印当前菜单的按键表和状态。

use std::fmt::Write as _;
use std::sync::Arc;

use go2_teleop::keymap::{self, Binding};
use go2_teleop::{TelemetryMailbox, TeleopEvent, TeleopListener, TeleopStatus};

const RULE: &str = "========================================";

/// 把事件打印到终端的监听器
pub struct ConsoleListener {
    telemetry: Arc<TelemetryMailbox>,
}

impl ConsoleListener {
    pub fn new(telemetry: Arc<TelemetryMailbox>) -> Self {
        Self { telemetry }
    }
}

impl TeleopListener for ConsoleListener {
    fn on_event(&mut self, event: &TeleopEvent, status: &TeleopStatus) {
        match event {
            TeleopEvent::HelpRequested { .. } => {
                print!("{}", render_help(status, self.telemetry.received()));
            },
            _ => println!("{event}"),
        }
    }
}

fn push_bindings(out: &mut String, bindings: &[Binding]) {
    for binding in bindings {
        let key = binding.key.to_string();
        let _ = writeln!(out, "  {key:<5} - {}", binding.action.label());
    }
}

/// 渲染帮助菜单
///
/// `telemetry_received` 为 0 时显示 waiting；日志客户端不订阅遥测，
/// 只有接入传输层后计数才会增长。
pub fn render_help(status: &TeleopStatus, telemetry_received: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "    GO2 Teleop - {} Menu", status.menu);
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(out, "{} Commands:", status.menu);
    push_bindings(&mut out, keymap::menu_bindings(status.menu));

    if status.menu.accepts_movement() {
        let _ = writeln!(out, "\nMovement Commands:");
        push_bindings(&mut out, keymap::MOVEMENT);
    }

    let _ = writeln!(out, "\nOther Commands:");
    push_bindings(&mut out, keymap::GLOBAL);

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Current Mode: {}", status.mode);
    let _ = writeln!(out, "Current Speed: {}", status.velocity);
    if status.flags.pose || status.flags.hand_stand {
        let _ = writeln!(
            out,
            "Pose: {}  HandStand: {}",
            on_off(status.flags.pose),
            on_off(status.flags.hand_stand)
        );
    }
    if telemetry_received == 0 {
        let _ = writeln!(out, "Telemetry: waiting");
    } else {
        let _ = writeln!(out, "Telemetry: {telemetry_received} updates");
    }
    let _ = writeln!(out, "{RULE}");
    out
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
