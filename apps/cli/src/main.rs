//! # GO2 CLI
//!
//! GO2 四足机器人键盘遥操作。
//!
//! ```bash
//! go2-cli eth0
//! RUST_LOG=go2_teleop=debug go2-cli eth0 --move-stop-ms 300
//! ```
//!
//! 启动后终端切换到原始模式，`h` 显示当前菜单的按键，ESC 或 Ctrl+C 退出。

use std::io;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use go2_teleop::{KeyReader, RawTerminal, Teleop, TeleopConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod client;
mod display;

use client::TracingSportClient;
use display::ConsoleListener;

/// 初始化完成后等待运动服务就绪的时间
const STARTUP_DELAY: Duration = Duration::from_secs(1);

/// GO2 CLI - 键盘遥操作
#[derive(Parser, Debug)]
#[command(name = "go2-cli")]
#[command(about = "Keyboard teleoperation for the GO2 quadruped", long_about = None)]
#[command(version)]
struct Cli {
    /// 连接机器人的网卡名（例如 eth0）
    network_interface: String,

    /// 控制周期（毫秒）
    #[arg(long, default_value_t = 5)]
    tick_ms: u64,

    /// 按键轮询周期（毫秒）
    #[arg(long, default_value_t = 10)]
    poll_ms: u64,

    /// 松开移动按键后自动停止的时间窗口（毫秒）
    #[arg(long, default_value_t = 500)]
    move_stop_ms: u64,
}

impl Cli {
    fn teleop_config(&self) -> TeleopConfig {
        TeleopConfig {
            tick_period: Duration::from_millis(self.tick_ms),
            poll_period: Duration::from_millis(self.poll_ms),
            move_stop_window: Duration::from_millis(self.move_stop_ms),
            ..TeleopConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // 日志写到 stderr，stdout 留给菜单和事件行
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("go2_cli=info,go2_teleop=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.teleop_config();
    config.validate().context("invalid teleop configuration")?;

    println!("Initializing GO2 teleop...");
    info!(interface = %cli.network_interface, "connecting to sport service");

    let client = TracingSportClient::new(&cli.network_interface);
    let teleop = Teleop::new(client, KeyReader::new(io::stdin()), config)?;
    let listener = ConsoleListener::new(teleop.telemetry());
    let mut teleop = teleop.with_listener(listener);

    let stop = teleop.stop_handle();
    ctrlc::set_handler(move || stop.request_stop()).context("failed to set Ctrl+C handler")?;

    let terminal = RawTerminal::enable().context("failed to switch terminal to raw mode")?;

    thread::sleep(STARTUP_DELAY);
    teleop.initialize();
    let result = teleop.run();

    // 先恢复终端再输出结果
    drop(terminal);
    result?;

    let metrics = teleop.metrics();
    info!(
        ticks = metrics.ticks,
        dispatch_failures = metrics.dispatch_failures,
        time_jumps = metrics.time_jumps,
        "control loop summary"
    );
    println!("Teleop terminated.");
    Ok(())
}
