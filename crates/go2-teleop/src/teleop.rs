//! 遥操作外壳
//!
//! [`Teleop`] 把状态机、按键读取、控制线程和遥测邮箱组装在一起：
//!
//! - 控制线程（`go2-control`）以固定周期推进计时器并发送指令
//! - 调用 `run()` 的线程充当输入线程，每个轮询周期读取至多一个按键
//! - 计时器产生的事件经 `crossbeam-channel` 回到输入线程，统一交给 [`TeleopListener`]
//!
//! 退出键（Esc）或 [`StopHandle::request_stop`] 设置停止标志；
//! `run()` 在返回前 join 控制线程、收回运动客户端并清除停止标志，
//! 因此同一个控制器可以再次 `run()`。

use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, bounded};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::config::TeleopConfig;
use crate::control::{
    ControlShared, LoopMetrics, LoopMetricsSnapshot, SharedMachine, run_control_loop,
};
use crate::error::TeleopError;
use crate::input::KeyReader;
use crate::motion::SportClient;
use crate::state::{TeleopEvent, TeleopMachine, TeleopStatus};
use crate::telemetry::TelemetryMailbox;

/// 控制线程名称
pub const CONTROL_THREAD_NAME: &str = "go2-control";

/// 可克隆的停止句柄（Ctrl-C 处理函数等外部线程使用）
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求停止（幂等）
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }

    fn flag(&self) -> Arc<AtomicBool> {
        self.flag.clone()
    }
}

/// 事件监听器
///
/// 在输入线程上调用，`status` 是事件产生那一刻的状态快照。
/// 计时器事件的快照由控制线程在同一个周期内取得，和事件一起经通道传回，
/// 不受之后按键的影响。
pub trait TeleopListener {
    fn on_event(&mut self, event: &TeleopEvent, status: &TeleopStatus);
}

/// 默认监听器：把事件写入 tracing 日志
#[derive(Debug, Default)]
pub struct TracingListener;

impl TeleopListener for TracingListener {
    fn on_event(&mut self, event: &TeleopEvent, status: &TeleopStatus) {
        info!(mode = %status.mode, menu = %status.menu, "{event}");
    }
}

/// 键盘遥操作控制器
pub struct Teleop<C, R> {
    machine: SharedMachine,
    client: Option<C>,
    reader: KeyReader<R>,
    config: TeleopConfig,
    stop: StopHandle,
    metrics: Arc<LoopMetrics>,
    telemetry: Arc<TelemetryMailbox>,
    listener: Box<dyn TeleopListener>,
}

impl<C, R> Teleop<C, R>
where
    C: SportClient + Send + 'static,
    R: Read,
{
    /// 创建控制器
    ///
    /// 配置非法时返回 [`TeleopError::InvalidConfig`]。
    pub fn new(
        client: C,
        reader: KeyReader<R>,
        config: TeleopConfig,
    ) -> Result<Self, TeleopError> {
        config.validate()?;
        Ok(Self {
            machine: Arc::new(Mutex::new(TeleopMachine::new(config.move_stop_window))),
            client: Some(client),
            reader,
            config,
            stop: StopHandle::new(),
            metrics: Arc::new(LoopMetrics::new()),
            telemetry: Arc::new(TelemetryMailbox::new()),
            listener: Box::new(TracingListener),
        })
    }

    /// 替换事件监听器
    pub fn with_listener(mut self, listener: impl TeleopListener + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    /// 初始化：输出一次帮助信息
    pub fn initialize(&mut self) {
        let status = self.status();
        info!(menu = %status.menu, mode = %status.mode, "teleop initialized");
        self.listener
            .on_event(&TeleopEvent::HelpRequested { menu: status.menu }, &status);
    }

    /// 运行直到请求退出（阻塞）
    ///
    /// 调用线程负责按键轮询；控制线程在返回前被 join。
    ///
    /// 返回后停止标志被清除，客户端被收回，可以再次调用。
    /// 调用前已经请求的停止仍然会结束这一次运行。
    pub fn run(&mut self) -> Result<(), TeleopError> {
        let mut client = self.client.take().ok_or(TeleopError::AlreadyRunning)?;

        let (tx, rx) = bounded(self.config.event_capacity);
        let shared = ControlShared {
            machine: self.machine.clone(),
            stop: self.stop.flag(),
            metrics: self.metrics.clone(),
            events: tx,
        };
        let loop_config = self.config.loop_config();

        let handle = thread::Builder::new()
            .name(CONTROL_THREAD_NAME.to_string())
            .spawn(move || {
                let result = run_control_loop(&shared, &mut client, &loop_config);
                (client, result)
            })
            .map_err(TeleopError::Spawn)?;

        info!(
            tick_ms = self.config.tick_period.as_secs_f64() * 1e3,
            poll_ms = self.config.poll_period.as_secs_f64() * 1e3,
            "teleop running"
        );

        while !self.stop.is_stop_requested() {
            self.poll_key();
            self.drain_events(&rx);

            if handle.is_finished() {
                warn!("control thread exited before stop was requested");
                break;
            }
            thread::sleep(self.config.poll_period);
        }

        self.stop.request_stop();
        let (client, result) = handle
            .join()
            .map_err(|_| TeleopError::ControlThreadPanicked)?;
        self.client = Some(client);
        self.drain_events(&rx);
        self.stop.reset();

        debug!(metrics = ?self.metrics.snapshot(), "teleop stopped");
        result
    }

    /// 请求停止 `run()`
    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// 当前状态快照
    pub fn status(&self) -> TeleopStatus {
        self.machine.lock().status()
    }

    /// 遥测邮箱
    ///
    /// 控制器本身从不写入。传输层的运动状态订阅回调负责
    /// [`TelemetryMailbox::publish`]；没有传输层时（例如只记录日志的客户端）
    /// 邮箱保持为空，帮助界面显示 waiting。
    pub fn telemetry(&self) -> Arc<TelemetryMailbox> {
        self.telemetry.clone()
    }

    pub fn metrics(&self) -> LoopMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// 取回运动客户端（`run()` 期间为 `None`）
    pub fn into_client(self) -> Option<C> {
        self.client
    }

    fn poll_key(&mut self) {
        let Some(key) = self.reader.poll() else {
            return;
        };
        let (events, status) = {
            let mut machine = self.machine.lock();
            let events = machine.handle_key(key);
            (events, machine.status())
        };
        for event in &events {
            if event.is_exit() {
                self.stop.request_stop();
            }
            self.listener.on_event(event, &status);
        }
    }

    fn drain_events(&mut self, rx: &Receiver<(TeleopEvent, TeleopStatus)>) {
        for (event, status) in rx.try_iter() {
            self.listener.on_event(&event, &status);
        }
    }
}
