//! 遥测邮箱
//!
//! 订阅回调把最新的 [`SportModeState`] 写入单槽邮箱，新快照直接覆盖旧快照。
//! 控制逻辑从不读取遥测，邮箱只供外部检查和显示。
//!
//! 同步机制：`ArcSwapOption`，写入方不会被读取方阻塞。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwapOption;

/// 运动服务上报的状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SportModeState {
    /// 服务端时间戳（毫秒）
    pub stamp_ms: u64,
    /// 服务端运动模式编号
    pub mode: u8,
    /// 服务端步态编号
    pub gait_type: u8,
    /// 机身高度（m）
    pub body_height: f32,
    /// 里程计位置 [x, y, z]（m）
    pub position: [f32; 3],
    /// 机身速度 [vx, vy, vz]（m/s）
    pub velocity: [f32; 3],
    /// 偏航角速度（rad/s）
    pub yaw_speed: f32,
    /// 足端力
    pub foot_force: [i16; 4],
}

/// 单槽遥测邮箱
#[derive(Debug, Default)]
pub struct TelemetryMailbox {
    latest: ArcSwapOption<SportModeState>,
    received: AtomicU64,
}

impl TelemetryMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入新快照（覆盖旧快照）
    pub fn publish(&self, state: SportModeState) {
        self.latest.store(Some(Arc::new(state)));
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    /// 最新快照（尚未收到时为 `None`）
    pub fn latest(&self) -> Option<Arc<SportModeState>> {
        self.latest.load_full()
    }

    /// 累计收到的快照数
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_mailbox() {
        let mailbox = TelemetryMailbox::new();
        assert!(mailbox.latest().is_none());
        assert_eq!(mailbox.received(), 0);
    }

    #[test]
    fn test_latest_overwrites() {
        let mailbox = TelemetryMailbox::new();
        mailbox.publish(SportModeState {
            stamp_ms: 1,
            ..Default::default()
        });
        mailbox.publish(SportModeState {
            stamp_ms: 2,
            body_height: 0.32,
            ..Default::default()
        });

        let latest = mailbox.latest().unwrap();
        assert_eq!(latest.stamp_ms, 2);
        assert_eq!(latest.body_height, 0.32);
        assert_eq!(mailbox.received(), 2);
    }

    #[test]
    fn test_concurrent_publish_and_read() {
        let mailbox = Arc::new(TelemetryMailbox::new());

        let writer = {
            let mailbox = mailbox.clone();
            thread::spawn(move || {
                for i in 0..1000u64 {
                    mailbox.publish(SportModeState {
                        stamp_ms: i,
                        ..Default::default()
                    });
                }
            })
        };

        let reader = {
            let mailbox = mailbox.clone();
            thread::spawn(move || {
                let mut last = 0;
                for _ in 0..1000 {
                    if let Some(state) = mailbox.latest() {
                        assert!(state.stamp_ms >= last, "snapshots never go backwards");
                        last = state.stamp_ms;
                    }
                    thread::yield_now();
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(mailbox.received(), 1000);
        assert_eq!(mailbox.latest().unwrap().stamp_ms, 999);
    }
}
