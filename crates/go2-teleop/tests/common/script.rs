//! 脚本化按键源
//!
//! 模拟非阻塞 stdin：每次 `read()` 交付一个字节，或在"空闲"步骤返回 `Ok(0)`。
//! 脚本耗尽后一直返回 `Ok(0)`。

use std::collections::VecDeque;
use std::io::{self, Read};

#[derive(Debug, Clone, Default)]
pub struct KeyScript {
    steps: VecDeque<Option<u8>>,
}

impl KeyScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加连续到达的字节（同一按键的转义序列必须一次追加）
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.extend(bytes.iter().copied().map(Some));
        self
    }

    /// 追加一个普通按键，后面跟一次空读取
    pub fn key(self, byte: u8) -> Self {
        self.bytes(&[byte]).idle(1)
    }

    /// 追加 `reads` 次空读取
    pub fn idle(mut self, reads: usize) -> Self {
        self.steps.extend(std::iter::repeat_n(None, reads));
        self
    }
}

impl Read for KeyScript {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.steps.pop_front() {
            Some(Some(byte)) => {
                buf[0] = byte;
                Ok(1)
            },
            Some(None) | None => Ok(0),
        }
    }
}
