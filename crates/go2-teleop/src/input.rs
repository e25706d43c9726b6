//! 键盘输入解码
//!
//! 把原始字节流解码为逻辑按键。方向键以 `ESC [ A/B/C/D` 三字节序列到达，
//! 在同一次 [`KeyReader::poll`] 中尝试读完；序列不完整或不匹配时退回为
//! [`Key::Escape`]，已经读出的字节留在内部缓冲区，由后续 `poll()` 依次返回。

use std::collections::VecDeque;
use std::fmt;
use std::io::{ErrorKind, Read};

use tracing::trace;

/// ESC 字节
pub const ESC: u8 = 0x1B;

/// 逻辑按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// 普通字符
    Char(char),
    /// 单独的 ESC
    Escape,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// 单字节到按键的映射（ESC 之外）
    pub fn from_byte(byte: u8) -> Self {
        if byte == ESC {
            Key::Escape
        } else {
            Key::Char(char::from(byte))
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{c}"),
            Key::Escape => write!(f, "ESC"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
        }
    }
}

/// 非阻塞按键读取器
///
/// `source` 应当是非阻塞的：没有数据时返回 `Ok(0)` 或 `WouldBlock`。
/// 原始终端模式下（`VMIN = VTIME = 0`）的 stdin 满足这一要求。
pub struct KeyReader<R> {
    source: R,
    pending: VecDeque<u8>,
}

impl<R: Read> KeyReader<R> {
    /// 创建读取器
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    /// 读取一个逻辑按键
    ///
    /// 没有可用字节时立即返回 `None`。读取失败同样视为没有按键。
    pub fn poll(&mut self) -> Option<Key> {
        let byte = self.next_byte()?;
        if byte != ESC {
            return Some(Key::from_byte(byte));
        }
        Some(self.decode_escape())
    }

    /// 内部缓冲区中尚未交付的字节数
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// 取回底层字节源
    pub fn into_inner(self) -> R {
        self.source
    }

    fn decode_escape(&mut self) -> Key {
        let Some(second) = self.next_byte() else {
            return Key::Escape;
        };
        if second != b'[' {
            self.pending.push_front(second);
            return Key::Escape;
        }

        let Some(third) = self.next_byte() else {
            self.pending.push_front(second);
            return Key::Escape;
        };
        match third {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            _ => {
                self.pending.push_front(third);
                self.pending.push_front(second);
                Key::Escape
            },
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.pending.pop_front() {
            return Some(byte);
        }

        let mut buf = [0u8; 1];
        match self.source.read(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf[0]),
            Err(e) if e.kind() == ErrorKind::WouldBlock => None,
            Err(e) => {
                trace!(error = %e, "keyboard read failed, treating as no key");
                None
            },
        }
    }
}
