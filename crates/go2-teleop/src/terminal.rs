//! 原始终端模式
//!
//! [`RawTerminal`] 关闭 stdin 的行缓冲和回显，并设置 `VMIN = VTIME = 0`，
//! 使 `read()` 在没有输入时立即返回 0。守卫析构时恢复原始终端属性，
//! 无论 `run()` 正常返回、出错还是 panic 展开。
//!
//! `ISIG` 保持开启，Ctrl-C 仍然产生 SIGINT。

use crate::error::TeleopError;

#[cfg(unix)]
mod imp {
    use std::io;
    use std::os::fd::AsFd;

    use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
    use tracing::{debug, warn};

    use crate::error::TeleopError;

    pub struct RawTerminal {
        original: Termios,
    }

    impl RawTerminal {
        pub fn enable() -> Result<Self, TeleopError> {
            let stdin = io::stdin();
            let original = termios::tcgetattr(stdin.as_fd())
                .map_err(|e| TeleopError::Terminal(io::Error::from(e)))?;

            let mut raw = original.clone();
            raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
            raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
            raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
            termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &raw)
                .map_err(|e| TeleopError::Terminal(io::Error::from(e)))?;

            debug!("terminal switched to raw mode");
            Ok(Self { original })
        }

        pub fn restore(&self) -> Result<(), TeleopError> {
            termios::tcsetattr(io::stdin().as_fd(), SetArg::TCSANOW, &self.original)
                .map_err(|e| TeleopError::Terminal(io::Error::from(e)))
        }
    }

    impl Drop for RawTerminal {
        fn drop(&mut self) {
            match self.restore() {
                Ok(()) => debug!("terminal restored"),
                Err(e) => warn!(error = %e, "failed to restore terminal"),
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use std::io;

    use crate::error::TeleopError;

    pub struct RawTerminal;

    impl RawTerminal {
        pub fn enable() -> Result<Self, TeleopError> {
            Err(TeleopError::Terminal(io::Error::new(
                io::ErrorKind::Unsupported,
                "raw terminal mode is only supported on unix",
            )))
        }

        pub fn restore(&self) -> Result<(), TeleopError> {
            Ok(())
        }
    }
}

/// 原始终端模式守卫
///
/// 持有期间 stdin 处于非规范、无回显、非阻塞读取模式。
pub struct RawTerminal {
    inner: imp::RawTerminal,
}

impl RawTerminal {
    /// 切换到原始模式
    ///
    /// stdin 不是终端时返回 [`TeleopError::Terminal`]。
    pub fn enable() -> Result<Self, TeleopError> {
        Ok(Self {
            inner: imp::RawTerminal::enable()?,
        })
    }

    /// 立即恢复原始终端属性（析构时还会再恢复一次）
    pub fn restore(&self) -> Result<(), TeleopError> {
        self.inner.restore()
    }
}
