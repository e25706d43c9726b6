//! 集成测试公共工具

#![allow(dead_code)]

pub mod mock_client;
pub mod script;

pub use mock_client::RecordingClient;
pub use script::KeyScript;
