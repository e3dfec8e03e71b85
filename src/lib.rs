//! HomeBound Care 客户端
//!
//! 通知铃铛（定时轮询 + 已读同步）、会话存储，以及各页面使用的后端API客户端。

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::{ClientError, Result};
pub use state::AppState;
