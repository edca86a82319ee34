//! 工具模块 - 日志与错误转换
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - 日志初始化

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorCode};
