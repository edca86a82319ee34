//! 核心模块 - 配置与状态
//!
//! - [`Config`] - 工坊配置
//! - [`WorkshopState`] - 工坊状态

pub mod config;
pub mod state;

pub use config::Config;
pub use state::{StartupReport, WorkshopState};
