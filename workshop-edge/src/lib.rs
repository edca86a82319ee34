//! Workshop Edge - 汽修工坊记录与班次管理
//!
//! # 架构概述
//!
//! - **存储** (`db`): redb 单文件键值存储，每个集合一个 JSON 数组
//! - **服务记录** (`records`): 创建、编辑、取消、确认付款、远程合并
//! - **班次** (`shifts`): 开班、交班、编辑、重开、孤儿清理
//! - **远程记录** (`remote`): 只读 HTTP 拉取
//!
//! # 模块结构
//!
//! ```text
//! workshop-edge/src/
//! ├── core/          # 配置、状态
//! ├── db/            # 存储后端、集合、仓储
//! ├── records/       # 服务记录生命周期
//! ├── shifts/        # 班次生命周期
//! ├── remote/        # 远程记录客户端
//! ├── seed.rs        # 演示数据
//! └── utils/         # 日志、错误转换
//! ```

pub mod core;
pub mod db;
pub mod records;
pub mod remote;
pub mod seed;
pub mod shifts;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, StartupReport, WorkshopState};
pub use db::{BlobStore, MemoryStore, RedbStore, Store};
pub use records::{CancelledEditPolicy, RecordLifecycle};
pub use remote::RecordsClient;
pub use shifts::{EditEligibility, ShiftLifecycle};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置环境: 读取 .env，加载配置，按配置初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let log_dir = config.log_dir_path();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(Some(&config.log_level), log_dir.as_deref());
    Ok(config)
}
