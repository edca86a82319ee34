use anyhow::Context;
use std::path::PathBuf;

use crate::core::Config;
use crate::db::Store;
use crate::db::repository::{
    CarHistoryRepository, ServiceRepository, ThemeRepository, UserRepository,
};
use crate::records::RecordLifecycle;
use crate::remote::RecordsClient;
use crate::seed::{self, SeedSummary};
use crate::shifts::ShiftLifecycle;
use crate::utils::AppError;

/// 工坊状态 - 持有配置与存储句柄
///
/// `Store` 内部是 `Arc`，克隆成本极低。各生命周期/仓储按需创建，
/// 不做缓存：每次操作都重新读取所涉及的集合。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Store | redb 存储句柄 |
#[derive(Clone)]
pub struct WorkshopState {
    config: Config,
    store: Store,
}

/// Outcome of the startup pass
#[derive(Debug, Clone, Default)]
pub struct StartupReport {
    pub orphans_closed: usize,
    pub remote_added: usize,
    pub seeded: Option<SeedSummary>,
    pub records: usize,
    pub shifts: usize,
}

impl WorkshopState {
    pub fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }

    /// 初始化状态
    ///
    /// 1. 确保工作目录存在
    /// 2. 打开数据库 (work_dir/db_file)
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let work_dir = PathBuf::from(&config.work_dir);
        std::fs::create_dir_all(&work_dir)
            .with_context(|| format!("Failed to create work directory {}", work_dir.display()))?;

        let db_path = config.db_path();
        let store = Store::open(&db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        tracing::info!(path = %db_path.display(), "Database opened");

        Ok(Self::new(config.clone(), store))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn records(&self) -> RecordLifecycle {
        RecordLifecycle::new(self.store.clone(), self.config.cancelled_edit_policy)
    }

    pub fn shifts(&self) -> ShiftLifecycle {
        ShiftLifecycle::new(self.store.clone())
    }

    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.store.clone())
    }

    pub fn services(&self) -> ServiceRepository {
        ServiceRepository::new(self.store.clone())
    }

    pub fn car_history(&self) -> CarHistoryRepository {
        CarHistoryRepository::new(self.store.clone())
    }

    pub fn theme(&self) -> ThemeRepository {
        ThemeRepository::new(self.store.clone())
    }

    /// 启动流程
    ///
    /// 1. 关闭孤儿班次
    /// 2. 合并远程记录 (配置了 REMOTE_BASE_URL 时)
    /// 3. 写入演示数据 (SEED_DEMO_DATA=true 时)
    pub async fn run_startup(&self) -> StartupReport {
        let mut report = StartupReport {
            orphans_closed: self.shifts().cleanup_orphans(),
            ..Default::default()
        };

        if let Some(base_url) = &self.config.remote_base_url {
            match RecordsClient::new(base_url.as_str(), self.config.remote_timeout()) {
                Ok(client) => {
                    let remote = client.fetch_records().await;
                    report.remote_added = self.records().merge_remote(remote);
                }
                Err(e) => tracing::warn!(error = %e, "Failed to build remote client"),
            }
        }

        if self.config.seed_demo_data {
            match seed::seed_demo_data(&self.store) {
                Ok(summary) => report.seeded = Some(summary),
                Err(e) => {
                    let err = AppError::from(e);
                    tracing::warn!(code = %err.code, error = %err, "Demo seeding failed");
                }
            }
        }

        report.records = self.records().find_all().len();
        report.shifts = self.shifts().find_all().len();
        tracing::info!(
            orphans_closed = report.orphans_closed,
            remote_added = report.remote_added,
            records = report.records,
            shifts = report.shifts,
            "Startup complete"
        );
        report
    }
}
