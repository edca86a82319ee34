use std::path::PathBuf;
use std::time::Duration;

use crate::records::CancelledEditPolicy;

/// 工坊配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录，存放数据库文件 |
/// | DB_FILE | workshop.redb | 数据库文件名 |
/// | REMOTE_BASE_URL | (未设置) | 远程记录地址，未设置则不拉取 |
/// | REMOTE_TIMEOUT_MS | 5000 | 远程请求超时(毫秒) |
/// | SEED_DEMO_DATA | false | 启动时写入演示数据 |
/// | CANCELLED_EDIT_POLICY | allow | 已取消记录能否改回其他状态: allow / reject |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/srv/workshop REMOTE_BASE_URL=http://10.0.0.5:8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 数据库文件名 (相对 work_dir)
    pub db_file: String,
    pub remote_base_url: Option<String>,
    /// 远程请求超时 (毫秒)
    pub remote_timeout_ms: u64,
    pub seed_demo_data: bool,
    pub cancelled_edit_policy: CancelledEditPolicy,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置 (测试用)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            work_dir: non_empty("WORK_DIR").unwrap_or_else(|| "./data".into()),
            db_file: non_empty("DB_FILE").unwrap_or_else(|| "workshop.redb".into()),
            remote_base_url: non_empty("REMOTE_BASE_URL"),
            remote_timeout_ms: lookup("REMOTE_TIMEOUT_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(5000),
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(false),
            cancelled_edit_policy: match lookup("CANCELLED_EDIT_POLICY") {
                Some(raw) => raw.parse().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Falling back to default cancelled edit policy");
                    CancelledEditPolicy::default()
                }),
                None => CancelledEditPolicy::default(),
            },
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: non_empty("LOG_DIR"),
        }
    }

    /// 数据库文件完整路径
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }

    /// 日志文件目录，未设置则只输出到 stdout
    pub fn log_dir_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(PathBuf::from)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
