// ==========================================
// 工具包发布库 - 运行配置
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 环境变量名
pub mod env_keys {
    pub const DB_PATH: &str = "TK_DB_PATH";
    pub const ACTOR: &str = "TK_ACTOR";
    pub const LOG: &str = "TK_LOG";
}

/// 运行配置
///
/// 存储位置：可选的 JSON 文件；缺省字段取默认值
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TkConfig {
    /// TK 业务库文件路径
    #[serde(default = "get_default_db_path")]
    pub db_path: String,

    /// 写入审计列（CREATED_BY/UPDATED_BY/DELETED_BY）时使用的操作人
    #[serde(default = "default_actor")]
    pub actor: String,

    /// busy_timeout（毫秒）
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// 日志过滤器（EnvFilter 语法）
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for TkConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            actor: default_actor(),
            busy_timeout_ms: default_busy_timeout_ms(),
            log_filter: default_log_filter(),
        }
    }
}

impl TkConfig {
    /// 从 JSON 文件加载，缺省字段取默认值
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: TkConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// 默认值 + 环境变量覆写
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 用环境变量覆写已有配置（空值忽略）
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = read_env(env_keys::DB_PATH) {
            self.db_path = v;
        }
        if let Some(v) = read_env(env_keys::ACTOR) {
            self.actor = v;
        }
        if let Some(v) = read_env(env_keys::LOG) {
            self.log_filter = v;
        }
        self
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_actor() -> String {
    std::env::var("USER").unwrap_or_else(|_| "tk_dao".to_string())
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// 默认数据库路径：用户数据目录下的 tk-dao/tk.db，取不到时回退到当前目录
pub fn get_default_db_path() -> String {
    let mut path = PathBuf::from("./tk.db");

    if let Some(data_dir) = dirs::data_dir() {
        path = data_dir.join("tk-dao").join("tk.db");
    }

    path.to_string_lossy().to_string()
}
