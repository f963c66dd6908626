// ==========================================
// 工具包发布库 - 连接上下文
// ==========================================
// 职责: 持有共享连接与操作人，供所有仓储使用
// 约束: 每次调用独占连接，语句在调用内准备并释放
// ==========================================

use crate::config::TkConfig;
use crate::db::{check_schema_version, init_schema, open_in_memory, open_tk_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// 仓储调用的环境上下文
pub struct TkContext {
    conn: Arc<Mutex<Connection>>,
    actor: String,
}

impl TkContext {
    /// 从已有连接创建上下文
    pub fn new(conn: Arc<Mutex<Connection>>, actor: impl Into<String>) -> Self {
        Self {
            conn,
            actor: actor.into(),
        }
    }

    /// 按配置打开 TK 库，建表并校验 schema 版本
    pub fn open(config: &TkConfig) -> RepositoryResult<Arc<Self>> {
        let conn = open_tk_connection(&config.db_path, config.busy_timeout_ms)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()).logged())?;
        init_schema(&conn)?;
        check_schema_version(&conn)?;

        tracing::info!(db_path = %config.db_path, actor = %config.actor, "TK 上下文已打开");
        Ok(Arc::new(Self::new(Arc::new(Mutex::new(conn)), config.actor.clone())))
    }

    /// 内存库上下文（测试用）
    pub fn in_memory(actor: impl Into<String>) -> RepositoryResult<Arc<Self>> {
        let conn = open_in_memory()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()).logged())?;
        Ok(Arc::new(Self::new(Arc::new(Mutex::new(conn)), actor)))
    }

    /// 获取数据库连接
    pub fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()).logged())
    }

    /// 审计列使用的操作人
    pub fn actor(&self) -> &str {
        &self.actor
    }
}
