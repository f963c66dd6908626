// ==========================================
// 工具包发布库 - 仓储层错误类型
// ==========================================
// 分类: 语句准备/执行失败、记录未找到、写入失败
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 三类核心错误 =====
    #[error("SQL 语句准备/执行失败 [{query}]: {source}")]
    Statement {
        query: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("记录未找到: {entity} with {key}")]
    NotFound {
        entity: String,
        key: String,
        query: String,
    },

    #[error("写入失败 [{query}]: {message}")]
    WriteFailed { query: String, message: String },

    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    // ===== 表约束 =====
    #[error("不支持的操作: {entity} 不允许 {operation}")]
    Unsupported { entity: String, operation: String },

    #[error("ID 超出列宽: {table}.{column} = {value}")]
    IdOverflow {
        table: String,
        column: String,
        value: i64,
    },

    // ===== 报表 =====
    #[error("报表结果列数不足: 期望至少 {expected} 列, 实际 {actual} 列")]
    ReportShape { expected: usize, actual: usize },

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 构造语句错误（附带失败的 SQL 文本）
    pub fn statement(query: &str, source: rusqlite::Error) -> Self {
        RepositoryError::Statement {
            query: query.to_string(),
            source,
        }
    }

    pub fn not_found(entity: &str, key: impl Into<String>, query: &str) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            key: key.into(),
            query: query.to_string(),
        }
    }

    pub fn write_failed(query: &str, message: impl Into<String>) -> Self {
        RepositoryError::WriteFailed {
            query: query.to_string(),
            message: message.into(),
        }
    }

    pub fn unsupported(entity: &str, operation: &str) -> Self {
        RepositoryError::Unsupported {
            entity: entity.to_string(),
            operation: operation.to_string(),
        }
    }

    /// 是否为"记录不存在"（区别于数据库故障）
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// 失败的 SQL 文本（若有）
    pub fn query(&self) -> Option<&str> {
        match self {
            RepositoryError::Statement { query, .. }
            | RepositoryError::NotFound { query, .. }
            | RepositoryError::WriteFailed { query, .. } => Some(query),
            _ => None,
        }
    }

    /// 写入日志后原样返回，供 `map_err` 链使用
    pub fn logged(self) -> Self {
        match &self {
            RepositoryError::NotFound { entity, key, query } => {
                tracing::warn!(entity = %entity, key = %key, query = %query, "记录未找到");
            }
            other => {
                tracing::error!(
                    error = %other,
                    query = other.query().unwrap_or(""),
                    "仓储操作失败"
                );
            }
        }
        self
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = RepositoryError::not_found("AccessType", "ACCESS_TYPE_ID=9", "SELECT 1");
        assert!(err.is_not_found());
        assert_eq!(err.query(), Some("SELECT 1"));

        let err = RepositoryError::write_failed("UPDATE x", "0 rows affected");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_rusqlite_maps_unique() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(2067),
            Some("UNIQUE constraint failed: ACCESS_TYPE.ACCESS_TYPE".to_string()),
        );
        let mapped: RepositoryError = err.into();
        assert!(matches!(mapped, RepositoryError::UniqueConstraintViolation(_)));
    }
}
