// ==========================================
// 工具包发布库 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为（外键、busy_timeout）
// - 以 TK 为名挂载业务库，保持 `TK.<TABLE>` 字面表名不变
// ==========================================

use crate::schema::{CURRENT_SCHEMA_VERSION, TK_SCHEMA_DDL};
use rusqlite::{params, Connection, OptionalExtension};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 业务库挂载名
pub const TK_SCHEMA_NAME: &str = "TK";

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout_ms: u64) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// 打开连接并将 `db_path` 挂载为 TK schema
///
/// `db_path` 为 `:memory:` 时挂载一个私有内存库（测试用）
pub fn open_tk_connection(db_path: &str, busy_timeout_ms: u64) -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn, busy_timeout_ms)?;
    conn.execute(&format!("ATTACH DATABASE ?1 AS {}", TK_SCHEMA_NAME), params![db_path])?;
    tracing::debug!(db_path = %db_path, "TK schema 已挂载");
    Ok(conn)
}

/// 打开内存库并建好全部 TK 表
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = open_tk_connection(":memory:", DEFAULT_BUSY_TIMEOUT_MS)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 建表（幂等）并登记 schema 版本
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(TK_SCHEMA_DDL)?;
    conn.execute(
        "INSERT OR IGNORE INTO TK.SCHEMA_VERSION (VERSION) VALUES (?1)",
        params![CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema 版本（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM TK.sqlite_master WHERE type='table' AND name='SCHEMA_VERSION' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(VERSION) FROM TK.SCHEMA_VERSION", [], |row| row.get(0))?;
    Ok(v)
}

/// 校验 schema 版本，只告警不迁移
pub fn check_schema_version(conn: &Connection) -> rusqlite::Result<bool> {
    let version = read_schema_version(conn)?;
    match version {
        Some(v) if v == CURRENT_SCHEMA_VERSION => Ok(true),
        Some(v) => {
            tracing::warn!(
                found = v,
                expected = CURRENT_SCHEMA_VERSION,
                "TK schema 版本与代码不一致"
            );
            Ok(false)
        }
        None => {
            tracing::warn!("TK schema 缺少 SCHEMA_VERSION 表");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory_creates_tk_tables() {
        let conn = open_in_memory().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM TK.sqlite_master WHERE type='table' AND name='ACCESS_TYPE'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
        assert!(check_schema_version(&conn).unwrap());
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_missing_schema_version() {
        let conn = open_tk_connection(":memory:", DEFAULT_BUSY_TIMEOUT_MS).unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);
        assert!(!check_schema_version(&conn).unwrap());
    }
}
