// ==========================================
// 工具包发布库 - 代理主键分配
// ==========================================
// TK.ID_SEQUENCE 按 (表, 列) 维护单调计数器，首次使用时以 MAX(id)+1 播种
// 约束: 必须与随后的 INSERT 处于同一事务，分配出的 id 不复用
// ==========================================

use crate::common::db_utils::{execute_write, query_optional};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value;
use rusqlite::Transaction;

/// 读取下一个可用 id 的查询（单行单列）
pub const NEXT_ID_QUERY: &str =
    "SELECT NEXT_ID FROM TK.ID_SEQUENCE WHERE TABLE_NAME = ?1 AND COLUMN_NAME = ?2";

/// 计数器播种：不存在时以 MAX(id)+1 建立
fn seed_sql(table: &str, column: &str) -> String {
    format!(
        "INSERT OR IGNORE INTO TK.ID_SEQUENCE (TABLE_NAME, COLUMN_NAME, NEXT_ID) \
         SELECT ?1, ?2, COALESCE(MAX({column}), 0) + 1 FROM {table}"
    )
}

/// 计数器追平：表中已有更大的 id（外部写入）时向前推进
fn catch_up_sql(table: &str, column: &str) -> String {
    format!(
        "UPDATE TK.ID_SEQUENCE SET NEXT_ID = (SELECT COALESCE(MAX({column}), 0) + 1 FROM {table}) \
         WHERE TABLE_NAME = ?1 AND COLUMN_NAME = ?2 \
         AND NEXT_ID <= (SELECT COALESCE(MAX({column}), 0) FROM {table})"
    )
}

const ADVANCE_SQL: &str =
    "UPDATE TK.ID_SEQUENCE SET NEXT_ID = NEXT_ID + 1 WHERE TABLE_NAME = ?1 AND COLUMN_NAME = ?2";

/// 在事务内分配下一个 id
///
/// # 参数
/// - `table`: 带 schema 前缀的表名（如 `TK.ACCESS_TYPE`）
/// - `column`: 代理主键列名
pub fn allocate_id(tx: &Transaction<'_>, table: &str, column: &str) -> RepositoryResult<i64> {
    let key = [Value::Text(table.to_string()), Value::Text(column.to_string())];

    let seed = seed_sql(table, column);
    tx.execute(&seed, rusqlite::params_from_iter(key.iter()))
        .map_err(|e| RepositoryError::statement(&seed, e).logged())?;

    let catch_up = catch_up_sql(table, column);
    tx.execute(&catch_up, rusqlite::params_from_iter(key.iter()))
        .map_err(|e| RepositoryError::statement(&catch_up, e).logged())?;

    let next: i64 = query_optional(tx, NEXT_ID_QUERY, &key, |row| row.get(0))?.ok_or_else(|| {
        RepositoryError::not_found("ID_SEQUENCE", format!("{}.{}", table, column), NEXT_ID_QUERY)
            .logged()
    })?;

    execute_write(tx, ADVANCE_SQL, &key)?;

    tracing::debug!(table = %table, column = %column, next_id = next, "分配代理主键");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn allocate(conn: &mut rusqlite::Connection) -> i64 {
        let tx = conn.transaction().unwrap();
        let id = allocate_id(&tx, "TK.ACCESS_TYPE", "ACCESS_TYPE_ID").unwrap();
        tx.commit().unwrap();
        id
    }

    #[test]
    fn test_allocate_is_monotonic() {
        let mut conn = open_in_memory().unwrap();
        assert_eq!(allocate(&mut conn), 1);
        assert_eq!(allocate(&mut conn), 2);
        assert_eq!(allocate(&mut conn), 3);
    }

    #[test]
    fn test_seed_from_existing_rows() {
        let mut conn = open_in_memory().unwrap();
        conn.execute(
            "INSERT INTO TK.ACCESS_TYPE (ACCESS_TYPE_ID, ACCESS_TYPE) VALUES (40, 'admin')",
            [],
        )
        .unwrap();
        assert_eq!(allocate(&mut conn), 41);
    }

    #[test]
    fn test_ids_not_reused_after_hard_delete() {
        let mut conn = open_in_memory().unwrap();
        let first = allocate(&mut conn);
        conn.execute(
            "INSERT INTO TK.ACCESS_TYPE (ACCESS_TYPE_ID, ACCESS_TYPE) VALUES (?1, 'tmp')",
            [first],
        )
        .unwrap();
        conn.execute("DELETE FROM TK.ACCESS_TYPE", []).unwrap();

        assert_eq!(allocate(&mut conn), first + 1);
    }

    #[test]
    fn test_catch_up_after_external_insert() {
        let mut conn = open_in_memory().unwrap();
        assert_eq!(allocate(&mut conn), 1);
        conn.execute(
            "INSERT INTO TK.ACCESS_TYPE (ACCESS_TYPE_ID, ACCESS_TYPE) VALUES (10, 'external')",
            [],
        )
        .unwrap();
        assert_eq!(allocate(&mut conn), 11);
    }

    #[test]
    fn test_rolled_back_allocation_is_released() {
        let mut conn = open_in_memory().unwrap();
        {
            let tx = conn.transaction().unwrap();
            allocate_id(&tx, "TK.ACCESS_TYPE", "ACCESS_TYPE_ID").unwrap();
            // drop 即回滚
        }
        assert_eq!(allocate(&mut conn), 1);
    }
}
