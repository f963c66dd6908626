// ==========================================
// 工具包发布库 - 语句工具模块
// ==========================================
// 职责: 准备语句、绑定参数、执行、收集结果
// 约束: 语句句柄只在单次调用内存活，任何退出路径都会释放
// 约束: 所有错误先写日志（附 SQL 文本）再返回
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Statement};

/// 准备语句
///
/// # 返回
/// - Ok(Statement): 已准备的语句，随作用域结束释放
/// - Err(Statement): 驱动拒绝该 SQL
pub fn prep_statement<'c>(conn: &'c Connection, sql: &str) -> RepositoryResult<Statement<'c>> {
    tracing::debug!(query = %sql, "准备语句");
    conn.prepare(sql)
        .map_err(|e| RepositoryError::statement(sql, e).logged())
}

/// 无类型结果集（列名 + 行值）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 执行已准备的语句
///
/// # 返回
/// - Ok(Some(ResultTable)): 语句产生结果集
/// - Ok(None): 语句不产生结果集（DML/DDL）
/// - Err: 绑定或执行失败
pub fn execute(stmt: &mut Statement<'_>, params: &[Value]) -> RepositoryResult<Option<ResultTable>> {
    bind_all(stmt, params)?;

    // 绑定后展开，错误记录中带实际参数值
    let query = stmt.expanded_sql().unwrap_or_default();
    let wrap = |e: rusqlite::Error| RepositoryError::statement(&query, e).logged();

    if stmt.column_count() == 0 {
        stmt.raw_execute().map_err(wrap)?;
        return Ok(None);
    }

    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let mut table = ResultTable {
        columns,
        rows: Vec::new(),
    };

    let mut rows = stmt.raw_query();
    while let Some(row) = rows.next().map_err(wrap)? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(row.get::<_, Value>(idx).map_err(wrap)?);
        }
        table.rows.push(values);
    }

    Ok(Some(table))
}

/// 按位置绑定全部参数，数量必须与占位符一致
fn bind_all(stmt: &mut Statement<'_>, params: &[Value]) -> RepositoryResult<()> {
    let expected = stmt.parameter_count();
    if params.len() != expected {
        let query = stmt.expanded_sql().unwrap_or_default();
        return Err(RepositoryError::statement(
            &query,
            rusqlite::Error::InvalidParameterCount(params.len(), expected),
        )
        .logged());
    }

    for (idx, value) in params.iter().enumerate() {
        if let Err(e) = stmt.raw_bind_parameter(idx + 1, value) {
            let query = stmt.expanded_sql().unwrap_or_default();
            return Err(RepositoryError::statement(&query, e).logged());
        }
    }
    Ok(())
}

/// 查询至多一行
///
/// # 返回
/// - Ok(Some(T)): 命中（多行时取第一行）
/// - Ok(None): 无记录
/// - Err: 语句失败或行映射失败
pub fn query_optional<T, F>(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    mut mapper: F,
) -> RepositoryResult<Option<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let wrap = |e: rusqlite::Error| RepositoryError::statement(sql, e).logged();

    let mut stmt = prep_statement(conn, sql)?;
    let mut rows = stmt.query(params_from_iter(params.iter())).map_err(wrap)?;
    match rows.next().map_err(wrap)? {
        Some(row) => Ok(Some(mapper(row).map_err(wrap)?)),
        None => Ok(None),
    }
}

/// 查询多行
pub fn query_list<T, F>(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    mapper: F,
) -> RepositoryResult<Vec<T>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let wrap = |e: rusqlite::Error| RepositoryError::statement(sql, e).logged();

    let mut stmt = prep_statement(conn, sql)?;
    let items = stmt
        .query_map(params_from_iter(params.iter()), mapper)
        .map_err(wrap)?
        .collect::<rusqlite::Result<Vec<T>>>()
        .map_err(wrap)?;
    Ok(items)
}

/// 执行写语句（INSERT/UPDATE/DELETE）
///
/// 影响 0 行视为写入失败
pub fn execute_write(conn: &Connection, sql: &str, params: &[Value]) -> RepositoryResult<usize> {
    tracing::debug!(query = %sql, "执行写语句");
    let mut stmt = prep_statement(conn, sql)?;
    let affected = stmt
        .execute(params_from_iter(params.iter()))
        .map_err(|e| RepositoryError::write_failed(sql, e.to_string()).logged())?;

    if affected == 0 {
        return Err(RepositoryError::write_failed(sql, "影响 0 行").logged());
    }
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO t VALUES (1, 'a'), (2, 'b');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_prep_statement_rejects_bad_sql() {
        let conn = setup();
        let err = prep_statement(&conn, "SELEKT * FROM t").err().unwrap();
        assert!(matches!(err, RepositoryError::Statement { .. }));
        assert_eq!(err.query(), Some("SELEKT * FROM t"));
    }

    #[test]
    fn test_execute_returns_result_set() {
        let conn = setup();
        let mut stmt = prep_statement(&conn, "SELECT id, name FROM t ORDER BY id").unwrap();
        let table = execute(&mut stmt, &[]).unwrap().unwrap();

        assert_eq!(table.columns, vec!["id".to_string(), "name".to_string()]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][1], Value::Text("b".to_string()));
    }

    #[test]
    fn test_execute_without_result_set() {
        let conn = setup();
        let mut stmt = prep_statement(&conn, "UPDATE t SET name = ?1 WHERE id = 1").unwrap();
        let result = execute(&mut stmt, &[Value::from("z".to_string())]).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_execute_error_carries_bound_values() {
        let conn = setup();
        let mut stmt = prep_statement(&conn, "INSERT INTO t (id, name) VALUES (?1, ?2)").unwrap();
        let err = execute(&mut stmt, &[Value::Integer(1), Value::from("clash".to_string())])
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Statement { .. }));
        let query = err.query().unwrap();
        assert!(query.contains("'clash'"), "{}", query);
        assert!(!query.contains("NULL"), "{}", query);
    }

    #[test]
    fn test_execute_rejects_wrong_parameter_count() {
        let conn = setup();
        let mut stmt = prep_statement(&conn, "SELECT name FROM t WHERE id = ?1").unwrap();
        let err = execute(&mut stmt, &[]).unwrap_err();
        assert!(matches!(err, RepositoryError::Statement { .. }));
    }

    #[test]
    fn test_query_optional_none() {
        let conn = setup();
        let found = query_optional(&conn, "SELECT name FROM t WHERE id = ?1", &[Value::Integer(9)], |row| {
            row.get::<_, String>(0)
        })
        .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_execute_write_zero_rows_fails() {
        let conn = setup();
        let err = execute_write(&conn, "DELETE FROM t WHERE id = ?1", &[Value::Integer(9)]).unwrap_err();
        assert!(matches!(err, RepositoryError::WriteFailed { .. }));

        let affected = execute_write(&conn, "DELETE FROM t WHERE id = ?1", &[Value::Integer(1)]).unwrap();
        assert_eq!(affected, 1);
    }
}
