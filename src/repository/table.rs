// ==========================================
// 工具包发布库 - 通用表仓储
// ==========================================
// 职责: 按 TableSpec 元数据为任意实体表提供
//       按 id/名称查询、新增、更新、删除
// 约束: SQL 由纯函数生成，语句只在单次调用内存活
// 约束: 软删除表的查询一律带 DELETED_ON IS NULL
// ==========================================

use crate::common::db_utils::{execute_write, query_list, query_optional};
use crate::common::sql_builder::{column_list, placeholders};
use crate::context::TkContext;
use crate::domain::types::{AuditInfo, EntityKey};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::id_allocator::allocate_id;
use chrono::{Local, NaiveDateTime};
use rusqlite::types::{FromSql, Value};
use rusqlite::{Connection, Row, ToSql, TransactionBehavior};
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

/// 审计列名
pub const CREATED_BY: &str = "CREATED_BY";
pub const CREATED_ON: &str = "CREATED_ON";
pub const UPDATED_BY: &str = "UPDATED_BY";
pub const UPDATED_ON: &str = "UPDATED_ON";
pub const DELETED_BY: &str = "DELETED_BY";
pub const DELETED_ON: &str = "DELETED_ON";

const FULL_AUDIT_COLUMNS: [&str; 6] = [
    CREATED_BY, CREATED_ON, UPDATED_BY, UPDATED_ON, DELETED_BY, DELETED_ON,
];
const CREATED_COLUMNS: [&str; 2] = [CREATED_BY, CREATED_ON];

/// 删除方式（按表区分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// 物理删除
    Hard,
    /// 写 DELETED_BY/DELETED_ON，行保留
    Soft,
    /// 只追加表，不允许删除
    Never,
}

/// 由仓储维护的审计列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditColumns {
    None,
    /// 仅 CREATED_BY/CREATED_ON
    Created,
    /// 全部六列
    Full,
}

/// 表元数据
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// 实体名（日志/错误信息用）
    pub entity: &'static str,
    pub table: &'static str,
    pub id_column: &'static str,
    /// 业务名称列（按名称查询用）
    pub name_column: Option<&'static str>,
    /// 业务列，首列为 id 列，不含审计列
    pub columns: &'static [&'static str],
    pub audit: AuditColumns,
    pub delete_mode: DeleteMode,
    pub updatable: bool,
}

impl TableSpec {
    fn managed_columns(&self) -> &'static [&'static str] {
        match self.audit {
            AuditColumns::None => &[],
            AuditColumns::Created => &CREATED_COLUMNS,
            AuditColumns::Full => &FULL_AUDIT_COLUMNS,
        }
    }

    /// SELECT 列清单；带别名时输出 `a.COL AS COL`，保证按列名取值
    pub fn select_columns(&self, alias: Option<&str>) -> String {
        self.columns
            .iter()
            .chain(self.managed_columns().iter())
            .map(|c| match alias {
                Some(a) => format!("{}.{} AS {}", a, c, c),
                None => c.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 未删除行过滤条件（仅软删除表）
    pub fn live_filter(&self, alias: Option<&str>) -> Option<String> {
        if self.delete_mode != DeleteMode::Soft {
            return None;
        }
        Some(match alias {
            Some(a) => format!("{}.{} IS NULL", a, DELETED_ON),
            None => format!("{} IS NULL", DELETED_ON),
        })
    }

    fn with_live_filter(&self, sql: String) -> String {
        match self.live_filter(None) {
            Some(filter) => format!("{} AND {}", sql, filter),
            None => sql,
        }
    }

    pub fn select_by_id_sql(&self) -> String {
        self.with_live_filter(format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.select_columns(None),
            self.table,
            self.id_column
        ))
    }

    /// 按 id 查询，不过滤软删除行
    pub fn select_by_id_any_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.select_columns(None),
            self.table,
            self.id_column
        )
    }

    pub fn select_by_name_sql(&self) -> Option<String> {
        let name_column = self.name_column?;
        Some(self.with_live_filter(format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            self.select_columns(None),
            self.table,
            name_column
        )))
    }

    /// 按附加条件查询（条件中的占位符从 ?1 开始）
    pub fn select_where_sql(&self, condition: &str) -> String {
        format!(
            "{} ORDER BY {}",
            self.with_live_filter(format!(
                "SELECT {} FROM {} WHERE ({})",
                self.select_columns(None),
                self.table,
                condition
            )),
            self.id_column
        )
    }

    pub fn select_all_sql(&self) -> String {
        self.select_where_sql("1 = 1")
    }

    pub fn insert_sql(&self) -> String {
        let mut columns: Vec<&str> = self.columns.to_vec();
        if self.audit != AuditColumns::None {
            columns.extend_from_slice(&CREATED_COLUMNS);
        }
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            column_list(&columns, None),
            placeholders(columns.len())
        )
    }

    /// UPDATE 语句；参数顺序: 各 set 列值, [UPDATED_BY, UPDATED_ON], id
    pub fn update_sql(&self, set_columns: &[&str]) -> String {
        let mut assignments: Vec<String> = set_columns.iter().map(|c| c.to_string()).collect();
        if self.audit == AuditColumns::Full {
            assignments.push(UPDATED_BY.to_string());
            assignments.push(UPDATED_ON.to_string());
        }
        let set_clause = assignments
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ?{}", c, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        self.with_live_filter(format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            self.table,
            set_clause,
            self.id_column,
            assignments.len() + 1
        ))
    }

    /// 删除语句；软删除参数顺序: DELETED_BY, DELETED_ON, id
    pub fn delete_sql(&self) -> Option<String> {
        match self.delete_mode {
            DeleteMode::Hard => Some(format!(
                "DELETE FROM {} WHERE {} = ?1",
                self.table, self.id_column
            )),
            DeleteMode::Soft => Some(format!(
                "UPDATE {} SET {} = ?1, {} = ?2 WHERE {} = ?3 AND {} IS NULL",
                self.table, DELETED_BY, DELETED_ON, self.id_column, DELETED_ON
            )),
            DeleteMode::Never => None,
        }
    }
}

/// 表行映射
pub trait TableRow: Sized {
    /// id 列类型（i16 或 i64，取决于表的容量预期）
    type Id: ToSql + FromSql + Copy + Display + TryFrom<i64> + Into<i64>;

    const SPEC: TableSpec;

    fn id(&self) -> Self::Id;

    /// 按列名从结果行填充实体
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// 按 SPEC.columns 顺序给出插入值；首列使用新分配的 id
    fn insert_values(&self, id: Self::Id) -> Vec<Value>;

    /// 实体身份字符串（批量查询结果的键）
    fn key(&self) -> String {
        self.id().to_string()
    }
}

/// 读取全部六个审计列
pub fn audit_from_row(row: &Row<'_>) -> rusqlite::Result<AuditInfo> {
    Ok(AuditInfo {
        created_by: row.get(CREATED_BY)?,
        created_on: row.get(CREATED_ON)?,
        updated_by: row.get(UPDATED_BY)?,
        updated_on: row.get(UPDATED_ON)?,
        deleted_by: row.get(DELETED_BY)?,
        deleted_on: row.get(DELETED_ON)?,
    })
}

/// 审计时间戳
pub fn now_timestamp() -> NaiveDateTime {
    Local::now().naive_local()
}

/// 时间戳存储形式
pub fn timestamp_value(ts: NaiveDateTime) -> Value {
    Value::Text(ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
}

pub fn id_value<I: Into<i64>>(id: I) -> Value {
    Value::Integer(id.into())
}

// ==========================================
// TableRepository - 通用表仓储
// ==========================================
pub struct TableRepository<T: TableRow> {
    ctx: Arc<TkContext>,
    _row: PhantomData<T>,
}

impl<T: TableRow> Clone for TableRepository<T> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.ctx))
    }
}

impl<T: TableRow> TableRepository<T> {
    pub fn new(ctx: Arc<TkContext>) -> Self {
        Self {
            ctx,
            _row: PhantomData,
        }
    }

    pub fn context(&self) -> &Arc<TkContext> {
        &self.ctx
    }

    pub(crate) fn load_by_id(conn: &Connection, id: T::Id) -> RepositoryResult<Option<T>> {
        query_optional(conn, &T::SPEC.select_by_id_sql(), &[id_value(id)], T::from_row)
    }

    fn id_from_i64(value: i64) -> RepositoryResult<T::Id> {
        T::Id::try_from(value).map_err(|_| {
            RepositoryError::IdOverflow {
                table: T::SPEC.table.to_string(),
                column: T::SPEC.id_column.to_string(),
                value,
            }
            .logged()
        })
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 id 查询
    ///
    /// # 返回
    /// - Ok(Some(T)): 找到
    /// - Ok(None): 不存在（或已软删除）
    /// - Err: 数据库错误
    pub fn find_by_id(&self, id: T::Id) -> RepositoryResult<Option<T>> {
        let conn = self.ctx.lock()?;
        Self::load_by_id(&conn, id)
    }

    /// 按 id 查询，不存在时返回 NotFound
    pub fn get_by_id(&self, id: T::Id) -> RepositoryResult<T> {
        self.find_by_id(id)?.ok_or_else(|| {
            RepositoryError::not_found(
                T::SPEC.entity,
                format!("{}={}", T::SPEC.id_column, id),
                &T::SPEC.select_by_id_sql(),
            )
            .logged()
        })
    }

    /// 按业务名称查询
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<T>> {
        let sql = T::SPEC
            .select_by_name_sql()
            .ok_or_else(|| RepositoryError::unsupported(T::SPEC.entity, "按名称查询").logged())?;
        let conn = self.ctx.lock()?;
        query_optional(&conn, &sql, &[Value::Text(name.to_string())], T::from_row)
    }

    /// 按业务名称查询，不存在时返回 NotFound
    pub fn get_by_name(&self, name: &str) -> RepositoryResult<T> {
        self.find_by_name(name)?.ok_or_else(|| {
            RepositoryError::not_found(
                T::SPEC.entity,
                format!("{}={}", T::SPEC.name_column.unwrap_or("NAME"), name),
                &T::SPEC.select_by_name_sql().unwrap_or_default(),
            )
            .logged()
        })
    }

    /// 按未加载的实体引用查询
    pub fn get(&self, key: &EntityKey) -> RepositoryResult<T> {
        match key {
            EntityKey::Id(id) => self.get_by_id(Self::id_from_i64(*id)?),
            EntityKey::Name(name) => self.get_by_name(name),
        }
    }

    /// 按 id 读取原始行（含已软删除行）
    pub fn find_including_deleted(&self, id: T::Id) -> RepositoryResult<Option<T>> {
        let conn = self.ctx.lock()?;
        query_optional(&conn, &T::SPEC.select_by_id_any_sql(), &[id_value(id)], T::from_row)
    }

    /// 全部未删除行，按 id 排序
    pub fn find_all(&self) -> RepositoryResult<Vec<T>> {
        let conn = self.ctx.lock()?;
        query_list(&conn, &T::SPEC.select_all_sql(), &[], T::from_row)
    }

    /// 按附加条件查询（供各实体仓储复用）
    pub fn find_where(&self, condition: &str, params: &[Value]) -> RepositoryResult<Vec<T>> {
        let conn = self.ctx.lock()?;
        query_list(&conn, &T::SPEC.select_where_sql(condition), params, T::from_row)
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 新增一行
    ///
    /// 在同一个 IMMEDIATE 事务内分配 id 并插入，提交后按新 id 重新读取。
    /// 传入实体的 id 字段被忽略。
    pub fn insert(&self, row: &T) -> RepositoryResult<T> {
        let spec = T::SPEC;
        let sql = spec.insert_sql();

        let mut conn = self.ctx.lock()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| RepositoryError::statement("BEGIN IMMEDIATE", e).logged())?;

        let next = allocate_id(&tx, spec.table, spec.id_column)?;
        let id = Self::id_from_i64(next)?;

        let mut values = row.insert_values(id);
        if spec.audit != AuditColumns::None {
            values.push(Value::Text(self.ctx.actor().to_string()));
            values.push(timestamp_value(now_timestamp()));
        }
        execute_write(&tx, &sql, &values)?;

        tx.commit()
            .map_err(|e| RepositoryError::write_failed(&sql, e.to_string()).logged())?;

        tracing::info!(entity = spec.entity, id = %id, "新增记录");

        Self::load_by_id(&conn, id)?.ok_or_else(|| {
            RepositoryError::not_found(spec.entity, format!("{}={}", spec.id_column, id), &sql).logged()
        })
    }

    /// 更新指定列，成功后用库中最新值覆盖 `row`
    pub fn update_columns(&self, row: &mut T, changes: &[(&str, Value)]) -> RepositoryResult<()> {
        let spec = T::SPEC;
        if !spec.updatable {
            return Err(RepositoryError::unsupported(spec.entity, "更新").logged());
        }

        let set_columns: Vec<&str> = changes.iter().map(|(c, _)| *c).collect();
        let sql = spec.update_sql(&set_columns);

        let mut values: Vec<Value> = changes.iter().map(|(_, v)| v.clone()).collect();
        if spec.audit == AuditColumns::Full {
            values.push(Value::Text(self.ctx.actor().to_string()));
            values.push(timestamp_value(now_timestamp()));
        }
        values.push(id_value(row.id()));

        let id = row.id();
        let conn = self.ctx.lock()?;
        execute_write(&conn, &sql, &values)?;

        tracing::info!(entity = spec.entity, id = %id, columns = ?set_columns, "更新记录");

        *row = Self::load_by_id(&conn, id)?.ok_or_else(|| {
            RepositoryError::not_found(spec.entity, format!("{}={}", spec.id_column, id), &sql)
                .logged()
        })?;
        Ok(())
    }

    /// 修改业务名称
    pub fn rename(&self, row: &mut T, name: &str) -> RepositoryResult<()> {
        let name_column = T::SPEC
            .name_column
            .ok_or_else(|| RepositoryError::unsupported(T::SPEC.entity, "改名").logged())?;
        self.update_columns(row, &[(name_column, Value::Text(name.to_string()))])
    }

    /// 删除（物理删除或软删除，取决于表）
    pub fn delete(&self, id: T::Id) -> RepositoryResult<()> {
        let spec = T::SPEC;
        let sql = spec
            .delete_sql()
            .ok_or_else(|| RepositoryError::unsupported(spec.entity, "删除").logged())?;

        let values = match spec.delete_mode {
            DeleteMode::Soft => vec![
                Value::Text(self.ctx.actor().to_string()),
                timestamp_value(now_timestamp()),
                id_value(id),
            ],
            _ => vec![id_value(id)],
        };

        let conn = self.ctx.lock()?;
        execute_write(&conn, &sql, &values)?;

        tracing::info!(entity = spec.entity, id = %id, mode = ?spec.delete_mode, "删除记录");
        Ok(())
    }
}
