// ==========================================
// 工具包发布库 - 通用关联表仓储
// ==========================================
// 关联表只有两列外键，无代理主键，物理删除
// 批量查询按另一端实体的身份字符串归集为 HashMap
// ==========================================

use crate::common::db_utils::{execute_write, query_list, query_optional};
use crate::context::TkContext;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::table::{id_value, TableRow};
use rusqlite::types::Value;
use rusqlite::Row;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// 关联表元数据
#[derive(Debug, Clone, Copy)]
pub struct LinkSpec {
    pub entity: &'static str,
    pub table: &'static str,
    /// 左端外键列（指向 Left 实体的 id 列）
    pub left_column: &'static str,
    /// 右端外键列（指向 Right 实体的 id 列）
    pub right_column: &'static str,
}

impl LinkSpec {
    pub fn select_pair_sql(&self) -> String {
        format!(
            "SELECT {l}, {r} FROM {t} WHERE {l} = ?1 AND {r} = ?2",
            l = self.left_column,
            r = self.right_column,
            t = self.table
        )
    }

    pub fn select_by_left_sql(&self) -> String {
        format!(
            "SELECT {l}, {r} FROM {t} WHERE {l} = ?1 ORDER BY {r}",
            l = self.left_column,
            r = self.right_column,
            t = self.table
        )
    }

    pub fn select_by_right_sql(&self) -> String {
        format!(
            "SELECT {l}, {r} FROM {t} WHERE {r} = ?1 ORDER BY {l}",
            l = self.left_column,
            r = self.right_column,
            t = self.table
        )
    }

    pub fn insert_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}, {}) VALUES (?1, ?2)",
            self.table, self.left_column, self.right_column
        )
    }

    pub fn delete_sql(&self) -> String {
        format!(
            "DELETE FROM {} WHERE {} = ?1 AND {} = ?2",
            self.table, self.left_column, self.right_column
        )
    }

    /// 替换右端 id；参数顺序: 新右端, 左端, 旧右端
    pub fn update_right_sql(&self) -> String {
        format!(
            "UPDATE {t} SET {r} = ?1 WHERE {l} = ?2 AND {r} = ?3",
            l = self.left_column,
            r = self.right_column,
            t = self.table
        )
    }

    /// 替换左端 id；参数顺序: 新左端, 旧左端, 右端
    pub fn update_left_sql(&self) -> String {
        format!(
            "UPDATE {t} SET {l} = ?1 WHERE {l} = ?2 AND {r} = ?3",
            l = self.left_column,
            r = self.right_column,
            t = self.table
        )
    }

    /// 经关联表取相关实体的完整行
    ///
    /// - `related_spec`: 相关实体表
    /// - `join_column`: 关联表中指向相关实体的列
    /// - `filter_column`: 关联表中作为查询条件的列
    pub fn select_related_sql<R: TableRow>(&self, join_column: &str, filter_column: &str) -> String {
        let spec = R::SPEC;
        let mut sql = format!(
            "SELECT {cols} FROM {link} x JOIN {t} r ON r.{id} = x.{join} WHERE x.{filter} = ?1",
            cols = spec.select_columns(Some("r")),
            link = self.table,
            t = spec.table,
            id = spec.id_column,
            join = join_column,
            filter = filter_column
        );
        if let Some(live) = spec.live_filter(Some("r")) {
            sql.push_str(" AND ");
            sql.push_str(&live);
        }
        sql.push_str(&format!(" ORDER BY r.{}", spec.id_column));
        sql
    }
}

/// 关联行映射
pub trait LinkRow: Sized {
    type Left: TableRow;
    type Right: TableRow;

    const SPEC: LinkSpec;

    fn from_ids(left: <Self::Left as TableRow>::Id, right: <Self::Right as TableRow>::Id) -> Self;
    fn left_id(&self) -> <Self::Left as TableRow>::Id;
    fn right_id(&self) -> <Self::Right as TableRow>::Id;

    /// 复合身份: 两端 id 以 '-' 连接
    fn identity(&self) -> String {
        format!("{}-{}", self.left_id(), self.right_id())
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self::from_ids(
            row.get(Self::SPEC.left_column)?,
            row.get(Self::SPEC.right_column)?,
        ))
    }
}

// ==========================================
// LinkRepository - 通用关联表仓储
// ==========================================
pub struct LinkRepository<L: LinkRow> {
    ctx: Arc<TkContext>,
    _row: PhantomData<L>,
}

impl<L: LinkRow> Clone for LinkRepository<L> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.ctx))
    }
}

type LeftId<L> = <<L as LinkRow>::Left as TableRow>::Id;
type RightId<L> = <<L as LinkRow>::Right as TableRow>::Id;

impl<L: LinkRow> LinkRepository<L> {
    pub fn new(ctx: Arc<TkContext>) -> Self {
        Self {
            ctx,
            _row: PhantomData,
        }
    }

    fn pair(left: LeftId<L>, right: RightId<L>) -> [Value; 2] {
        [id_value(left), id_value(right)]
    }

    fn pair_key(left: LeftId<L>, right: RightId<L>) -> String {
        format!(
            "{}={}, {}={}",
            L::SPEC.left_column,
            left,
            L::SPEC.right_column,
            right
        )
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按两端 id 查询
    pub fn find(&self, left: LeftId<L>, right: RightId<L>) -> RepositoryResult<Option<L>> {
        let conn = self.ctx.lock()?;
        query_optional(
            &conn,
            &L::SPEC.select_pair_sql(),
            &Self::pair(left, right),
            L::from_row,
        )
    }

    /// 按两端 id 查询，不存在时返回 NotFound
    pub fn get(&self, left: LeftId<L>, right: RightId<L>) -> RepositoryResult<L> {
        self.find(left, right)?.ok_or_else(|| {
            RepositoryError::not_found(
                L::SPEC.entity,
                Self::pair_key(left, right),
                &L::SPEC.select_pair_sql(),
            )
            .logged()
        })
    }

    pub fn exists(&self, left: LeftId<L>, right: RightId<L>) -> RepositoryResult<bool> {
        Ok(self.find(left, right)?.is_some())
    }

    /// 左端对应的全部关联行
    pub fn list_by_left(&self, left: LeftId<L>) -> RepositoryResult<Vec<L>> {
        let conn = self.ctx.lock()?;
        query_list(&conn, &L::SPEC.select_by_left_sql(), &[id_value(left)], L::from_row)
    }

    /// 右端对应的全部关联行
    pub fn list_by_right(&self, right: RightId<L>) -> RepositoryResult<Vec<L>> {
        let conn = self.ctx.lock()?;
        query_list(&conn, &L::SPEC.select_by_right_sql(), &[id_value(right)], L::from_row)
    }

    /// 左端关联的全部右端实体，按右端实体身份字符串归集
    pub fn rights_for_left(&self, left: LeftId<L>) -> RepositoryResult<HashMap<String, L::Right>> {
        let spec = L::SPEC;
        let sql = spec.select_related_sql::<L::Right>(spec.right_column, spec.left_column);
        let conn = self.ctx.lock()?;
        let rows = query_list(&conn, &sql, &[id_value(left)], <L::Right as TableRow>::from_row)?;
        Ok(rows.into_iter().map(|r| (r.key(), r)).collect())
    }

    /// 右端关联的全部左端实体，按左端实体身份字符串归集
    pub fn lefts_for_right(&self, right: RightId<L>) -> RepositoryResult<HashMap<String, L::Left>> {
        let spec = L::SPEC;
        let sql = spec.select_related_sql::<L::Left>(spec.left_column, spec.right_column);
        let conn = self.ctx.lock()?;
        let rows = query_list(&conn, &sql, &[id_value(right)], <L::Left as TableRow>::from_row)?;
        Ok(rows.into_iter().map(|r| (r.key(), r)).collect())
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 新增关联
    pub fn insert(&self, left: LeftId<L>, right: RightId<L>) -> RepositoryResult<L> {
        let conn = self.ctx.lock()?;
        execute_write(&conn, &L::SPEC.insert_sql(), &Self::pair(left, right))?;
        tracing::info!(entity = L::SPEC.entity, key = %Self::pair_key(left, right), "新增关联");
        Ok(L::from_ids(left, right))
    }

    /// 删除关联
    pub fn delete(&self, left: LeftId<L>, right: RightId<L>) -> RepositoryResult<()> {
        let conn = self.ctx.lock()?;
        execute_write(&conn, &L::SPEC.delete_sql(), &Self::pair(left, right))?;
        tracing::info!(entity = L::SPEC.entity, key = %Self::pair_key(left, right), "删除关联");
        Ok(())
    }

    /// 把关联的右端改为 `new_right`，成功后同步修改 `link`
    pub fn update_right(&self, link: &mut L, new_right: RightId<L>) -> RepositoryResult<()> {
        let (left, old_right) = (link.left_id(), link.right_id());
        let values = [id_value(new_right), id_value(left), id_value(old_right)];

        let conn = self.ctx.lock()?;
        execute_write(&conn, &L::SPEC.update_right_sql(), &values)?;
        tracing::info!(
            entity = L::SPEC.entity,
            key = %Self::pair_key(left, old_right),
            new_right = %new_right,
            "更新关联"
        );

        *link = L::from_ids(left, new_right);
        Ok(())
    }

    /// 把关联的左端改为 `new_left`，成功后同步修改 `link`
    pub fn update_left(&self, link: &mut L, new_left: LeftId<L>) -> RepositoryResult<()> {
        let (old_left, right) = (link.left_id(), link.right_id());
        let values = [id_value(new_left), id_value(old_left), id_value(right)];

        let conn = self.ctx.lock()?;
        execute_write(&conn, &L::SPEC.update_left_sql(), &values)?;
        tracing::info!(
            entity = L::SPEC.entity,
            key = %Self::pair_key(old_left, right),
            new_left = %new_left,
            "更新关联"
        );

        *link = L::from_ids(new_left, right);
        Ok(())
    }
}
