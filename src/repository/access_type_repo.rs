// ==========================================
// 工具包发布库 - 访问类型仓储
// ==========================================
// 表: TK.ACCESS_TYPE（无审计列，物理删除）
// ==========================================

use crate::domain::names::AccessType;
use crate::repository::table::{AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.ACCESS_TYPE";
pub const ID_COL: &str = "ACCESS_TYPE_ID";
pub const NAME_COL: &str = "ACCESS_TYPE";

impl TableRow for AccessType {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "AccessType",
        table: TABLE,
        id_column: ID_COL,
        name_column: Some(NAME_COL),
        columns: &[ID_COL, NAME_COL],
        audit: AuditColumns::None,
        delete_mode: DeleteMode::Hard,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AccessType {
            id: row.get(ID_COL)?,
            name: row.get(NAME_COL)?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![Value::from(id), Value::Text(self.name.clone())]
    }
}

/// 访问类型仓储
pub type AccessTypeRepository = TableRepository<AccessType>;

impl AccessType {
    /// 未落库的新实体（id 由仓储分配）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TkContext;

    #[test]
    fn test_add_lookup_rename_delete() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = AccessTypeRepository::new(ctx);

        let mut added = repo.insert(&AccessType::new("read")).unwrap();
        assert_eq!(added.id, 1);
        assert_eq!(repo.get_by_id(added.id).unwrap(), added);
        assert_eq!(repo.get_by_name("read").unwrap(), added);

        repo.rename(&mut added, "write").unwrap();
        assert_eq!(added.name, "write");
        assert!(repo.find_by_name("read").unwrap().is_none());

        repo.delete(added.id).unwrap();
        assert!(repo.get_by_id(added.id).unwrap_err().is_not_found());
        // 物理删除: 原始读取也看不到
        assert!(repo.find_including_deleted(added.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_row_is_write_failure() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = AccessTypeRepository::new(ctx);
        let err = repo.delete(99).unwrap_err();
        assert!(matches!(err, crate::repository::RepositoryError::WriteFailed { .. }));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = AccessTypeRepository::new(ctx);
        repo.insert(&AccessType::new("read")).unwrap();
        assert!(repo.insert(&AccessType::new("read")).is_err());
        // 失败事务回滚，计数器不前进
        assert_eq!(repo.insert(&AccessType::new("admin")).unwrap().id, 2);
    }

    #[test]
    fn test_id_beyond_i16_is_overflow() {
        let ctx = TkContext::in_memory("tester").unwrap();
        ctx.lock()
            .unwrap()
            .execute(
                "INSERT INTO TK.ACCESS_TYPE (ACCESS_TYPE_ID, ACCESS_TYPE) VALUES (32767, 'max')",
                [],
            )
            .unwrap();
        let repo = AccessTypeRepository::new(ctx.clone());

        for _ in 0..2 {
            let err = repo.insert(&AccessType::new("next")).unwrap_err();
            assert!(matches!(
                err,
                crate::repository::RepositoryError::IdOverflow { value: 32768, .. }
            ));
        }

        // 整个事务回滚: 计数器未落库，也没有插入新行
        let conn = ctx.lock().unwrap();
        let counters: i64 = conn
            .query_row("SELECT COUNT(*) FROM TK.ID_SEQUENCE", [], |row| row.get(0))
            .unwrap();
        assert_eq!(counters, 0);
        drop(conn);
        assert!(repo.find_by_name("next").unwrap().is_none());
    }
}
