// ==========================================
// 工具包发布库 - 事件名仓储
// ==========================================
// 表: TK.EVENT_NAME（审计列，软删除）
// ==========================================

use crate::domain::names::EventName;
use crate::domain::types::AuditInfo;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.EVENT_NAME";
pub const ID_COL: &str = "EVENT_NAME_ID";
pub const NAME_COL: &str = "EVENT_NAME";
pub const DESC_COL: &str = "DESCRIPTION";

impl TableRow for EventName {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "EventName",
        table: TABLE,
        id_column: ID_COL,
        name_column: Some(NAME_COL),
        columns: &[ID_COL, NAME_COL, DESC_COL],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(EventName {
            id: row.get(ID_COL)?,
            name: row.get(NAME_COL)?,
            description: row.get(DESC_COL)?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::Text(self.name.clone()),
            Value::from(self.description.clone()),
        ]
    }
}

/// 事件名仓储
pub type EventNameRepository = TableRepository<EventName>;

impl EventName {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description,
            audit: AuditInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TkContext;
    use crate::repository::RepositoryError;

    #[test]
    fn test_live_name_is_unique() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = EventNameRepository::new(ctx);

        let first = repo.insert(&EventName::new("BUILD", Some("first".into()))).unwrap();
        let err = repo
            .insert(&EventName::new("BUILD", Some("second".into())))
            .unwrap_err();
        assert!(matches!(err, RepositoryError::WriteFailed { .. }));

        // 名称仍唯一对应第一行
        assert_eq!(repo.get_by_name("BUILD").unwrap(), first);
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_rename_onto_live_name_rejected() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = EventNameRepository::new(ctx);

        repo.insert(&EventName::new("BUILD", None)).unwrap();
        let mut other = repo.insert(&EventName::new("TEST", None)).unwrap();

        assert!(repo.rename(&mut other, "BUILD").is_err());
        assert_eq!(other.name, "TEST");
        assert_eq!(repo.get_by_id(other.id).unwrap().name, "TEST");
    }

    #[test]
    fn test_soft_deleted_name_can_be_reused() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = EventNameRepository::new(ctx);

        let old = repo.insert(&EventName::new("BUILD", Some("old".into()))).unwrap();
        repo.delete(old.id).unwrap();

        let new = repo.insert(&EventName::new("BUILD", Some("new".into()))).unwrap();
        assert_ne!(new.id, old.id);
        assert_eq!(repo.get_by_name("BUILD").unwrap(), new);
        assert_eq!(repo.get_by_id(new.id).unwrap(), repo.get_by_name("BUILD").unwrap());
        assert!(repo.find_including_deleted(old.id).unwrap().is_some());
    }
}
