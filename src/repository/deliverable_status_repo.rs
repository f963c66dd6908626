// ==========================================
// 工具包发布库 - 交付物更新状态名仓储
// ==========================================
// 表: TK.DELIVERABLEUPDATE_STATUS_NAME（审计列，软删除）
// ==========================================

use crate::domain::names::DeliverableUpdateStatusName;
use crate::domain::types::AuditInfo;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.DELIVERABLEUPDATE_STATUS_NAME";
pub const ID_COL: &str = "DELIVERABLEUPDATE_STATUS_NAME_ID";
pub const NAME_COL: &str = "DELIVERABLEUPDATE_STATUS_NAME";
pub const DESC_COL: &str = "DESCRIPTION";

impl TableRow for DeliverableUpdateStatusName {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "DeliverableUpdateStatusName",
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
        Ok(DeliverableUpdateStatusName {
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

/// 交付物更新状态名仓储
pub type DeliverableUpdateStatusNameRepository = TableRepository<DeliverableUpdateStatusName>;

impl DeliverableUpdateStatusName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            audit: AuditInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TkContext;

    #[test]
    fn test_lookup_by_id_and_name_agree() {
        let ctx = TkContext::in_memory("tester").unwrap();
        let repo = DeliverableUpdateStatusNameRepository::new(ctx);

        repo.insert(&DeliverableUpdateStatusName::new("SHIPPED")).unwrap();
        let staged = repo.insert(&DeliverableUpdateStatusName::new("STAGED")).unwrap();

        assert_eq!(repo.get_by_id(staged.id).unwrap(), repo.get_by_name("STAGED").unwrap());
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }
}
