// ==========================================
// 工具包发布库 - 功能更新仓储
// ==========================================
// 表: TK.FUNCTIONALUPDATE（只追加，仅 CREATED_BY/CREATED_ON）
// ==========================================

use crate::domain::change_request::FunctionalUpdate;
use crate::repository::table::{
    AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec, CREATED_BY, CREATED_ON,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.FUNCTIONALUPDATE";
pub const ID_COL: &str = "FUNCTIONALUPDATE_ID";
pub const DESC_COL: &str = "DESCRIPTION";

impl TableRow for FunctionalUpdate {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "FunctionalUpdate",
        table: TABLE,
        id_column: ID_COL,
        name_column: None,
        columns: &[ID_COL, DESC_COL],
        audit: AuditColumns::Created,
        delete_mode: DeleteMode::Never,
        updatable: false,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FunctionalUpdate {
            id: row.get(ID_COL)?,
            description: row.get(DESC_COL)?,
            created_by: row.get(CREATED_BY)?,
            created_on: row.get(CREATED_ON)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![Value::from(id), Value::Text(self.description.clone())]
    }
}

/// 功能更新仓储
pub type FunctionalUpdateRepository = TableRepository<FunctionalUpdate>;

impl FunctionalUpdate {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
            created_by: None,
            created_on: None,
        }
    }
}
