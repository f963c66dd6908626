// ==========================================
// 工具包发布库 - 代码更新状态名仓储
// ==========================================
// 表: TK.CODEUPDATE_STATUS_NAME（审计列，软删除）
// ==========================================

use crate::domain::names::CodeUpdateStatusName;
use crate::domain::types::AuditInfo;
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.CODEUPDATE_STATUS_NAME";
pub const ID_COL: &str = "CODEUPDATE_STATUS_NAME_ID";
pub const NAME_COL: &str = "CODEUPDATE_STATUS_NAME";
pub const DESC_COL: &str = "DESCRIPTION";

impl TableRow for CodeUpdateStatusName {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "CodeUpdateStatusName",
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
        Ok(CodeUpdateStatusName {
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

/// 代码更新状态名仓储
pub type CodeUpdateStatusNameRepository = TableRepository<CodeUpdateStatusName>;

impl CodeUpdateStatusName {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description,
            audit: AuditInfo::default(),
        }
    }
}

impl TableRepository<CodeUpdateStatusName> {
    /// 修改说明
    pub fn update_description(
        &self,
        row: &mut CodeUpdateStatusName,
        description: Option<&str>,
    ) -> RepositoryResult<()> {
        self.update_columns(row, &[(DESC_COL, Value::from(description.map(String::from)))])
    }
}
