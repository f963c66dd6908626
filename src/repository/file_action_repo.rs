// ==========================================
// 工具包发布库 - 文件动作名仓储
// ==========================================
// 表: TK.FILE_ACTION_NAME（审计列，软删除）
// 附加属性: SVN_ACTION_NAME
// ==========================================

use crate::domain::names::FileActionName;
use crate::domain::types::AuditInfo;
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.FILE_ACTION_NAME";
pub const ID_COL: &str = "FILE_ACTION_NAME_ID";
pub const NAME_COL: &str = "FILE_ACTION_NAME";
pub const SVN_ACTION_COL: &str = "SVN_ACTION_NAME";

impl TableRow for FileActionName {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "FileActionName",
        table: TABLE,
        id_column: ID_COL,
        name_column: Some(NAME_COL),
        columns: &[ID_COL, NAME_COL, SVN_ACTION_COL],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FileActionName {
            id: row.get(ID_COL)?,
            name: row.get(NAME_COL)?,
            svn_action: row.get(SVN_ACTION_COL)?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::Text(self.name.clone()),
            Value::from(self.svn_action.clone()),
        ]
    }
}

/// 文件动作名仓储
pub type FileActionNameRepository = TableRepository<FileActionName>;

impl FileActionName {
    pub fn new(name: impl Into<String>, svn_action: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            svn_action,
            audit: AuditInfo::default(),
        }
    }
}

impl TableRepository<FileActionName> {
    /// 修改对应的 SVN 动作名
    pub fn update_svn_action(&self, row: &mut FileActionName, svn_action: &str) -> RepositoryResult<()> {
        self.update_columns(row, &[(SVN_ACTION_COL, Value::Text(svn_action.to_string()))])
    }

    /// 按 SVN 动作名反查（未删除行）
    pub fn find_by_svn_action(&self, svn_action: &str) -> RepositoryResult<Vec<FileActionName>> {
        self.find_where(
            &format!("{} = ?1", SVN_ACTION_COL),
            &[Value::Text(svn_action.to_string())],
        )
    }
}
