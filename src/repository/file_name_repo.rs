// ==========================================
// 工具包发布库 - 文件名仓储
// ==========================================
// 表: TK.FILE_NAME（只追加，FILE_NAME 唯一）
// ==========================================

use crate::domain::file::FileName;
use crate::repository::error::RepositoryResult;
use crate::repository::table::{AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.FILE_NAME";
pub const ID_COL: &str = "FILE_NAME_ID";
pub const NAME_COL: &str = "FILE_NAME";

impl TableRow for FileName {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "FileName",
        table: TABLE,
        id_column: ID_COL,
        name_column: Some(NAME_COL),
        columns: &[ID_COL, NAME_COL],
        audit: AuditColumns::None,
        delete_mode: DeleteMode::Never,
        updatable: false,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FileName {
            id: row.get(ID_COL)?,
            name: row.get(NAME_COL)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![Value::from(id), Value::Text(self.name.clone())]
    }
}

/// 文件名仓储
pub type FileNameRepository = TableRepository<FileName>;

impl FileName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

impl TableRepository<FileName> {
    /// 按名称取文件名行，不存在时新增
    pub fn get_or_insert(&self, name: &str) -> RepositoryResult<FileName> {
        if let Some(existing) = self.find_by_name(name)? {
            return Ok(existing);
        }
        self.insert(&FileName::new(name))
    }
}
