// ==========================================
// 工具包发布库 - 文件内容仓储
// ==========================================
// 表: TK.FILE_CONTENT（只追加）
// 外键: FILE_NAME_ID -> TK.FILE_NAME
// 时间戳 CREATED_ON/MODIFIED_ON 由本表自带，不走通用审计列
// ==========================================

use crate::domain::file::{FileContent, FileName};
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    now_timestamp, timestamp_value, AuditColumns, DeleteMode, TableRepository, TableRow,
    TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.FILE_CONTENT";
pub const ID_COL: &str = "FILE_CONTENT_ID";
pub const FILE_NAME_COL: &str = "FILE_NAME_ID";
pub const CHECKSUM_COL: &str = "CHECKSUM";
pub const CONTENT_COL: &str = "CONTENT";
pub const CREATED_ON_COL: &str = "CREATED_ON";
pub const MODIFIED_ON_COL: &str = "MODIFIED_ON";

impl TableRow for FileContent {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "FileContent",
        table: TABLE,
        id_column: ID_COL,
        name_column: None,
        columns: &[
            ID_COL,
            FILE_NAME_COL,
            CHECKSUM_COL,
            CONTENT_COL,
            CREATED_ON_COL,
            MODIFIED_ON_COL,
        ],
        audit: AuditColumns::None,
        delete_mode: DeleteMode::Never,
        updatable: false,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(FileContent {
            id: row.get(ID_COL)?,
            file_name_id: row.get(FILE_NAME_COL)?,
            checksum: row.get(CHECKSUM_COL)?,
            content: row.get(CONTENT_COL)?,
            created_on: row.get(CREATED_ON_COL)?,
            modified_on: row.get(MODIFIED_ON_COL)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        let created = self.created_on.unwrap_or_else(now_timestamp);
        let modified = self.modified_on.unwrap_or(created);
        vec![
            Value::from(id),
            Value::from(self.file_name_id),
            Value::Text(self.checksum.clone()),
            Value::from(self.content.clone()),
            timestamp_value(created),
            timestamp_value(modified),
        ]
    }
}

/// 文件内容仓储
pub type FileContentRepository = TableRepository<FileContent>;

impl FileContent {
    pub fn new(file_name_id: i64, checksum: impl Into<String>, content: Option<Vec<u8>>) -> Self {
        Self {
            id: 0,
            file_name_id,
            checksum: checksum.into(),
            content,
            created_on: None,
            modified_on: None,
        }
    }
}

impl TableRepository<FileContent> {
    /// 按文件 + 校验和查找已存内容
    pub fn find_by_file_and_checksum(
        &self,
        file_name_id: i64,
        checksum: &str,
    ) -> RepositoryResult<Option<FileContent>> {
        let rows = self.find_where(
            &format!("{} = ?1 AND {} = ?2", FILE_NAME_COL, CHECKSUM_COL),
            &[Value::from(file_name_id), Value::Text(checksum.to_string())],
        )?;
        Ok(rows.into_iter().next())
    }

    /// 某文件的全部版本，按 id 升序
    pub fn find_by_file(&self, file_name_id: i64) -> RepositoryResult<Vec<FileContent>> {
        self.find_where(&format!("{} = ?1", FILE_NAME_COL), &[Value::from(file_name_id)])
    }

    /// 外键: 文件名
    pub fn file_name(&self, row: &FileContent) -> RepositoryResult<FileName> {
        TableRepository::<FileName>::new(self.context().clone()).get_by_id(row.file_name_id)
    }
}
