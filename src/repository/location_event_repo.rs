// ==========================================
// 工具包发布库 - 位置事件名仓储
// ==========================================
// 表: TK.LOCATION_EVENT_NAME（审计列，软删除）
// 附加属性: REQUIRES_PLATFORM（'Y'/'N'）
// ==========================================

use crate::domain::names::LocationEventName;
use crate::domain::types::{flag_from_db, flag_to_db, AuditInfo};
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.LOCATION_EVENT_NAME";
pub const ID_COL: &str = "LOCATION_EVENT_NAME_ID";
pub const NAME_COL: &str = "LOCATION_EVENT_NAME";
pub const REQUIRES_PLATFORM_COL: &str = "REQUIRES_PLATFORM";

impl TableRow for LocationEventName {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "LocationEventName",
        table: TABLE,
        id_column: ID_COL,
        name_column: Some(NAME_COL),
        columns: &[ID_COL, NAME_COL, REQUIRES_PLATFORM_COL],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(LocationEventName {
            id: row.get(ID_COL)?,
            name: row.get(NAME_COL)?,
            requires_platform: flag_from_db(&row.get::<_, String>(REQUIRES_PLATFORM_COL)?),
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::Text(self.name.clone()),
            Value::Text(flag_to_db(self.requires_platform).to_string()),
        ]
    }
}

/// 位置事件名仓储
pub type LocationEventNameRepository = TableRepository<LocationEventName>;

impl LocationEventName {
    pub fn new(name: impl Into<String>, requires_platform: bool) -> Self {
        Self {
            id: 0,
            name: name.into(),
            requires_platform,
            audit: AuditInfo::default(),
        }
    }
}

impl TableRepository<LocationEventName> {
    /// 设置"需要平台"标志
    pub fn set_requires_platform(
        &self,
        row: &mut LocationEventName,
        requires_platform: bool,
    ) -> RepositoryResult<()> {
        self.update_columns(
            row,
            &[(
                REQUIRES_PLATFORM_COL,
                Value::Text(flag_to_db(requires_platform).to_string()),
            )],
        )
    }
}
