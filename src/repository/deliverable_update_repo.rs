// ==========================================
// 工具包发布库 - 交付物更新仓储
// ==========================================
// 表: TK.DELIVERABLEUPDATE（审计列，软删除）
// 外键: PLATFORM_ID -> TK.PLATFORM
//       CURRENT_STATUS_ID -> TK.DELIVERABLEUPDATE_STATUS_NAME（可空）
// ==========================================

use crate::domain::deliverable::DeliverableUpdate;
use crate::domain::names::DeliverableUpdateStatusName;
use crate::domain::toolkit::Platform;
use crate::domain::types::AuditInfo;
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

pub const TABLE: &str = "TK.DELIVERABLEUPDATE";
pub const ID_COL: &str = "DELIVERABLEUPDATE_ID";
pub const PLATFORM_COL: &str = "PLATFORM_ID";
pub const STATUS_COL: &str = "CURRENT_STATUS_ID";

impl TableRow for DeliverableUpdate {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "DeliverableUpdate",
        table: TABLE,
        id_column: ID_COL,
        name_column: None,
        columns: &[ID_COL, PLATFORM_COL, STATUS_COL],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(DeliverableUpdate {
            id: row.get(ID_COL)?,
            platform_id: row.get(PLATFORM_COL)?,
            current_status_id: row.get(STATUS_COL)?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::from(self.platform_id),
            Value::from(self.current_status_id),
        ]
    }
}

/// 交付物更新仓储
pub type DeliverableUpdateRepository = TableRepository<DeliverableUpdate>;

impl DeliverableUpdate {
    pub fn new(platform_id: i16, current_status_id: Option<i16>) -> Self {
        Self {
            id: 0,
            platform_id,
            current_status_id,
            audit: AuditInfo::default(),
        }
    }
}

impl TableRepository<DeliverableUpdate> {
    /// 修改当前状态（None 表示清空）
    pub fn update_status(
        &self,
        row: &mut DeliverableUpdate,
        status_id: Option<i16>,
    ) -> RepositoryResult<()> {
        self.update_columns(row, &[(STATUS_COL, Value::from(status_id))])
    }

    /// 外键: 平台，按需读取
    pub fn platform(&self, row: &DeliverableUpdate) -> RepositoryResult<Platform> {
        TableRepository::<Platform>::new(self.context().clone()).get_by_id(row.platform_id)
    }

    /// 外键: 当前状态；未设置时返回 None
    pub fn current_status(
        &self,
        row: &DeliverableUpdate,
    ) -> RepositoryResult<Option<DeliverableUpdateStatusName>> {
        match row.current_status_id {
            Some(id) => TableRepository::<DeliverableUpdateStatusName>::new(self.context().clone())
                .get_by_id(id)
                .map(Some),
            None => Ok(None),
        }
    }

    /// 平台下的全部交付物更新
    pub fn find_by_platform(&self, platform_id: i16) -> RepositoryResult<Vec<DeliverableUpdate>> {
        self.find_where(&format!("{} = ?1", PLATFORM_COL), &[Value::from(platform_id)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TkContext;
    use crate::repository::deliverable_status_repo::DeliverableUpdateStatusNameRepository;
    use crate::repository::toolkit_repo::PlatformRepository;

    #[test]
    fn test_status_transitions_and_lazy_accessors() {
        let ctx = TkContext::in_memory("shipper").unwrap();
        let platform = PlatformRepository::new(ctx.clone())
            .insert(&Platform::new("64-rhel"))
            .unwrap();
        let shipped = DeliverableUpdateStatusNameRepository::new(ctx.clone())
            .insert(&DeliverableUpdateStatusName::new("SHIPPED"))
            .unwrap();
        let repo = DeliverableUpdateRepository::new(ctx);

        let mut du = repo.insert(&DeliverableUpdate::new(platform.id, None)).unwrap();
        assert!(repo.current_status(&du).unwrap().is_none());
        assert_eq!(repo.platform(&du).unwrap().name, "64-rhel");

        repo.update_status(&mut du, Some(shipped.id)).unwrap();
        assert_eq!(du.current_status_id, Some(shipped.id));
        assert_eq!(repo.current_status(&du).unwrap().unwrap().name, "SHIPPED");
        assert_eq!(du.audit.updated_by.as_deref(), Some("shipper"));

        repo.update_status(&mut du, None).unwrap();
        assert!(du.current_status_id.is_none());
        assert_eq!(repo.find_by_platform(platform.id).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_platform_rejected() {
        let ctx = TkContext::in_memory("shipper").unwrap();
        let repo = DeliverableUpdateRepository::new(ctx);
        assert!(repo.insert(&DeliverableUpdate::new(42, None)).is_err());
    }
}
