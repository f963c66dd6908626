// ==========================================
// 工具包发布库 - 变更请求/代码更新仓储
// ==========================================
// 表: TK.CHANGEREQUEST_STATUS / TK.CHANGEREQUEST / TK.CODEUPDATE
// 关联: TK.COMPONENT_TKVERSION_X_CHANGEREQUEST / TK.CHANGEREQUEST_ACTIVE
// ==========================================

use crate::domain::change_request::{ChangeRequest, ChangeRequestStatus, CodeUpdate};
use crate::domain::links::{ActiveChangeRequest, ComponentVersionChangeRequest};
use crate::domain::toolkit::ComponentTkVersion;
use crate::domain::types::AuditInfo;
use crate::repository::error::RepositoryResult;
use crate::repository::link::{LinkRepository, LinkRow, LinkSpec};
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

// ==========================================
// ChangeRequestStatus
// ==========================================

impl TableRow for ChangeRequestStatus {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "ChangeRequestStatus",
        table: "TK.CHANGEREQUEST_STATUS",
        id_column: "CHANGEREQUEST_STATUS_ID",
        name_column: Some("STATE"),
        columns: &["CHANGEREQUEST_STATUS_ID", "STATE"],
        audit: AuditColumns::None,
        delete_mode: DeleteMode::Hard,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ChangeRequestStatus {
            id: row.get("CHANGEREQUEST_STATUS_ID")?,
            state: row.get("STATE")?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![Value::from(id), Value::Text(self.state.clone())]
    }
}

impl ChangeRequestStatus {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            id: 0,
            state: state.into(),
        }
    }
}

pub type ChangeRequestStatusRepository = TableRepository<ChangeRequestStatus>;

// ==========================================
// ChangeRequest
// ==========================================

impl TableRow for ChangeRequest {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "ChangeRequest",
        table: "TK.CHANGEREQUEST",
        id_column: "CHANGEREQUEST_ID",
        name_column: Some("CQ_ID"),
        columns: &["CHANGEREQUEST_ID", "CQ_ID", "DESCRIPTION", "CHANGEREQUEST_STATUS_ID"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ChangeRequest {
            id: row.get("CHANGEREQUEST_ID")?,
            cq_id: row.get("CQ_ID")?,
            description: row.get("DESCRIPTION")?,
            status_id: row.get("CHANGEREQUEST_STATUS_ID")?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::Text(self.cq_id.clone()),
            Value::from(self.description.clone()),
            Value::from(self.status_id),
        ]
    }
}

impl ChangeRequest {
    pub fn new(cq_id: impl Into<String>, description: Option<String>, status_id: i16) -> Self {
        Self {
            id: 0,
            cq_id: cq_id.into(),
            description,
            status_id,
            audit: AuditInfo::default(),
        }
    }
}

pub type ChangeRequestRepository = TableRepository<ChangeRequest>;

impl TableRepository<ChangeRequest> {
    /// 修改状态
    pub fn update_status(&self, row: &mut ChangeRequest, status_id: i16) -> RepositoryResult<()> {
        self.update_columns(row, &[("CHANGEREQUEST_STATUS_ID", Value::from(status_id))])
    }

    /// 外键: 当前状态
    pub fn status(&self, row: &ChangeRequest) -> RepositoryResult<ChangeRequestStatus> {
        TableRepository::<ChangeRequestStatus>::new(self.context().clone()).get_by_id(row.status_id)
    }
}

// ==========================================
// CodeUpdate
// ==========================================

impl TableRow for CodeUpdate {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "CodeUpdate",
        table: "TK.CODEUPDATE",
        id_column: "CODEUPDATE_ID",
        name_column: None,
        columns: &["CODEUPDATE_ID", "COMPONENT_TKVERSION_ID", "REVISION", "COMMENTS"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(CodeUpdate {
            id: row.get("CODEUPDATE_ID")?,
            component_version_id: row.get("COMPONENT_TKVERSION_ID")?,
            revision: row.get("REVISION")?,
            comments: row.get("COMMENTS")?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::from(self.component_version_id),
            Value::Text(self.revision.clone()),
            Value::from(self.comments.clone()),
        ]
    }
}

impl CodeUpdate {
    pub fn new(component_version_id: i64, revision: impl Into<String>) -> Self {
        Self {
            id: 0,
            component_version_id,
            revision: revision.into(),
            comments: None,
            audit: AuditInfo::default(),
        }
    }
}

pub type CodeUpdateRepository = TableRepository<CodeUpdate>;

impl TableRepository<CodeUpdate> {
    /// 组件版本下按修订号查询
    pub fn find_by_revision(
        &self,
        component_version_id: i64,
        revision: &str,
    ) -> RepositoryResult<Option<CodeUpdate>> {
        let rows = self.find_where(
            "COMPONENT_TKVERSION_ID = ?1 AND REVISION = ?2",
            &[Value::from(component_version_id), Value::Text(revision.to_string())],
        )?;
        Ok(rows.into_iter().next())
    }
}

// ==========================================
// 组件版本 ↔ 变更请求
// ==========================================

impl LinkRow for ComponentVersionChangeRequest {
    type Left = ComponentTkVersion;
    type Right = ChangeRequest;

    const SPEC: LinkSpec = LinkSpec {
        entity: "ComponentVersionChangeRequest",
        table: "TK.COMPONENT_TKVERSION_X_CHANGEREQUEST",
        left_column: "COMPONENT_TKVERSION_ID",
        right_column: "CHANGEREQUEST_ID",
    };

    fn from_ids(left: i64, right: i64) -> Self {
        Self {
            component_version_id: left,
            change_request_id: right,
        }
    }

    fn left_id(&self) -> i64 {
        self.component_version_id
    }

    fn right_id(&self) -> i64 {
        self.change_request_id
    }
}

pub type ComponentVersionChangeRequestRepository = LinkRepository<ComponentVersionChangeRequest>;

impl LinkRow for ActiveChangeRequest {
    type Left = ComponentTkVersion;
    type Right = ChangeRequest;

    const SPEC: LinkSpec = LinkSpec {
        entity: "ActiveChangeRequest",
        table: "TK.CHANGEREQUEST_ACTIVE",
        left_column: "COMPONENT_TKVERSION_ID",
        right_column: "CHANGEREQUEST_ID",
    };

    fn from_ids(left: i64, right: i64) -> Self {
        Self {
            component_version_id: left,
            change_request_id: right,
        }
    }

    fn left_id(&self) -> i64 {
        self.component_version_id
    }

    fn right_id(&self) -> i64 {
        self.change_request_id
    }
}

pub type ActiveChangeRequestRepository = LinkRepository<ActiveChangeRequest>;
