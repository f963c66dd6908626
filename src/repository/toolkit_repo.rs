// ==========================================
// 工具包发布库 - 工具包/组件/平台仓储
// ==========================================
// 表: TK.TOOLKIT / TK.COMPONENT / TK.COMPONENT_TK_VERSION /
//     TK.PLATFORM / TK.RELEASEPACKAGE
// 用途: 关联表批量查询、外键按需加载、报表过滤条件解析
// ==========================================

use crate::domain::toolkit::{Component, ComponentTkVersion, Platform, ReleasePackage, ToolKit};
use crate::domain::types::AuditInfo;
use crate::repository::error::RepositoryResult;
use crate::repository::table::{
    audit_from_row, AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec,
};
use rusqlite::types::Value;
use rusqlite::Row;

// ==========================================
// ToolKit
// ==========================================

impl TableRow for ToolKit {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "ToolKit",
        table: "TK.TOOLKIT",
        id_column: "TOOLKIT_ID",
        name_column: Some("NAME"),
        columns: &["TOOLKIT_ID", "NAME", "DESCRIPTION"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ToolKit {
            id: row.get("TOOLKIT_ID")?,
            name: row.get("NAME")?,
            description: row.get("DESCRIPTION")?,
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

impl ToolKit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            audit: AuditInfo::default(),
        }
    }
}

pub type ToolKitRepository = TableRepository<ToolKit>;

// ==========================================
// Component
// ==========================================

impl TableRow for Component {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "Component",
        table: "TK.COMPONENT",
        id_column: "COMPONENT_ID",
        name_column: Some("COMPONENT_NAME"),
        columns: &["COMPONENT_ID", "COMPONENT_NAME"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Component {
            id: row.get("COMPONENT_ID")?,
            name: row.get("COMPONENT_NAME")?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![Value::from(id), Value::Text(self.name.clone())]
    }
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            audit: AuditInfo::default(),
        }
    }
}

pub type ComponentRepository = TableRepository<Component>;

// ==========================================
// ComponentTkVersion
// ==========================================

impl TableRow for ComponentTkVersion {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "ComponentTkVersion",
        table: "TK.COMPONENT_TK_VERSION",
        id_column: "COMPONENT_TKVERSION_ID",
        name_column: None,
        columns: &["COMPONENT_TKVERSION_ID", "COMPONENT_ID", "TOOLKIT_ID"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: false,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ComponentTkVersion {
            id: row.get("COMPONENT_TKVERSION_ID")?,
            component_id: row.get("COMPONENT_ID")?,
            toolkit_id: row.get("TOOLKIT_ID")?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::from(self.component_id),
            Value::from(self.toolkit_id),
        ]
    }
}

impl ComponentTkVersion {
    pub fn new(component_id: i16, toolkit_id: i16) -> Self {
        Self {
            id: 0,
            component_id,
            toolkit_id,
            audit: AuditInfo::default(),
        }
    }
}

pub type ComponentTkVersionRepository = TableRepository<ComponentTkVersion>;

impl TableRepository<ComponentTkVersion> {
    /// 由工具包 + 组件定位唯一的组件版本
    pub fn find_by_toolkit_and_component(
        &self,
        toolkit_id: i16,
        component_id: i16,
    ) -> RepositoryResult<Option<ComponentTkVersion>> {
        let rows = self.find_where(
            "TOOLKIT_ID = ?1 AND COMPONENT_ID = ?2",
            &[Value::from(toolkit_id), Value::from(component_id)],
        )?;
        Ok(rows.into_iter().next())
    }

    /// 工具包下的全部组件版本
    pub fn find_by_toolkit(&self, toolkit_id: i16) -> RepositoryResult<Vec<ComponentTkVersion>> {
        self.find_where("TOOLKIT_ID = ?1", &[Value::from(toolkit_id)])
    }
}

// ==========================================
// Platform
// ==========================================

impl TableRow for Platform {
    type Id = i16;

    const SPEC: TableSpec = TableSpec {
        entity: "Platform",
        table: "TK.PLATFORM",
        id_column: "PLATFORM_ID",
        name_column: Some("PLATFORM_NAME"),
        columns: &["PLATFORM_ID", "PLATFORM_NAME"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i16 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Platform {
            id: row.get("PLATFORM_ID")?,
            name: row.get("PLATFORM_NAME")?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i16) -> Vec<Value> {
        vec![Value::from(id), Value::Text(self.name.clone())]
    }
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            audit: AuditInfo::default(),
        }
    }
}

pub type PlatformRepository = TableRepository<Platform>;

// ==========================================
// ReleasePackage
// ==========================================

impl TableRow for ReleasePackage {
    type Id = i64;

    const SPEC: TableSpec = TableSpec {
        entity: "ReleasePackage",
        table: "TK.RELEASEPACKAGE",
        id_column: "RELEASEPACKAGE_ID",
        name_column: Some("NAME"),
        columns: &["RELEASEPACKAGE_ID", "NAME", "TOOLKIT_ID"],
        audit: AuditColumns::Full,
        delete_mode: DeleteMode::Soft,
        updatable: true,
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(ReleasePackage {
            id: row.get("RELEASEPACKAGE_ID")?,
            name: row.get("NAME")?,
            toolkit_id: row.get("TOOLKIT_ID")?,
            audit: audit_from_row(row)?,
        })
    }

    fn insert_values(&self, id: i64) -> Vec<Value> {
        vec![
            Value::from(id),
            Value::Text(self.name.clone()),
            Value::from(self.toolkit_id),
        ]
    }
}

impl ReleasePackage {
    pub fn new(name: impl Into<String>, toolkit_id: i16) -> Self {
        Self {
            id: 0,
            name: name.into(),
            toolkit_id,
            audit: AuditInfo::default(),
        }
    }
}

pub type ReleasePackageRepository = TableRepository<ReleasePackage>;
