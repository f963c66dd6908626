// ==========================================
// 工具包发布库 - 工具包/组件/平台实体
// ==========================================

use crate::domain::types::AuditInfo;
use serde::{Deserialize, Serialize};

/// 工具包（TK.TOOLKIT），一个工具包即一个发布（release）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolKit {
    pub id: i16,
    pub name: String, // 例如 "14.1"
    pub description: Option<String>,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 组件（TK.COMPONENT）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: i16,
    pub name: String,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 组件在某工具包中的版本（TK.COMPONENT_TK_VERSION）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTkVersion {
    pub id: i64,
    pub component_id: i16,
    pub toolkit_id: i16,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 平台（TK.PLATFORM）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: i16,
    pub name: String,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 发布包（TK.RELEASEPACKAGE）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleasePackage {
    pub id: i64,
    pub name: String,
    pub toolkit_id: i16,
    #[serde(default)]
    pub audit: AuditInfo,
}
