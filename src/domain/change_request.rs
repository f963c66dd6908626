// ==========================================
// 工具包发布库 - 变更请求/代码更新实体
// ==========================================

use crate::domain::types::AuditInfo;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 变更请求状态（TK.CHANGEREQUEST_STATUS）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequestStatus {
    pub id: i16,
    pub state: String,
}

/// 变更请求（TK.CHANGEREQUEST）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: i64,
    pub cq_id: String, // 外部跟踪系统编号
    pub description: Option<String>,
    pub status_id: i16,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 代码更新（TK.CODEUPDATE）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeUpdate {
    pub id: i64,
    pub component_version_id: i64,
    pub revision: String,
    pub comments: Option<String>,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 功能更新（TK.FUNCTIONALUPDATE，只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionalUpdate {
    pub id: i64,
    pub description: String,
    pub created_by: Option<String>,
    pub created_on: Option<NaiveDateTime>,
}
