// ==========================================
// 工具包发布库 - 名称字典实体
// ==========================================
// 共同形态: id + 名称 (+ 一个附加属性) + 审计列
// ==========================================

use crate::domain::types::AuditInfo;
use serde::{Deserialize, Serialize};

/// 访问类型（TK.ACCESS_TYPE，无审计列）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessType {
    pub id: i16,
    pub name: String,
}

/// 代码更新状态名（TK.CODEUPDATE_STATUS_NAME）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeUpdateStatusName {
    pub id: i16,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 交付物更新状态名（TK.DELIVERABLEUPDATE_STATUS_NAME）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverableUpdateStatusName {
    pub id: i16,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 事件名（TK.EVENT_NAME）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventName {
    pub id: i16,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 文件动作名（TK.FILE_ACTION_NAME）
///
/// `svn_action` 为对应的 SVN 动作名（A/M/D 等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileActionName {
    pub id: i16,
    pub name: String,
    pub svn_action: Option<String>,
    #[serde(default)]
    pub audit: AuditInfo,
}

/// 位置事件名（TK.LOCATION_EVENT_NAME）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEventName {
    pub id: i16,
    pub name: String,
    pub requires_platform: bool, // 存储为 'Y'/'N'
    #[serde(default)]
    pub audit: AuditInfo,
}
