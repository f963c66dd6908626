// ==========================================
// 工具包发布库 - 交付物更新实体
// ==========================================

use crate::domain::types::AuditInfo;
use serde::{Deserialize, Serialize};

/// 交付物更新（TK.DELIVERABLEUPDATE）
///
/// `platform_id` / `current_status_id` 为外键，对应实体由仓储按需加载
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverableUpdate {
    pub id: i64,
    pub platform_id: i16,
    pub current_status_id: Option<i16>,
    #[serde(default)]
    pub audit: AuditInfo,
}
