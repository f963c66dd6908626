// ==========================================
// 工具包发布库 - 事件实体
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 事件（TK.EVENTS，只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub event_name_id: i16,
    pub comments: Option<String>,
    pub created_by: Option<String>,
    pub created_on: Option<NaiveDateTime>,
}
