// ==========================================
// 工具包发布库 - 领域类型定义
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 审计列 (Audit Columns)
// ==========================================
// 对齐: CREATED_BY/CREATED_ON/UPDATED_BY/UPDATED_ON/DELETED_BY/DELETED_ON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditInfo {
    pub created_by: Option<String>,
    pub created_on: Option<NaiveDateTime>,
    pub updated_by: Option<String>,
    pub updated_on: Option<NaiveDateTime>,
    pub deleted_by: Option<String>,
    pub deleted_on: Option<NaiveDateTime>,
}

impl AuditInfo {
    /// 是否已软删除
    pub fn is_deleted(&self) -> bool {
        self.deleted_on.is_some()
    }
}

// ==========================================
// 实体定位键 (Entity Key)
// ==========================================
// 未加载的实体引用: 只有 id 或业务名称
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKey {
    Id(i64),
    Name(String),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKey::Id(id) => write!(f, "id={}", id),
            EntityKey::Name(name) => write!(f, "name={}", name),
        }
    }
}

impl From<i64> for EntityKey {
    fn from(id: i64) -> Self {
        EntityKey::Id(id)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        EntityKey::Name(name.to_string())
    }
}

/// 库中 Y/N 标志位的解析
pub fn flag_from_db(raw: &str) -> bool {
    matches!(raw.trim(), "Y" | "y" | "1" | "T" | "t")
}

/// Y/N 标志位的存储形式
pub fn flag_to_db(flag: bool) -> &'static str {
    if flag {
        "Y"
    } else {
        "N"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_conversion() {
        assert!(flag_from_db("Y"));
        assert!(flag_from_db(" 1 "));
        assert!(!flag_from_db("N"));
        assert!(!flag_from_db(""));
        assert_eq!(flag_to_db(true), "Y");
        assert_eq!(flag_to_db(false), "N");
    }

    #[test]
    fn test_entity_key_display() {
        assert_eq!(EntityKey::from(7).to_string(), "id=7");
        assert_eq!(EntityKey::from("sta").to_string(), "name=sta");
    }
}
