// ==========================================
// 工具包发布库 - 文件实体
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 文件名（TK.FILE_NAME，只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileName {
    pub id: i64,
    pub name: String,
}

/// 文件内容（TK.FILE_CONTENT，只追加）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileContent {
    pub id: i64,
    pub file_name_id: i64,
    pub checksum: String,
    #[serde(skip)]
    pub content: Option<Vec<u8>>,
    pub created_on: Option<NaiveDateTime>,
    pub modified_on: Option<NaiveDateTime>,
}
