// ==========================================
// 工具包发布库 - 关联表实体
// ==========================================
// 关联行没有独立 id，身份由两端外键组成
// ==========================================

use serde::{Deserialize, Serialize};

/// 代码更新 ↔ 变更请求（TK.CODEUPDATE_X_CHANGEREQUEST）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeUpdateChangeRequest {
    pub code_update_id: i64,
    pub change_request_id: i64,
}

/// 代码更新 ↔ 功能更新（TK.CODEUPDATE_X_FUNCTIONALUPDATE）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeUpdateFunctionalUpdate {
    pub code_update_id: i64,
    pub functional_update_id: i64,
}

/// 发布包 ↔ 组件版本（TK.RELEASEPACKAGE_X_COMPONENT_TK_VERSION）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleasePackageComponentVersion {
    pub release_package_id: i64,
    pub component_version_id: i64,
}

/// 发布(工具包) ↔ 平台（TK.RELEASE_X_PLATFORM）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleasePlatform {
    pub toolkit_id: i16,
    pub platform_id: i16,
}

/// 组件版本 ↔ 变更请求（TK.COMPONENT_TKVERSION_X_CHANGEREQUEST）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentVersionChangeRequest {
    pub component_version_id: i64,
    pub change_request_id: i64,
}

/// 组件版本下处于激活/默认状态的变更请求（TK.CHANGEREQUEST_ACTIVE）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveChangeRequest {
    pub component_version_id: i64,
    pub change_request_id: i64,
}
