// ==========================================
// 工具包发布库 - 领域模型层
// ==========================================
// 职责: 定义 TK schema 各表对应的实体
// 红线: 不含数据访问逻辑；外键只存 id，关联实体由仓储按需加载
// ==========================================

pub mod change_request;
pub mod deliverable;
pub mod event;
pub mod file;
pub mod links;
pub mod names;
pub mod toolkit;
pub mod types;

// 重导出核心类型
pub use change_request::{ChangeRequest, ChangeRequestStatus, CodeUpdate, FunctionalUpdate};
pub use deliverable::DeliverableUpdate;
pub use event::Event;
pub use file::{FileContent, FileName};
pub use links::{
    ActiveChangeRequest, CodeUpdateChangeRequest, CodeUpdateFunctionalUpdate,
    ComponentVersionChangeRequest, ReleasePackageComponentVersion, ReleasePlatform,
};
pub use names::{
    AccessType, CodeUpdateStatusName, DeliverableUpdateStatusName, EventName, FileActionName,
    LocationEventName,
};
pub use toolkit::{Component, ComponentTkVersion, Platform, ReleasePackage, ToolKit};
pub use types::{AuditInfo, EntityKey};
