// ==========================================
// 工具包发布库 - 数据仓储层
// ==========================================
// 职责: 提供 TK schema 各表的数据访问接口，屏蔽数据库细节
// 约束: 所有查询使用参数化；语句在单次调用内准备并释放
// 红线: Repository 不含报表格式化逻辑
// ==========================================

pub mod error;
pub mod id_allocator;
pub mod link;
pub mod table;

// ===== 名称字典表 =====
pub mod access_type_repo;
pub mod code_update_status_repo;
pub mod deliverable_status_repo;
pub mod event_name_repo;
pub mod file_action_repo;
pub mod location_event_repo;

// ===== 业务表 =====
pub mod change_request_repo;
pub mod deliverable_update_repo;
pub mod events_repo;
pub mod file_content_repo;
pub mod file_name_repo;
pub mod functional_update_repo;
pub mod toolkit_repo;

// ===== 关联表 =====
pub mod code_update_link_repo;
pub mod release_link_repo;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use link::{LinkRepository, LinkRow, LinkSpec};
pub use table::{AuditColumns, DeleteMode, TableRepository, TableRow, TableSpec};

// 重导出各实体仓储
pub use access_type_repo::AccessTypeRepository;
pub use change_request_repo::{
    ActiveChangeRequestRepository, ChangeRequestRepository, ChangeRequestStatusRepository,
    CodeUpdateRepository, ComponentVersionChangeRequestRepository,
};
pub use code_update_link_repo::{
    CodeUpdateChangeRequestRepository, CodeUpdateFunctionalUpdateRepository,
};
pub use code_update_status_repo::CodeUpdateStatusNameRepository;
pub use deliverable_status_repo::DeliverableUpdateStatusNameRepository;
pub use deliverable_update_repo::DeliverableUpdateRepository;
pub use event_name_repo::EventNameRepository;
pub use events_repo::EventsRepository;
pub use file_action_repo::FileActionNameRepository;
pub use file_content_repo::FileContentRepository;
pub use file_name_repo::FileNameRepository;
pub use functional_update_repo::FunctionalUpdateRepository;
pub use location_event_repo::LocationEventNameRepository;
pub use release_link_repo::{ReleasePackageComponentVersionRepository, ReleasePlatformRepository};
pub use toolkit_repo::{
    ComponentRepository, ComponentTkVersionRepository, PlatformRepository,
    ReleasePackageRepository, ToolKitRepository,
};
