// ==========================================
// 工具包发布库 - 报表层
// ==========================================
// 职责: 多表联合查询 + 定宽文本输出
// ==========================================

pub mod build_stats;
pub mod change_request;
pub mod format;

pub use build_stats::{BuildStatsOutput, BuildStatsReport};
pub use change_request::{
    build_query, ChangeRequestReport, ComponentScope, ReportFilter, ReportKind, ReportRow, MAX_DESC,
};
