// ==========================================
// 工具包发布库 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (TK schema)
// 系统定位: 工具包发布记录的数据访问层 + 文本报表
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 公共工具 - 语句执行 / SQL 构建
pub mod common;

// 报表层
pub mod report;

// 配置层 - 运行配置
pub mod config;

// 连接上下文
pub mod context;

// 数据库基础设施（连接初始化/PRAGMA/schema 挂载）
pub mod db;

// TK schema 建表语句
pub mod schema;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::TkConfig;
pub use context::TkContext;
pub use domain::{AuditInfo, EntityKey};
pub use report::{BuildStatsReport, ChangeRequestReport, ReportFilter, ReportKind};
pub use repository::{
    LinkRepository, RepositoryError, RepositoryResult, TableRepository,
};

// ==========================================
// 常量定义
// ==========================================

// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 库名称
pub const APP_NAME: &str = "工具包发布库";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
