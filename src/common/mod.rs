// ==========================================
// 工具包发布库 - 公共工具模块
// ==========================================
// 职责: 语句准备/执行、SQL 构建
// ==========================================

/// 语句准备与执行工具
pub mod db_utils;

/// SQL 构建工具
pub mod sql_builder;

// 重新导出常用函数
pub use db_utils::{execute, execute_write, prep_statement, query_list, query_optional, ResultTable};
pub use sql_builder::SqlQueryBuilder;
