// ==========================================
// 工具包发布库 - 配置层
// ==========================================
// 职责: 数据库路径、操作人、连接参数、日志过滤
// 来源: 默认值 < JSON 配置文件 < 环境变量
// ==========================================

pub mod tk_config;

// 重导出核心配置
pub use tk_config::{env_keys, get_default_db_path, TkConfig};
