// ==========================================
// 工具包发布库 - 日志
// ==========================================
// 仓储层以 debug 记录每条语句、以 info 记录写入、以 error 记录失败
// 过滤器优先级: RUST_LOG > TkConfig.log_filter（TK_LOG）
// 日志写到 stderr，报表正文独占 stdout
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 过滤器: RUST_LOG 优先，否则用配置给出的默认值
fn build_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// 安装全局订阅者（重复调用无副作用）
///
/// ```no_run
/// let config = tk_dao::TkConfig::default();
/// tk_dao::logging::init(&config.log_filter);
/// ```
pub fn init(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(build_filter(default_filter))
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 测试用: debug 级别，输出交给测试框架捕获
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("tk_dao=debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_test();
        init("info");
        init("tk_dao=trace");
        tracing::debug!("订阅者已安装");
    }
}
