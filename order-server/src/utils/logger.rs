//! Logging Infrastructure
//!
//! tracing 初始化：控制台输出，生产环境可选每日滚动日志文件。

use std::path::Path;

/// Initialize console-only logging (development default)
pub fn init_logger(level: &str) {
    init_logger_with_file(level, None);
}

/// Initialize logging, optionally teeing output to a daily-rolling file
/// under `log_dir` (used in production, where stdout may be discarded).
pub fn init_logger_with_file(level: &str, log_dir: Option<&Path>) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.exists()
        && let Some(dir_str) = dir.to_str()
    {
        let file_appender = tracing_appender::rolling::daily(dir_str, "order-server");
        subscriber.with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
