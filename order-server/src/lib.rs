//! Order Server - 容错幂等订单处理服务
//!
//! # 架构概述
//!
//! 接收订单提交请求，保证语义相同的提交（同一商品集合 + 同一金额）
//! 至多处理一次，并发重试下亦然；同时模拟瞬时后端故障，并在不阻塞
//! 调用方的前提下记录审计日志。
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器启动
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 嵌入式 SurrealDB 存储 (唯一索引仲裁并发)
//! ├── orders/        # 订单核心: 指纹、故障注入、提交编排
//! ├── audit/         # 有界异步审计日志
//! └── utils/         # 错误、日志、校验工具
//! ```

pub mod api;
pub mod audit;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export 公共类型
pub use audit::{AuditLogger, AuditOutcome};
pub use crate::core::{Config, Server, ServerState};
pub use orders::{FailurePolicy, OrderService, RandomFailure, SubmitOutcome};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用，保证 `.env` 中的变量可见。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在不是错误
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    if config.is_production() {
        config.ensure_work_dir_structure()?;
        init_logger_with_file(&config.log_level, Some(&config.logs_dir()));
    } else {
        init_logger(&config.log_level);
    }

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____          __
  / __ \_______/ /__  _____
 / / / / ___/ __  / _ \/ ___/
/ /_/ / /  / /_/ /  __/ /
\____/_/   \__,_/\___/_/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
