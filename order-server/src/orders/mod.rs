//! 订单核心 - 幂等提交流水线
//!
//! # 模块结构
//!
//! - [`fingerprint`] - 订单指纹（幂等键）计算
//! - [`failure`] - 瞬时故障注入策略
//! - [`service`] - 提交编排：查重 → 故障注入 → 创建 → 竞态恢复

pub mod failure;
pub mod fingerprint;
pub mod service;

pub use failure::{FailurePolicy, RandomFailure};
pub use fingerprint::fingerprint;
pub use service::{OrderService, SubmitOutcome, RETRY_AFTER_SECS};
