//! 审计日志模块
//!
//! 每次提交尝试记录一行审计日志，完全脱离请求路径：
//!
//! - [`AuditLogger`] - 提交路径持有的发送句柄（有界队列，永不阻塞）
//! - [`AuditWorker`] - 后台消费者（单 worker，天然有界）
//! - [`AuditSink`] - 追加写日志文件，每行落盘后才算完成
//!
//! 日志丢失是可接受的：队列满丢弃、写入失败只打 tracing，
//! 绝不影响提交结果。

pub mod service;
pub mod sink;
pub mod worker;

pub use service::{AuditLogRequest, AuditLogger, AuditOutcome};
pub use sink::AuditSink;
pub use worker::AuditWorker;
