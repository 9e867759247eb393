//! 审计日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditLogRequest，追加写入日志文件。
//! 通道关闭时自动退出。

use super::service::AuditLogRequest;
use super::sink::AuditSink;

/// 审计日志后台 Worker
///
/// 单消费者串行写入：并发提交的记录不会交错损坏，
/// 每条都是完整独立的一行。
pub struct AuditWorker {
    sink: AuditSink,
}

impl AuditWorker {
    pub fn new(sink: AuditSink) -> Self {
        Self { sink }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<AuditLogRequest>) {
        tracing::info!("Audit log worker started");

        while let Some(req) = rx.recv().await {
            match self.sink.append(req.order_id.as_deref(), req.outcome).await {
                Ok(()) => {
                    tracing::debug!(
                        order_id = req.order_id.as_deref().unwrap_or("null"),
                        outcome = %req.outcome,
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    // 日志丢失可接受，绝不向上传播
                    tracing::error!(error = %e, "Failed to write audit entry");
                }
            }
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }
}
