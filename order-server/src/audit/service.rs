//! 审计日志发送端
//!
//! `AuditLogger` 是提交路径持有的克隆句柄，通过有界 mpsc 通道把
//! 日志请求交给后台 worker。`record` 立即返回：不等待、不失败、
//! 队列满时丢弃并告警。

use std::fmt;

use tokio::sync::mpsc;

/// 单次提交尝试的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOutcome {
    /// 指纹已存在（含竞态落败方）
    Duplicate,
    /// 注入的瞬时故障，未写存储
    Failure,
    /// 新订单落库
    Success,
    /// 非预期的存储错误
    Error,
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuditOutcome::Duplicate => "duplicate",
            AuditOutcome::Failure => "failure",
            AuditOutcome::Success => "success",
            AuditOutcome::Error => "error",
        };
        f.write_str(s)
    }
}

/// 发送到审计 worker 的日志请求
#[derive(Debug)]
pub struct AuditLogRequest {
    /// 订单 ID；failure/error 等未创建场景为 None
    pub order_id: Option<String>,
    pub outcome: AuditOutcome,
}

/// 审计日志句柄
///
/// 克隆成本极低（仅一个 Sender）。通道容量有界，写入端永不阻塞。
#[derive(Debug, Clone)]
pub struct AuditLogger {
    tx: mpsc::Sender<AuditLogRequest>,
}

impl AuditLogger {
    /// 创建句柄和对应的接收端（交给 [`AuditWorker`](super::AuditWorker)）
    pub fn new(buffer_size: usize) -> (Self, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (Self { tx }, rx)
    }

    /// 调度一条审计记录，立即返回。
    ///
    /// best-effort：队列满或 worker 已退出时丢弃该条记录。
    pub fn record(&self, order_id: Option<String>, outcome: AuditOutcome) {
        if let Err(e) = self.tx.try_send(AuditLogRequest { order_id, outcome }) {
            tracing::warn!(outcome = %outcome, error = %e, "Audit queue full, dropping entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_renders_lowercase() {
        assert_eq!(AuditOutcome::Duplicate.to_string(), "duplicate");
        assert_eq!(AuditOutcome::Failure.to_string(), "failure");
        assert_eq!(AuditOutcome::Success.to_string(), "success");
        assert_eq!(AuditOutcome::Error.to_string(), "error");
    }

    #[tokio::test]
    async fn record_never_blocks_on_full_queue() {
        let (logger, _rx) = AuditLogger::new(1);
        // second record overflows the queue and is dropped, not awaited
        logger.record(None, AuditOutcome::Failure);
        logger.record(None, AuditOutcome::Failure);
    }

    #[tokio::test]
    async fn record_delivers_request() {
        let (logger, mut rx) = AuditLogger::new(4);
        logger.record(Some("abc".to_string()), AuditOutcome::Success);
        let req = rx.recv().await.unwrap();
        assert_eq!(req.order_id.as_deref(), Some("abc"));
        assert_eq!(req.outcome, AuditOutcome::Success);
    }
}
