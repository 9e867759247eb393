//! 审计日志落盘
//!
//! 行式追加写：一次提交尝试一行，格式
//! `Order attempt: ID=<id-or-null>, Result=<outcome>`。
//! 每行写完后 `sync_data` 落盘，日志任务结束前保证持久。

use std::io;
use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use super::AuditOutcome;

/// Append-only file sink for the audit trail.
#[derive(Debug, Clone)]
pub struct AuditSink {
    path: PathBuf,
}

impl AuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Append one complete record and flush it durably.
    pub async fn append(&self, order_id: Option<&str>, outcome: AuditOutcome) -> io::Result<()> {
        let line = format_line(order_id, outcome);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.sync_data().await?;
        Ok(())
    }
}

fn format_line(order_id: Option<&str>, outcome: AuditOutcome) -> String {
    format!(
        "Order attempt: ID={}, Result={}\n",
        order_id.unwrap_or("null"),
        outcome
    )
}
