//! Order submission service
//!
//! Composes fingerprinting, duplicate lookup, failure injection, the
//! race-safe create and audit logging into the idempotent submission
//! protocol. Submitting the same `(items, amount)` pair any number of
//! times, under any interleaving, resolves to the same stored order.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::audit::{AuditLogger, AuditOutcome};
use crate::db::repository::{OrderRepository, RepoError};
use crate::orders::failure::FailurePolicy;
use crate::orders::fingerprint::fingerprint;
use crate::utils::{AppError, AppResult};

/// Fixed retry delay handed to clients on an injected failure (seconds)
pub const RETRY_AFTER_SECS: u64 = 5;

/// Terminal result of a submission attempt.
///
/// Internal storage errors are not an outcome; they surface as
/// [`AppError`] and map to a 500 at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request resolved to an order — newly created or pre-existing.
    /// A submission that lost a creation race reports `created: false`,
    /// indistinguishable from a plain duplicate.
    Processed { order_id: String, created: bool },
    /// Injected transient failure; nothing was written. The caller
    /// should retry after `retry_after_secs`.
    TransientFailure { retry_after_secs: u64 },
}

/// 订单提交编排器
///
/// 无应用级锁：存储层的 fingerprint 唯一索引是并发创建的唯一仲裁者，
/// 查重只是减少冲突概率的快路径。
#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    failure: Arc<dyn FailurePolicy>,
    audit: AuditLogger,
}

impl OrderService {
    pub fn new(repo: OrderRepository, failure: Arc<dyn FailurePolicy>, audit: AuditLogger) -> Self {
        Self {
            repo,
            failure,
            audit,
        }
    }

    /// Submit an order. `items` and `amount` are assumed validated.
    pub async fn submit(&self, items: &[String], amount: Decimal) -> AppResult<SubmitOutcome> {
        let fp = fingerprint(items, amount);

        // Fast path: fingerprint already stored. Best-effort — a
        // concurrent insert may land right after this read; that race is
        // resolved below by the unique index, not here.
        let existing = self
            .repo
            .find_by_fingerprint(&fp)
            .await
            .map_err(|e| self.storage_error(e))?;
        if let Some(order) = existing {
            self.audit
                .record(Some(order.order_id.clone()), AuditOutcome::Duplicate);
            return Ok(SubmitOutcome::Processed {
                order_id: order.order_id,
                created: false,
            });
        }

        // Injected transient failure: no storage mutation on this path
        if self.failure.should_fail() {
            self.audit.record(None, AuditOutcome::Failure);
            return Ok(SubmitOutcome::TransientFailure {
                retry_after_secs: RETRY_AFTER_SECS,
            });
        }

        match self.repo.create(items, amount, &fp).await {
            Ok(order) => {
                self.audit
                    .record(Some(order.order_id.clone()), AuditOutcome::Success);
                Ok(SubmitOutcome::Processed {
                    order_id: order.order_id,
                    created: true,
                })
            }
            // A concurrent submission won the race: resolve to the
            // winner instead of surfacing an error.
            Err(RepoError::Duplicate(_)) => {
                let winner = self
                    .repo
                    .get_by_fingerprint(&fp)
                    .await
                    .map_err(|e| self.storage_error(e))?;
                self.audit
                    .record(Some(winner.order_id.clone()), AuditOutcome::Duplicate);
                Ok(SubmitOutcome::Processed {
                    order_id: winner.order_id,
                    created: false,
                })
            }
            Err(e) => Err(self.storage_error(e)),
        }
    }

    /// Unexpected storage failure: record the `error` audit outcome
    /// (best-effort, null id) and convert for the edge.
    fn storage_error(&self, err: RepoError) -> AppError {
        self.audit.record(None, AuditOutcome::Error);
        match err {
            // The row vanished between conflict and refetch — a
            // logic-impossible case surfaced as an internal error.
            RepoError::NotFound(msg) => AppError::internal(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}
