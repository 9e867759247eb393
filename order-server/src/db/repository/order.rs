//! Order Repository
//!
//! fingerprint UNIQUE 索引保证幂等：先查后写的竞态由索引仲裁，
//! 冲突方通过 [`OrderRepository::get_by_fingerprint`] 取回胜者记录。

use rust_decimal::Decimal;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::OrderRecord;
use crate::utils::time::now_millis;

const TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Look up an order by fingerprint. Read-only, no side effects.
    pub async fn find_by_fingerprint(&self, fingerprint: &str) -> RepoResult<Option<OrderRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE fingerprint = $fingerprint LIMIT 1")
            .bind(("fingerprint", fingerprint.to_string()))
            .await?;
        let orders: Vec<OrderRecord> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Fetch the order that owns `fingerprint`, failing with `NotFound`
    /// if it does not exist. Used for conflict recovery after a
    /// `Duplicate` from [`create`](Self::create), where the row is
    /// expected to be present.
    pub async fn get_by_fingerprint(&self, fingerprint: &str) -> RepoResult<OrderRecord> {
        self.find_by_fingerprint(fingerprint).await?.ok_or_else(|| {
            RepoError::NotFound(format!("Order with fingerprint {fingerprint} not found"))
        })
    }

    /// Insert a new order.
    ///
    /// A single `CREATE` statement, so the insert is one transaction.
    /// The UNIQUE index on `fingerprint` rejects concurrent duplicates
    /// regardless of any earlier lookup — returns `RepoError::Duplicate`
    /// in that case.
    pub async fn create(
        &self,
        items: &[String],
        payment_amount: Decimal,
        fingerprint: &str,
    ) -> RepoResult<OrderRecord> {
        let record = OrderRecord {
            order_id: Uuid::new_v4().to_string(),
            items: items.to_vec(),
            payment_amount,
            fingerprint: fingerprint.to_string(),
            created_at: now_millis(),
        };

        let created: Option<OrderRecord> = self
            .base
            .db()
            .create(TABLE)
            .content(record)
            .await
            .map_err(|e| classify_create_error(e, fingerprint))?;

        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// All stored orders (test support, no pagination)
    pub async fn find_all(&self) -> RepoResult<Vec<OrderRecord>> {
        let orders: Vec<OrderRecord> = self.base.db().query("SELECT * FROM order").await?.take(0)?;
        Ok(orders)
    }
}

/// Map a SurrealDB create failure to a repository error, detecting
/// unique-index violations by message inspection (the embedded SDK has
/// no structured error code for them).
fn classify_create_error(err: surrealdb::Error, fingerprint: &str) -> RepoError {
    let msg = err.to_string().to_lowercase();
    if msg.contains("already contains") || msg.contains("unique") || msg.contains("duplicate") {
        RepoError::Duplicate(format!(
            "Order with fingerprint {fingerprint} already exists"
        ))
    } else {
        RepoError::Database(err.to_string())
    }
}
