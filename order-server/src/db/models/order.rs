//! Order record model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored order — the unit of record.
///
/// Immutable after creation. `fingerprint` is the sole identity key for
/// deduplication; the UNIQUE index on it guarantees at most one record
/// per fingerprint. `items` keeps the submitted order for display, but
/// item order is not significant to identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// UUID v4, assigned at creation, never reused
    pub order_id: String,
    /// Item names as submitted (display order preserved)
    pub items: Vec<String>,
    /// Exact fixed-point amount (serialized as a decimal string)
    pub payment_amount: Decimal,
    /// 64-char lowercase hex SHA-256 over the canonical (items, amount)
    pub fingerprint: String,
    /// Unix millis
    pub created_at: i64,
}
