//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) connection and schema bootstrap.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "orders";
const DATABASE: &str = "orders";

/// Open the embedded database and apply the schema.
///
/// `db_dir` is the RocksDB data directory (created on first use).
pub async fn connect(db_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(db_dir)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    define_schema(&db).await?;

    tracing::info!(
        "Database connection established (SurrealDB RocksDB at {})",
        db_dir.display()
    );

    Ok(db)
}

/// Define tables and indexes.
///
/// 唯一索引是幂等提交的最终仲裁者：并发写入同一 fingerprint 时，
/// 只有一条记录能落库，其余请求走冲突恢复路径。
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS order;
        DEFINE INDEX IF NOT EXISTS order_fingerprint ON order FIELDS fingerprint UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    Ok(())
}
