//! Order API Module
//!
//! Order submission endpoint. Submission is idempotent: repeated requests
//! with the same item set and amount resolve to the same order.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::submit))
}
