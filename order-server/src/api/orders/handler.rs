//! Order API Handlers

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::orders::SubmitOutcome;
use crate::utils::error::ErrorBody;
use crate::utils::validation::{validate_items, validate_payment_amount};
use crate::utils::AppResult;

/// Submission payload
///
/// `payment_amount` deserializes through serde_json's arbitrary-precision
/// number so the exact decimal digits reach [`Decimal`] without an `f64`
/// round-trip.
#[derive(Debug, Deserialize)]
pub struct SubmitOrderRequest {
    pub items: Vec<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub payment_amount: Decimal,
}

/// Body for both the created (201) and duplicate (200) cases
#[derive(Debug, Serialize)]
pub struct SubmitOrderResponse {
    pub order_id: String,
    pub status: &'static str,
}

/// Submit an order
///
/// | 结果 | 状态码 | 响应 |
/// |------|--------|------|
/// | 新建 | 201 | `{order_id, status: "processed"}` |
/// | 重复 | 200 | `{order_id, status: "processed"}` |
/// | 瞬时故障 | 503 | `{error}` + `Retry-After: 5` |
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Response> {
    validate_items(&payload.items)?;
    validate_payment_amount(payload.payment_amount)?;

    let outcome = state
        .orders
        .submit(&payload.items, payload.payment_amount)
        .await?;

    let response = match outcome {
        SubmitOutcome::Processed { order_id, created } => {
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (
                status,
                Json(SubmitOrderResponse {
                    order_id,
                    status: "processed",
                }),
            )
                .into_response()
        }
        SubmitOutcome::TransientFailure { retry_after_secs } => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, retry_after_secs.to_string())],
            Json(ErrorBody {
                error: "Temporary failure, please retry later".to_string(),
            }),
        )
            .into_response(),
    };

    Ok(response)
}
