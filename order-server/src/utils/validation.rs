//! Input validation helpers
//!
//! Centralized request-field validation for the submission endpoint.
//! Runs before the order core; the core only ever sees a valid
//! `(items, amount)` pair.

use rust_decimal::Decimal;

use crate::utils::AppError;

// ── Field limits ────────────────────────────────────────────────────

/// Item display names
pub const MAX_ITEM_LEN: usize = 200;

/// Total significant digits allowed in a payment amount
pub const MAX_AMOUNT_DIGITS: u32 = 10;

/// Fractional digits allowed in a payment amount
pub const MAX_AMOUNT_SCALE: u32 = 2;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate the submitted item list: non-empty, every entry a non-empty
/// string within the length limit.
pub fn validate_items(items: &[String]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::validation(
            "items must be a non-empty list of strings",
        ));
    }
    for item in items {
        if item.trim().is_empty() {
            return Err(AppError::validation("items must not contain empty strings"));
        }
        if item.len() > MAX_ITEM_LEN {
            return Err(AppError::validation(format!(
                "item is too long ({} chars, max {MAX_ITEM_LEN})",
                item.len()
            )));
        }
    }
    Ok(())
}

/// Validate the payment amount: strictly positive, at most two fractional
/// digits, at most ten significant digits in total.
pub fn validate_payment_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::validation(
            "payment_amount must be a positive number",
        ));
    }
    let normalized = amount.normalize();
    if normalized.scale() > MAX_AMOUNT_SCALE {
        return Err(AppError::validation(format!(
            "payment_amount must have at most {MAX_AMOUNT_SCALE} decimal places"
        )));
    }
    let digits = normalized.mantissa().unsigned_abs().to_string().len() as u32;
    if digits > MAX_AMOUNT_DIGITS {
        return Err(AppError::validation(format!(
            "payment_amount must have at most {MAX_AMOUNT_DIGITS} digits"
        )));
    }
    Ok(())
}
