//! Input validation helpers shared by the booking and task operations.
//!
//! Each helper returns `Error::InvalidArgument` carrying the caller's message,
//! so operations can keep their own wording.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Rejects identifiers that are zero or negative.
pub fn require_positive_id(id: i64, message: &str) -> Result<()> {
    if id <= 0 {
        return Err(Error::invalid(message));
    }
    Ok(())
}

/// Rejects values that are negative, NaN or infinite.
pub fn require_non_negative(value: f64, message: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid(message));
    }
    Ok(())
}

/// Rejects empty and whitespace-only text.
pub fn require_not_blank(text: &str, message: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::invalid(message));
    }
    Ok(())
}

/// Rejects addresses without an `@`.
pub fn require_email(email: &str, message: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(Error::invalid(message));
    }
    Ok(())
}

/// Rounds a monetary amount to two decimal places.
///
/// Rounding works on the exact binary value of `value`, so `2.675` (stored as
/// `2.67499...`) becomes `2.67`. Exact ties go to the even cent: `0.125` becomes `0.12`.
///
/// # Errors
/// Returns `InvalidArgument` if `value` is not finite or too large for a decimal.
pub fn round_cents(value: f64) -> Result<f64> {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .ok_or_else(|| Error::invalid("Amount is out of range"))
}
