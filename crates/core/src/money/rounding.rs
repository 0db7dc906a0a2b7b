//! Rate multiplication and rounding contract.
//!
//! Amounts are converted with `floor` semantics at the amount's storage scale:
//! scale 0 for minor units (cents), scale 10 for decimal investment amounts.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// How a converted amount is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    /// `floor(abs(amount) * rate)` with the original sign reapplied.
    ///
    /// Used for minor-unit amounts whose sign lives in a separate field.
    #[default]
    FloorMagnitude,
    /// `floor(amount * rate)` on the signed value.
    ///
    /// Used for decimal investment amounts where the sign carries meaning.
    FloorRaw,
}

/// Converts `amount` with `rate`, flooring at `scale` decimal places.
///
/// Zero stays zero whatever the rate.
pub fn convert(amount: Decimal, rate: Decimal, mode: RoundingMode, scale: u32) -> Result<Decimal> {
    if amount.is_zero() {
        return Ok(Decimal::ZERO);
    }

    match mode {
        RoundingMode::FloorMagnitude => {
            let magnitude = checked_product(amount.abs(), rate)?
                .round_dp_with_strategy(scale, RoundingStrategy::ToNegativeInfinity);
            Ok(if amount.is_sign_negative() {
                -magnitude
            } else {
                magnitude
            })
        }
        RoundingMode::FloorRaw => Ok(checked_product(amount, rate)?
            .round_dp_with_strategy(scale, RoundingStrategy::ToNegativeInfinity)),
    }
}

/// Converts an integer minor-unit amount (cents).
pub fn convert_minor_units(amount: i64, rate: Decimal, mode: RoundingMode) -> Result<i64> {
    if amount == 0 {
        return Ok(0);
    }
    let converted = convert(Decimal::from(amount), rate, mode, 0)?;
    converted.to_i64().ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Converted amount {} does not fit in minor units",
            converted
        )))
    })
}

fn checked_product(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    amount.checked_mul(rate).ok_or_else(|| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "Overflow converting {} with rate {}",
            amount, rate
        )))
    })
}
