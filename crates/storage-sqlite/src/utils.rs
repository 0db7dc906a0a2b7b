//! Helpers shared by the SQLite repositories.

use std::str::FromStr;

use ledgerly_core::errors::{Result, ValidationError};
use rust_decimal::Decimal;

/// Maximum number of parameters bound in one `IN (...)` clause.
///
/// SQLite caps bound parameters per statement (SQLITE_MAX_VARIABLE_NUMBER,
/// commonly 999), so id lists are split into chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices no longer than [`SQLITE_MAX_PARAMS_CHUNK`].
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Decimal columns are stored as TEXT.
pub fn parse_decimal(value: &str, column: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim()).map_err(|e| {
        log::error!("Unreadable decimal '{}' in column {}: {}", value, column, e);
        ValidationError::DecimalParse(e).into()
    })
}

pub fn format_decimal(value: &Decimal) -> String {
    value.to_string()
}
