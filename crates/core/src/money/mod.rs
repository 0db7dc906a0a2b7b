//! Money module - fixed-point conversion of monetary amounts between currencies.

mod rounding;

pub use rounding::{convert, convert_minor_units, RoundingMode};
