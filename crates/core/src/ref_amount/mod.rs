//! Ref amount module - one-off conversion of an amount into a user's base
//! currency, cached per user.

mod ref_amount_model;
mod ref_amount_service;


pub use ref_amount_model::{ref_amount_cache_key, RefAmountRequest};
pub use ref_amount_service::{RefAmountService, RefAmountServiceTrait};
