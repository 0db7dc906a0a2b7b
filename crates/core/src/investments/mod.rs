//! Investments module - portfolio-scoped decimal amounts.

mod investments_model;

pub use investments_model::*;
