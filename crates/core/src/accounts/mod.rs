//! Accounts module - domain models.

mod accounts_constants;
mod accounts_model;

pub use accounts_constants::*;
pub use accounts_model::{Account, AccountRefUpdate};
