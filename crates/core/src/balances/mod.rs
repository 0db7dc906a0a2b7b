//! Balances module - daily base-currency balance snapshots per account.

mod balances_model;

pub use balances_model::{Balance, BalanceAmountUpdate};
