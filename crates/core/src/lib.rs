//! Ledgerly Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the multi-currency ledger,
//! including the base-currency rebasing engine. It is database-agnostic and
//! defines traits that are implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod balances;
pub mod cache;
pub mod constants;
pub mod currencies;
pub mod errors;
pub mod events;
pub mod fx;
pub mod investments;
pub mod locks;
pub mod money;
pub mod rebase;
pub mod ref_amount;
pub mod transactions;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
