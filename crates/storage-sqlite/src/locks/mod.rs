//! Database-backed named leases, shared by every process using the file.

mod repository;

pub use repository::SqliteLockProvider;
