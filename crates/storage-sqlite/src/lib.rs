//! SQLite storage implementation for Ledgerly.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `ledgerly-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The ledger unit of work used by base currency changes
//! - Repositories for user currencies, exchange rates and locks
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod currencies;
pub mod fx;
pub mod ledger;
pub mod locks;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use currencies::UserCurrencyRepository;
pub use fx::FxRepository;
pub use ledger::{SqliteLedgerStore, SqliteUnitOfWork};
pub use locks::SqliteLockProvider;

// Re-export from ledgerly-core for convenience
pub use ledgerly_core::errors::{DatabaseError, Error, Result};
