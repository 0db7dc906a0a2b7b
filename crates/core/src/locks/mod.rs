//! Locks module - named, TTL-bounded mutual exclusion.

mod lock_guard;
mod locks_model;
mod locks_traits;
mod memory_lock;

pub use lock_guard::LockGuard;
pub use locks_model::{rebase_lock_key, LockToken};
pub use locks_traits::LockProviderTrait;
pub use memory_lock::MemoryLockProvider;
