//! Cache module - key/value store with TTLs and pattern deletion.

mod cache_traits;
mod memory_cache;

pub use cache_traits::CacheStoreTrait;
pub use memory_cache::MemoryCacheStore;
