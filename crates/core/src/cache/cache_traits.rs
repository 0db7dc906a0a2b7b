use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Result;

#[async_trait]
pub trait CacheStoreTrait: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;

    /// Deletes every key matching a glob `pattern` (`*` matches any run of
    /// characters, `?` a single one). Returns the number of deleted keys.
    async fn delete_by_pattern(&self, pattern: &str) -> Result<usize>;
}
