use std::time::Duration;

use async_trait::async_trait;

use super::locks_model::LockToken;
use crate::errors::Result;

/// Non-blocking lease on a named key.
#[async_trait]
pub trait LockProviderTrait: Send + Sync {
    /// Returns `None` when another holder owns an unexpired lease on `key`.
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<Option<LockToken>>;

    /// Releases the lease if `token` still owns it. Returns whether a lease
    /// was removed.
    async fn release(&self, token: &LockToken) -> Result<bool>;
}
