//! In-process lock provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::locks_model::LockToken;
use super::locks_traits::LockProviderTrait;
use crate::errors::{Error, Result};

#[derive(Debug, Clone)]
struct Lease {
    token: String,
    expires_at: Instant,
}

impl Lease {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Lock provider for a single process. Expired leases are taken over by the
/// next caller.
#[derive(Debug, Default)]
pub struct MemoryLockProvider {
    leases: DashMap<String, Lease>,
}

impl MemoryLockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self, key: &str) -> bool {
        self.leases
            .get(key)
            .map(|lease| !lease.is_expired())
            .unwrap_or(false)
    }
}

#[async_trait]
impl LockProviderTrait for MemoryLockProvider {
    async fn acquire(&self, key: &str, ttl: Duration) -> Result<Option<LockToken>> {
        let expires_at_utc = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| Error::Unexpected(format!("Invalid lock TTL: {}", e)))?;
        let token = LockToken::new(key, expires_at_utc);
        let lease = Lease {
            token: token.token.clone(),
            expires_at: Instant::now() + ttl,
        };

        match self.leases.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_expired() {
                    log::debug!("Lock {} is held by another caller", key);
                    return Ok(None);
                }
                log::warn!("Taking over expired lock {}", key);
                occupied.insert(lease);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(lease);
            }
        }
        Ok(Some(token))
    }

    async fn release(&self, token: &LockToken) -> Result<bool> {
        let removed = self
            .leases
            .remove_if(&token.key, |_, lease| lease.token == token.token)
            .is_some();
        if !removed {
            log::warn!("Lock {} was not held by the releasing token", token.key);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_acquire_fails_until_release() {
        let provider = MemoryLockProvider::new();
        let ttl = Duration::from_secs(60);

        let first = provider.acquire("k", ttl).await.unwrap().unwrap();
        assert!(provider.acquire("k", ttl).await.unwrap().is_none());
        assert!(provider.is_locked("k"));

        assert!(provider.release(&first).await.unwrap());
        assert!(!provider.is_locked("k"));
        assert!(provider.acquire("k", ttl).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_expired_lease_can_be_taken_over() {
        let provider = MemoryLockProvider::new();

        let stale = provider.acquire("k", Duration::ZERO).await.unwrap().unwrap();
        let fresh = provider
            .acquire("k", Duration::from_secs(60))
            .await
            .unwrap()
            .unwrap();

        // The stale holder can no longer release the new lease.
        assert!(!provider.release(&stale).await.unwrap());
        assert!(provider.is_locked("k"));
        assert!(provider.release(&fresh).await.unwrap());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let provider = MemoryLockProvider::new();
        let ttl = Duration::from_secs(60);

        assert!(provider.acquire("a", ttl).await.unwrap().is_some());
        assert!(provider.acquire("b", ttl).await.unwrap().is_some());
    }
}
