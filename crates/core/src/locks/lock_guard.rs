use std::sync::Arc;

use super::locks_model::LockToken;
use super::locks_traits::LockProviderTrait;

/// Held lease that is released even when its holder unwinds or is dropped.
///
/// Call [`LockGuard::release`] on the normal path. If the guard is dropped
/// while still holding the lease, release is spawned on the current tokio
/// runtime.
pub struct LockGuard {
    locks: Arc<dyn LockProviderTrait>,
    token: Option<LockToken>,
}

impl LockGuard {
    pub fn new(locks: Arc<dyn LockProviderTrait>, token: LockToken) -> Self {
        Self {
            locks,
            token: Some(token),
        }
    }

    pub async fn release(mut self) {
        if let Some(token) = self.token.take() {
            release_logged(self.locks.as_ref(), &token).await;
        }
    }
}

async fn release_logged(locks: &dyn LockProviderTrait, token: &LockToken) {
    match locks.release(token).await {
        Ok(true) => log::debug!("Released lock {}", token.key),
        Ok(false) => log::warn!("Lock {} was no longer held at release", token.key),
        Err(e) => log::error!("Failed to release lock {}: {}", token.key, e),
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        log::warn!("Lock {} dropped while held, releasing in background", token.key);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let locks = self.locks.clone();
                handle.spawn(async move {
                    release_logged(locks.as_ref(), &token).await;
                });
            }
            Err(_) => log::error!(
                "No runtime to release lock {}; it expires at {}",
                token.key,
                token.expires_at
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locks::MemoryLockProvider;
    use std::time::Duration;

    #[tokio::test]
    async fn test_release_frees_the_key() {
        let locks = Arc::new(MemoryLockProvider::new());
        let token = locks.acquire("k", Duration::from_secs(60)).await.unwrap().unwrap();
        LockGuard::new(locks.clone(), token).release().await;
        assert!(!locks.is_locked("k"));
    }

    #[tokio::test]
    async fn test_dropped_guard_releases_in_background() {
        let locks = Arc::new(MemoryLockProvider::new());
        let token = locks.acquire("k", Duration::from_secs(60)).await.unwrap().unwrap();
        drop(LockGuard::new(locks.clone(), token));

        for _ in 0..50 {
            if !locks.is_locked("k") {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!locks.is_locked("k"));
    }
}
