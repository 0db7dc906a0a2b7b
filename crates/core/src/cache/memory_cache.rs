//! In-process cache store.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use regex::Regex;

use super::cache_traits::CacheStoreTrait;
use crate::errors::{Error, Result};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_valid(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops expired entries.
    pub fn clean_expired(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let keep = entry.is_valid();
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}

/// Translates a glob into an anchored regex.
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str(".*"),
            '?' => expr.push('.'),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|e| Error::Cache(format!("Invalid pattern '{}': {}", pattern, e)))
}

#[async_trait]
impl CacheStoreTrait for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let hit = match self.entries.get(key) {
            Some(entry) if entry.is_valid() => Some(entry.value.clone()),
            Some(_) => None,
            None => return Ok(None),
        };
        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| !entry.is_valid());
        }
        Ok(hit)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<usize> {
        let matcher = glob_to_regex(pattern)?;
        // Counted in place: concurrent inserts change len() mid-retain.
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let keep = !matcher.is_match(key);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCacheStore::new();
        cache.set("a", "1".to_string(), HOUR).await.unwrap();
        assert_eq!(cache.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(cache.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_misses() {
        let cache = MemoryCacheStore::new();
        cache.set("a", "1".to_string(), Duration::ZERO).await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_delete_by_pattern_only_touches_matching_user() {
        let cache = MemoryCacheStore::new();
        cache.set("ref_amount:1:100:EUR:default:2024-01-01", "90".into(), HOUR).await.unwrap();
        cache.set("ref_amount:1:5:USD:EUR:2024-01-02", "4".into(), HOUR).await.unwrap();
        cache.set("ref_amount:11:100:EUR:default:2024-01-01", "90".into(), HOUR).await.unwrap();
        cache.set("other:1", "x".into(), HOUR).await.unwrap();

        let deleted = cache.delete_by_pattern("ref_amount:1:*").await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(cache.len(), 2);
        assert!(cache.get("ref_amount:11:100:EUR:default:2024-01-01").await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_delete_by_pattern_tolerates_concurrent_inserts() {
        let cache = Arc::new(MemoryCacheStore::new());
        for i in 0..50 {
            cache.set(&format!("ref_amount:1:{}", i), "1".into(), HOUR).await.unwrap();
        }

        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..20_000 {
                    cache.set(&format!("ref_amount:2:{}", i), "2".into(), HOUR).await.unwrap();
                }
            })
        };
        let deleters: Vec<_> = (0..200)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.delete_by_pattern("ref_amount:1:*").await.unwrap() })
            })
            .collect();

        let mut deleted = 0;
        for handle in deleters {
            deleted += handle.await.unwrap();
        }
        writer.await.unwrap();

        assert_eq!(deleted, 50);
        assert_eq!(cache.len(), 20_000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_clean_expired_tolerates_concurrent_inserts() {
        let cache = Arc::new(MemoryCacheStore::new());
        for i in 0..50 {
            cache.set(&format!("stale:{}", i), "x".into(), Duration::ZERO).await.unwrap();
        }

        let writer = {
            let cache = cache.clone();
            tokio::spawn(async move {
                for i in 0..20_000 {
                    cache.set(&format!("fresh:{}", i), "y".into(), HOUR).await.unwrap();
                }
            })
        };
        let sweepers: Vec<_> = (0..200)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.clean_expired() })
            })
            .collect();

        let mut removed = 0;
        for handle in sweepers {
            removed += handle.await.unwrap();
        }
        writer.await.unwrap();

        assert_eq!(removed, 50);
        assert_eq!(cache.len(), 20_000);
    }

    #[test]
    fn test_glob_escapes_regex_metacharacters() {
        let matcher = glob_to_regex("a.b:*").unwrap();
        assert!(matcher.is_match("a.b:c"));
        assert!(!matcher.is_match("axb:c"));
    }
}
