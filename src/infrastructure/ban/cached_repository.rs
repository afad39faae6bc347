//! Ban repository wrapper that adds caching with TTL

use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::ban::{Ban, BanRepository, BanScope};
use crate::domain::DomainError;

/// Cache key: scope plus the looked-up value, lowercased so that lookups
/// differing only in case share an entry (ban matching is case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey(BanScope, String);

impl CacheKey {
    fn new(scope: BanScope, value: &str) -> Self {
        Self(scope, value.to_lowercase())
    }
}

/// Ban repository wrapper that caches lookup results.
///
/// Registration bursts tend to hammer the same handful of values, and ban
/// edits are rare, so results (including misses) are held for a short TTL.
#[derive(Debug)]
pub struct CachedBanRepository<R: BanRepository> {
    inner: R,
    cache: Cache<CacheKey, Option<Ban>>,
}

impl<R: BanRepository> CachedBanRepository<R> {
    pub fn new(inner: R, ttl: Duration, capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(capacity)
            .build();

        Self { inner, cache }
    }

    /// Drop all cached lookups, forcing fresh reads
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    async fn find(&self, scope: BanScope, value: &str) -> Result<Option<Ban>, DomainError> {
        let key = CacheKey::new(scope, value);

        if let Some(cached) = self.cache.get(&key).await {
            // a cached hit may have expired since it was stored
            match &cached {
                Some(ban) if ban.is_expired() => {
                    self.cache.invalidate(&key).await;
                }
                _ => {
                    tracing::debug!(scope = scope.as_str(), "Ban lookup cache hit");
                    return Ok(cached);
                }
            }
        }

        let result = match scope {
            BanScope::Username => self.inner.find_username_ban(value).await?,
            BanScope::Email => self.inner.find_email_ban(value).await?,
        };

        self.cache.insert(key, result.clone()).await;

        Ok(result)
    }
}

#[async_trait]
impl<R: BanRepository> BanRepository for CachedBanRepository<R> {
    async fn find_username_ban(&self, username: &str) -> Result<Option<Ban>, DomainError> {
        self.find(BanScope::Username, username).await
    }

    async fn find_email_ban(&self, email: &str) -> Result<Option<Ban>, DomainError> {
        self.find(BanScope::Email, email).await
    }
}

// Lets the wrapper cache a repository picked at runtime:
// CachedBanRepository<Arc<dyn BanRepository>>.
#[async_trait]
impl BanRepository for Arc<dyn BanRepository> {
    async fn find_username_ban(&self, username: &str) -> Result<Option<Ban>, DomainError> {
        self.as_ref().find_username_ban(username).await
    }

    async fn find_email_ban(&self, email: &str) -> Result<Option<Ban>, DomainError> {
        self.as_ref().find_email_ban(email).await
    }
}
