//! In-memory ban repository

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::ban::{Ban, BanRepository, BanScope};
use crate::domain::DomainError;

/// In-memory implementation of BanRepository.
///
/// Used by the memory storage backend and in tests. Bans are matched in
/// insertion order; the first match wins. Clones share the underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBanRepository {
    bans: Arc<RwLock<Vec<Ban>>>,
}

impl InMemoryBanRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with bans
    pub fn with_bans(bans: Vec<Ban>) -> Self {
        Self {
            bans: Arc::new(RwLock::new(bans)),
        }
    }

    /// Add a ban
    pub async fn add(&self, ban: Ban) {
        self.bans.write().await.push(ban);
    }

    async fn find(&self, scope: BanScope, value: &str) -> Result<Option<Ban>, DomainError> {
        let bans = self.bans.read().await;

        Ok(bans
            .iter()
            .find(|ban| ban.scope() == scope && ban.matches(value))
            .cloned())
    }
}

#[async_trait]
impl BanRepository for InMemoryBanRepository {
    async fn find_username_ban(&self, username: &str) -> Result<Option<Ban>, DomainError> {
        self.find(BanScope::Username, username).await
    }

    async fn find_email_ban(&self, email: &str) -> Result<Option<Ban>, DomainError> {
        self.find(BanScope::Email, email).await
    }
}
