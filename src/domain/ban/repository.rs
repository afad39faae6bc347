//! Ban repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::Ban;
use crate::domain::DomainError;

/// Repository trait for ban lookups.
///
/// All lookups are registration-scope: both general bans and bans flagged
/// `registration_only` are considered, and expired bans are never returned.
#[async_trait]
pub trait BanRepository: Send + Sync + Debug {
    /// Find the first ban matching the given username
    async fn find_username_ban(&self, username: &str) -> Result<Option<Ban>, DomainError>;

    /// Find the first ban matching the given e-mail address
    async fn find_email_ban(&self, email: &str) -> Result<Option<Ban>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::ban::BanScope;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock ban repository for testing
    #[derive(Debug, Default)]
    pub struct MockBanRepository {
        bans: Arc<RwLock<Vec<Ban>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockBanRepository {
        /// Create an empty mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a ban to the mock store
        pub async fn add(&self, ban: Ban) {
            self.bans.write().await.push(ban);
        }

        /// Set whether lookups should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn find(&self, scope: BanScope, value: &str) -> Result<Option<Ban>, DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }

            let bans = self.bans.read().await;
            Ok(bans
                .iter()
                .find(|ban| ban.scope() == scope && ban.matches(value))
                .cloned())
        }
    }

    #[async_trait]
    impl BanRepository for MockBanRepository {
        async fn find_username_ban(&self, username: &str) -> Result<Option<Ban>, DomainError> {
            self.find(BanScope::Username, username).await
        }

        async fn find_email_ban(&self, email: &str) -> Result<Option<Ban>, DomainError> {
            self.find(BanScope::Email, email).await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_find_username_ban() {
            let repo = MockBanRepository::new();
            repo.add(Ban::new(BanScope::Username, "spammer*")).await;

            let ban = repo.find_username_ban("spammer42").await.unwrap();
            assert!(ban.is_some());

            let ban = repo.find_username_ban("regular").await.unwrap();
            assert!(ban.is_none());
        }

        #[tokio::test]
        async fn test_scopes_are_separate() {
            let repo = MockBanRepository::new();
            repo.add(Ban::new(BanScope::Email, "*@blocked.example")).await;

            let ban = repo.find_username_ban("user@blocked.example").await.unwrap();
            assert!(ban.is_none());

            let ban = repo.find_email_ban("user@blocked.example").await.unwrap();
            assert!(ban.is_some());
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockBanRepository::new();
            repo.set_should_fail(true).await;

            assert!(repo.find_username_ban("anyone").await.is_err());
        }
    }
}
