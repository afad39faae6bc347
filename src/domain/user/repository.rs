//! Account repository trait

use async_trait::async_trait;
use std::fmt::Debug;
use uuid::Uuid;

use super::entity::User;
use crate::domain::DomainError;

/// Repository trait for account storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get an account by its ID
    async fn get(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Get an account by its slug (lowercased username)
    async fn get_by_slug(&self, slug: &str) -> Result<Option<User>, DomainError>;

    /// Get an account by e-mail address, compared case-insensitively
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new account
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Check whether a slug is already taken
    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_slug(slug).await?.is_some())
    }

    /// Check whether an e-mail address is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }
}
