//! Forum account entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::slugify;

/// Status of a forum account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// Account is active and can sign in
    #[default]
    Active,
    /// Account is suspended by moderation
    Suspended,
}

impl UserStatus {
    pub fn can_sign_in(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// A forum account created from validated registration data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    id: Uuid,
    /// Display username as entered at registration
    username: String,
    /// Lowercased username, unique across the forum
    slug: String,
    /// Normalized e-mail address
    email: String,
    /// Argon2 password hash. Absent for accounts created through social
    /// registration, which never set a password here.
    #[serde(skip_serializing)]
    password_hash: Option<String>,
    status: UserStatus,
    joined_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new account. The slug is derived from the username.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: Option<String>,
    ) -> Self {
        let username = username.into();
        let slug = slugify(&username);
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            username,
            slug,
            email: email.into(),
            password_hash,
            status: UserStatus::Active,
            joined_at: now,
            updated_at: now,
        }
    }

    /// Rebuild an account from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        username: String,
        slug: String,
        email: String,
        password_hash: Option<String>,
        status: UserStatus,
        joined_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            slug,
            email,
            password_hash,
            status,
            joined_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.status.can_sign_in()
    }

    // Mutators

    /// Replace the password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = Some(password_hash.into());
        self.touch();
    }

    /// Suspend the account
    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
        self.touch();
    }

    /// Reactivate a suspended account
    pub fn activate(&mut self) {
        if self.status == UserStatus::Suspended {
            self.status = UserStatus::Active;
            self.touch();
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_derives_slug() {
        let user = User::new("BobAllen", "bob@example.com", Some("hash".to_string()));

        assert_eq!(user.username(), "BobAllen");
        assert_eq!(user.slug(), "boballen");
        assert_eq!(user.email(), "bob@example.com");
        assert!(user.is_active());
    }

    #[test]
    fn test_social_user_has_no_password() {
        let user = User::new("BobAllen", "bob@example.com", None);

        assert!(user.password_hash().is_none());
    }

    #[test]
    fn test_suspend_and_activate() {
        let mut user = User::new("BobAllen", "bob@example.com", None);

        user.suspend();
        assert!(!user.is_active());
        assert_eq!(user.status(), UserStatus::Suspended);

        user.activate();
        assert!(user.is_active());
    }

    #[test]
    fn test_set_password_hash_touches_timestamp() {
        let mut user = User::new("BobAllen", "bob@example.com", None);
        let original_updated = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_password_hash("new-hash");
        assert_eq!(user.password_hash(), Some("new-hash"));
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_serialization_excludes_password_hash() {
        let user = User::new("BobAllen", "bob@example.com", Some("secret-hash".to_string()));

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn test_restore_round_trip() {
        let original = User::new("BobAllen", "bob@example.com", Some("hash".to_string()));

        let restored = User::restore(
            original.id(),
            original.username().to_string(),
            original.slug().to_string(),
            original.email().to_string(),
            original.password_hash().map(String::from),
            original.status(),
            original.joined_at(),
            original.updated_at(),
        );

        assert_eq!(restored.id(), original.id());
        assert_eq!(restored.slug(), original.slug());
        assert_eq!(restored.password_hash(), original.password_hash());
    }
}
