//! Registration service
//!
//! Ties the validation flow to account creation: validated data is hashed
//! and persisted, and the new account is handed back to the HTTP layer.

use std::sync::Arc;

use tracing::info;

use crate::domain::registration::{
    RegistrationContext, RegistrationError, RegistrationInput, RegistrationValidator,
};
use crate::domain::user::{User, UserRepository};
use crate::infrastructure::password::PasswordHasher;

/// Coordinates validation and account creation for registration attempts
#[derive(Debug)]
pub struct RegistrationService {
    validator: RegistrationValidator,
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegistrationService {
    pub fn new(
        validator: RegistrationValidator,
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            validator,
            users,
            hasher,
        }
    }

    /// Handle a direct registration attempt: validate, hash the password,
    /// and create the account.
    pub async fn register(
        &self,
        input: RegistrationInput,
        context: RegistrationContext,
    ) -> Result<User, RegistrationError> {
        let data = self.validator.validate(input, &context).await?;

        // full validation guarantees a password is present
        let password_hash = match data.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password)?),
            None => None,
        };

        let user = self
            .users
            .create(User::new(data.username, data.email, password_hash))
            .await?;

        info!(username = user.username(), "New account registered");

        Ok(user)
    }

    /// Handle a social registration attempt. The account is created without
    /// a password; credentials stay with the external identity provider.
    pub async fn register_social(
        &self,
        input: RegistrationInput,
    ) -> Result<User, RegistrationError> {
        let data = self.validator.validate_social(input).await?;

        let user = self
            .users
            .create(User::new(data.username, data.email, None))
            .await?;

        info!(
            username = user.username(),
            "New account registered through social sign-up"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ban::{Ban, BanScope, MockBanRepository};
    use crate::domain::captcha::mock::MockCaptchaProvider;
    use crate::domain::registration::FieldErrors;
    use crate::infrastructure::password::Argon2Hasher;
    use crate::infrastructure::user::InMemoryUserRepository;

    fn service_with(
        users: InMemoryUserRepository,
        bans: MockBanRepository,
        captcha: MockCaptchaProvider,
    ) -> RegistrationService {
        let users = Arc::new(users);
        let validator =
            RegistrationValidator::new(users.clone(), Arc::new(bans), Arc::new(captcha));

        RegistrationService::new(validator, users, Arc::new(Argon2Hasher::new()))
    }

    fn service() -> RegistrationService {
        service_with(
            InMemoryUserRepository::new(),
            MockBanRepository::new(),
            MockCaptchaProvider::passing(),
        )
    }

    fn input() -> RegistrationInput {
        RegistrationInput::new(
            "BobAllen",
            "bob@example.com",
            Some("correct horse battery".to_string()),
        )
    }

    fn errors_of(result: Result<User, RegistrationError>) -> FieldErrors {
        match result {
            Err(RegistrationError::Invalid(errors)) => errors,
            other => panic!("expected Invalid, got {:?}", other.map(|u| u.id())),
        }
    }

    #[tokio::test]
    async fn test_register_creates_account_with_hashed_password() {
        let service = service();

        let user = service
            .register(input(), RegistrationContext::default())
            .await
            .unwrap();

        assert_eq!(user.username(), "BobAllen");
        assert_eq!(user.slug(), "boballen");

        let hash = user.password_hash().expect("password hash is set");
        assert_ne!(hash, "correct horse battery");
        assert!(Argon2Hasher::new().verify("correct horse battery", hash));
    }

    #[tokio::test]
    async fn test_register_surfaces_field_errors() {
        let bans = MockBanRepository::new();
        bans.add(Ban::new(BanScope::Username, "bob*")).await;
        let service = service_with(
            InMemoryUserRepository::new(),
            bans,
            MockCaptchaProvider::passing(),
        );

        let errors = errors_of(service.register(input(), RegistrationContext::default()).await);

        assert_eq!(
            errors.get("username").unwrap(),
            &["This username is not allowed.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_register_propagates_captcha_failure() {
        let service = service_with(
            InMemoryUserRepository::new(),
            MockBanRepository::new(),
            MockCaptchaProvider::rejecting("Entered answer is incorrect."),
        );

        let result = service
            .register(input(), RegistrationContext::default())
            .await;

        assert!(matches!(result, Err(RegistrationError::Captcha(_))));
    }

    #[tokio::test]
    async fn test_second_registration_sees_taken_fields() {
        let service = service();

        service
            .register(input(), RegistrationContext::default())
            .await
            .unwrap();

        let errors = errors_of(service.register(input(), RegistrationContext::default()).await);

        assert_eq!(
            errors.get("username").unwrap(),
            &["This username is not available.".to_string()]
        );
        assert_eq!(
            errors.get("email").unwrap(),
            &["This e-mail address is not available.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_register_social_creates_account_without_password() {
        let service = service();

        let user = service
            .register_social(RegistrationInput::new("BobAllen", "bob@example.com", None))
            .await
            .unwrap();

        assert!(user.password_hash().is_none());
    }
}
