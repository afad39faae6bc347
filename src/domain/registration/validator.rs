//! Registration validation flow
//!
//! One validator covers both registration variants:
//!
//! - [`RegistrationValidator::validate`] runs the full flow for direct
//!   sign-ups: field checks, password strength, pluggable rules, then the
//!   CAPTCHA check.
//! - [`RegistrationValidator::validate_social`] runs the same flow minus the
//!   password and CAPTCHA steps, for accounts arriving through an external
//!   identity provider.
//!
//! All checks before the CAPTCHA accumulate into one [`FieldErrors`] and are
//! raised together; the CAPTCHA check runs only once that combined raise
//! point has passed and fails on its own.

use std::sync::Arc;

use crate::domain::ban::BanRepository;
use crate::domain::captcha::CaptchaProvider;
use crate::domain::password::PasswordPolicy;
use crate::domain::user::{
    slugify, validate_email, validate_username, UserRepository, UsernameLimits,
};
use crate::domain::DomainError;

use super::error::RegistrationError;
use super::field_errors::FieldErrors;
use super::input::{RegistrationContext, RegistrationInput, ValidatedRegistration};
use super::rules::RegistrationRuleSet;

const USERNAME_NOT_ALLOWED: &str = "This username is not allowed.";
const USERNAME_NOT_AVAILABLE: &str = "This username is not available.";
const EMAIL_NOT_ALLOWED: &str = "This e-mail address is not allowed.";
const EMAIL_NOT_AVAILABLE: &str = "This e-mail address is not available.";

/// Validates and normalizes registration input
#[derive(Debug)]
pub struct RegistrationValidator {
    users: Arc<dyn UserRepository>,
    bans: Arc<dyn BanRepository>,
    captcha: Arc<dyn CaptchaProvider>,
    username_limits: UsernameLimits,
    password_policy: PasswordPolicy,
    rules: RegistrationRuleSet,
}

impl RegistrationValidator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        bans: Arc<dyn BanRepository>,
        captcha: Arc<dyn CaptchaProvider>,
    ) -> Self {
        Self {
            users,
            bans,
            captcha,
            username_limits: UsernameLimits::default(),
            password_policy: PasswordPolicy::default(),
            rules: RegistrationRuleSet::new(),
        }
    }

    pub fn with_username_limits(mut self, limits: UsernameLimits) -> Self {
        self.username_limits = limits;
        self
    }

    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    pub fn with_rules(mut self, rules: RegistrationRuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Validate a direct registration attempt.
    ///
    /// Returns normalized data on success. On failure, all field errors are
    /// raised together as [`RegistrationError::Invalid`]; a CAPTCHA rejection
    /// is raised separately as [`RegistrationError::Captcha`].
    pub async fn validate(
        &self,
        input: RegistrationInput,
        context: &RegistrationContext,
    ) -> Result<ValidatedRegistration, RegistrationError> {
        let input = input.normalize();
        let mut errors = FieldErrors::new();

        self.check_username(&input.username, &mut errors).await?;
        self.check_email(&input.email, &mut errors).await?;
        self.check_password(&input, &mut errors);
        self.rules.check(&input, &mut errors).await?;

        errors.into_result()?;

        self.captcha
            .verify(
                context.captcha_solution.as_deref(),
                context.client_ip.as_deref(),
            )
            .await
            .map_err(|e| RegistrationError::Captcha(e.to_string()))?;

        Ok(ValidatedRegistration::from_input(input))
    }

    /// Validate a social registration attempt.
    ///
    /// The external identity provider owns the credentials, so there is no
    /// password to check and no CAPTCHA challenge. The submitted password
    /// field, if any, is discarded.
    pub async fn validate_social(
        &self,
        input: RegistrationInput,
    ) -> Result<ValidatedRegistration, RegistrationError> {
        let mut input = input.normalize();
        input.password = None;

        let mut errors = FieldErrors::new();

        self.check_username(&input.username, &mut errors).await?;
        self.check_email(&input.email, &mut errors).await?;
        self.rules.check(&input, &mut errors).await?;

        errors.into_result()?;

        Ok(ValidatedRegistration::from_input(input))
    }

    /// Username checks run in order and stop at the first failure for this
    /// field: format, availability, then bans. Other fields keep validating.
    async fn check_username(
        &self,
        username: &str,
        errors: &mut FieldErrors,
    ) -> Result<(), DomainError> {
        if let Err(e) = validate_username(username, &self.username_limits) {
            errors.add("username", e.to_string());
            return Ok(());
        }

        if self.users.slug_exists(&slugify(username)).await? {
            errors.add("username", USERNAME_NOT_AVAILABLE);
            return Ok(());
        }

        if let Some(ban) = self.bans.find_username_ban(username).await? {
            let message = ban.user_message().unwrap_or(USERNAME_NOT_ALLOWED);
            errors.add("username", message);
        }

        Ok(())
    }

    async fn check_email(&self, email: &str, errors: &mut FieldErrors) -> Result<(), DomainError> {
        if let Err(e) = validate_email(email) {
            errors.add("email", e.to_string());
            return Ok(());
        }

        if self.users.email_exists(email).await? {
            errors.add("email", EMAIL_NOT_AVAILABLE);
            return Ok(());
        }

        if let Some(ban) = self.bans.find_email_ban(email).await? {
            let message = ban.user_message().unwrap_or(EMAIL_NOT_ALLOWED);
            errors.add("email", message);
        }

        Ok(())
    }

    /// Password strength runs only when a non-empty password was submitted;
    /// the policy sees the username and e-mail so similarity rules can
    /// compare against them.
    fn check_password(&self, input: &RegistrationInput, errors: &mut FieldErrors) {
        let password = match input.password.as_deref() {
            None => {
                errors.add("password", "This field is required.");
                return;
            }
            Some("") => {
                errors.add("password", "This field may not be blank.");
                return;
            }
            Some(password) => password,
        };

        let identity = [
            ("username", input.username.as_str()),
            ("e-mail address", input.email.as_str()),
        ];

        errors.extend("password", self.password_policy.validate(password, &identity));
    }
}
