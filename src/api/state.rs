//! Application state for shared services

use std::sync::Arc;

use serde::Serialize;

use crate::domain::ban::BanRepository;
use crate::domain::registration::{RegistrationContext, RegistrationError, RegistrationInput};
use crate::domain::user::User;
use crate::infrastructure::registration::RegistrationService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub registration_service: Arc<dyn RegistrationServiceTrait>,
    pub ban_repository: Arc<dyn BanRepository>,
    pub criteria: Arc<RegistrationCriteria>,
}

impl AppState {
    pub fn new(
        registration_service: Arc<dyn RegistrationServiceTrait>,
        ban_repository: Arc<dyn BanRepository>,
        criteria: RegistrationCriteria,
    ) -> Self {
        Self {
            registration_service,
            ban_repository,
            criteria: Arc::new(criteria),
        }
    }
}

/// Trait for registration service operations
#[async_trait::async_trait]
pub trait RegistrationServiceTrait: Send + Sync {
    async fn register(
        &self,
        input: RegistrationInput,
        context: RegistrationContext,
    ) -> Result<User, RegistrationError>;

    async fn register_social(&self, input: RegistrationInput) -> Result<User, RegistrationError>;
}

#[async_trait::async_trait]
impl RegistrationServiceTrait for RegistrationService {
    async fn register(
        &self,
        input: RegistrationInput,
        context: RegistrationContext,
    ) -> Result<User, RegistrationError> {
        RegistrationService::register(self, input, context).await
    }

    async fn register_social(&self, input: RegistrationInput) -> Result<User, RegistrationError> {
        RegistrationService::register_social(self, input).await
    }
}

/// Form requirements exposed to clients so the registration UI can mirror
/// server-side rules
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationCriteria {
    pub username: UsernameCriteria,
    pub password: PasswordCriteria,
    pub captcha: CaptchaCriteria,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameCriteria {
    pub min_length: usize,
    pub max_length: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordCriteria {
    pub min_length: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CaptchaCriteria {
    /// "disabled", "recaptcha" or "qa"
    pub provider: String,
    /// Public reCAPTCHA key for the widget, when that provider is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_key: Option<String>,
    /// The test question, when the qa provider is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_serialization_skips_absent_captcha_details() {
        let criteria = RegistrationCriteria {
            username: UsernameCriteria {
                min_length: 3,
                max_length: 14,
            },
            password: PasswordCriteria { min_length: 8 },
            captcha: CaptchaCriteria {
                provider: "disabled".to_string(),
                site_key: None,
                question: None,
            },
        };

        let json = serde_json::to_string(&criteria).unwrap();
        assert!(json.contains("\"min_length\":3"));
        assert!(json.contains("\"provider\":\"disabled\""));
        assert!(!json.contains("site_key"));
        assert!(!json.contains("question"));
    }
}
