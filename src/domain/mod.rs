//! Domain layer - Core business logic and entities

pub mod ban;
pub mod captcha;
pub mod error;
pub mod password;
pub mod registration;
pub mod user;

pub use ban::{Ban, BanRepository, BanScope};
pub use captcha::{CaptchaError, CaptchaProvider};
pub use error::DomainError;
pub use password::PasswordPolicy;
pub use registration::{
    FieldErrors, RegistrationContext, RegistrationError, RegistrationInput, RegistrationRule,
    RegistrationRuleSet, RegistrationValidator, ValidatedRegistration,
};
pub use user::{User, UserRepository, UserStatus, UsernameLimits};
