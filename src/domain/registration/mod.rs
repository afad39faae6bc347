//! Registration domain
//!
//! Sequential field validation for new accounts: username and e-mail format,
//! availability and ban checks, password strength, pluggable business rules,
//! and the CAPTCHA gate.

mod error;
mod field_errors;
mod input;
mod rules;
mod validator;

pub use error::RegistrationError;
pub use field_errors::FieldErrors;
pub use input::{RegistrationContext, RegistrationInput, ValidatedRegistration};
pub use rules::{BlockedEmailDomains, RegistrationRule, RegistrationRuleSet};
pub use validator::RegistrationValidator;
