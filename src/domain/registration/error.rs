//! Registration failure modes

use thiserror::Error;

use super::field_errors::FieldErrors;
use crate::domain::DomainError;

/// How a registration attempt can fail.
///
/// `Invalid` carries the complete set of accumulated field errors and is the
/// single combined raise point for username, e-mail, password, and
/// business-rule checks. `Captcha` is checked after that point and raised on
/// its own.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("registration data is invalid")]
    Invalid(FieldErrors),

    #[error("{0}")]
    Captcha(String),

    #[error(transparent)]
    Internal(#[from] DomainError),
}

impl FieldErrors {
    /// Raise the accumulated errors, if any
    pub fn into_result(self) -> Result<(), RegistrationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RegistrationError::Invalid(self))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_pass() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_non_empty_errors_raise() {
        let mut errors = FieldErrors::new();
        errors.add("username", "This username is not allowed.");

        match errors.into_result() {
            Err(RegistrationError::Invalid(fields)) => {
                assert_eq!(fields.len(), 1);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
