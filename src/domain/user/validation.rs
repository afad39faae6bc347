//! Account field validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Errors that can occur during account field validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("This field is required.")]
    EmptyUsername,

    #[error("Username cannot be shorter than {0} characters.")]
    UsernameTooShort(usize),

    #[error("Username cannot be longer than {0} characters.")]
    UsernameTooLong(usize),

    #[error("Username can only contain latin alphabet letters and digits.")]
    InvalidUsernameCharacters,

    #[error("This field is required.")]
    EmptyEmail,

    #[error("E-mail address cannot be longer than {0} characters.")]
    EmailTooLong(usize),

    #[error("Enter a valid e-mail address.")]
    InvalidEmail,
}

const MAX_EMAIL_LENGTH: usize = 255;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("username regex is valid"));

// Structural check only: one @, non-empty local part, dotted domain.
// Deliverability is the mail system's problem.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Length bounds for usernames, set by deployment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsernameLimits {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for UsernameLimits {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 14,
        }
    }
}

/// Validate a username's content and length.
///
/// Usernames are latin letters and digits only; bounds come from
/// deployment configuration.
pub fn validate_username(
    username: &str,
    limits: &UsernameLimits,
) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if !USERNAME_RE.is_match(username) {
        return Err(UserValidationError::InvalidUsernameCharacters);
    }

    let length = username.chars().count();

    if length < limits.min_length {
        return Err(UserValidationError::UsernameTooShort(limits.min_length));
    }

    if length > limits.max_length {
        return Err(UserValidationError::UsernameTooLong(limits.max_length));
    }

    Ok(())
}

/// Validate an e-mail address's shape and length
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    if !EMAIL_RE.is_match(email) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Normalized, lowercased form of a username used for uniqueness checks
pub fn slugify(username: &str) -> String {
    username.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> UsernameLimits {
        UsernameLimits::default()
    }

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("Bob", &limits()).is_ok());
        assert!(validate_username("bob123", &limits()).is_ok());
        assert!(validate_username("B0bAllen", &limits()).is_ok());
    }

    #[test]
    fn test_empty_username() {
        assert_eq!(
            validate_username("", &limits()),
            Err(UserValidationError::EmptyUsername)
        );
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab", &limits()),
            Err(UserValidationError::UsernameTooShort(3))
        );
    }

    #[test]
    fn test_username_too_long() {
        assert_eq!(
            validate_username("abcdefghijklmno", &limits()),
            Err(UserValidationError::UsernameTooLong(14))
        );
    }

    #[test]
    fn test_username_invalid_characters() {
        for username in ["bob_allen", "bob-allen", "bob allen", "böb", "bob!"] {
            assert_eq!(
                validate_username(username, &limits()),
                Err(UserValidationError::InvalidUsernameCharacters),
                "expected rejection for {:?}",
                username
            );
        }
    }

    #[test]
    fn test_custom_limits() {
        let limits = UsernameLimits {
            min_length: 1,
            max_length: 30,
        };

        assert!(validate_username("a", &limits).is_ok());
        assert!(validate_username("abcdefghijklmnopqrst", &limits).is_ok());
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("bob@example.com").is_ok());
        assert!(validate_email("bob.allen+forum@mail.example.co.uk").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["bob", "bob@", "@example.com", "bob@example", "bob @example.com"] {
            assert_eq!(
                validate_email(email),
                Err(UserValidationError::InvalidEmail),
                "expected rejection for {:?}",
                email
            );
        }
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert_eq!(
            validate_email(&email),
            Err(UserValidationError::EmailTooLong(255))
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("BobAllen"), "boballen");
        assert_eq!(slugify("bob123"), "bob123");
    }
}
