//! Registration input and normalization

use crate::domain::user::slugify;

/// Raw registration fields as submitted by the client.
///
/// `password` is absent for social registration, where credentials are held
/// by the external identity provider. Not serializable: raw passwords stay
/// out of logs and responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
}

impl RegistrationInput {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password,
        }
    }

    /// Normalize fields before validation: username and e-mail are trimmed
    /// and the e-mail domain is lowercased. The password is never altered;
    /// leading and trailing whitespace in passwords is significant.
    pub fn normalize(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = normalize_email(self.email.trim());
        self
    }
}

/// Request-scoped context for checks that look beyond the submitted fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationContext {
    /// CAPTCHA solution submitted alongside the form
    pub captcha_solution: Option<String>,
    /// Client address, forwarded to CAPTCHA providers that score by origin
    pub client_ip: Option<String>,
}

/// Validated, normalized registration data ready for account creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub username: String,
    pub slug: String,
    pub email: String,
    pub password: Option<String>,
}

impl ValidatedRegistration {
    pub(crate) fn from_input(input: RegistrationInput) -> Self {
        let slug = slugify(&input.username);

        Self {
            username: input.username,
            slug,
            email: input.email,
            password: input.password,
        }
    }
}

/// Lowercase the domain part of an e-mail address. The local part is left
/// untouched; some providers treat it as case-sensitive.
fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
