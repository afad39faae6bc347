//! Password-strength policy
//!
//! A configurable chain of strength rules run against candidate passwords
//! during registration. Rules never short-circuit: every failing rule
//! contributes its own message so the user sees the full list at once.

const PASSWORD_MAX_LENGTH: usize = 255;

/// Passwords seen often enough in breach corpora that they are rejected
/// outright. Lowercased; candidates are lowercased before comparison.
const COMMON_PASSWORDS: &[&str] = &[
    "password", "password1", "password123", "passw0rd", "123456", "1234567", "12345678",
    "123456789", "1234567890", "qwerty", "qwerty123", "qwertyuiop", "abc123", "iloveyou",
    "admin", "welcome", "welcome1", "monkey", "dragon", "letmein", "letmein1", "sunshine",
    "princess", "football", "baseball", "superman", "batman", "trustno1", "shadow",
    "master", "michael", "jennifer", "jordan", "hunter", "harley", "ranger", "soccer",
    "hockey", "killer", "george", "charlie", "andrew", "thomas", "robert", "daniel",
    "starwars", "computer", "internet", "whatever", "freedom", "secret",
];

/// Configurable password-strength policy.
///
/// Mirrors the checks a forum deployment typically enables: a minimum length,
/// rejection of all-numeric and widely-used passwords, and rejection of
/// passwords that substantially overlap the user's own identifying data.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
    reject_all_numeric: bool,
    reject_common: bool,
    reject_similar_to_identity: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            reject_all_numeric: true,
            reject_common: true,
            reject_similar_to_identity: true,
        }
    }
}

impl PasswordPolicy {
    /// Create a policy with the given minimum length and all other rules on
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            ..Self::default()
        }
    }

    pub fn allow_all_numeric(mut self) -> Self {
        self.reject_all_numeric = false;
        self
    }

    pub fn allow_common(mut self) -> Self {
        self.reject_common = false;
        self
    }

    pub fn allow_similar_to_identity(mut self) -> Self {
        self.reject_similar_to_identity = false;
        self
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Run all rules against the candidate password.
    ///
    /// `identity` carries (label, value) pairs such as the username and
    /// e-mail address entered alongside the password; labels appear in the
    /// similarity messages. Returns one message per failing rule.
    pub fn validate(&self, password: &str, identity: &[(&str, &str)]) -> Vec<String> {
        let mut messages = Vec::new();
        let length = password.chars().count();

        if length < self.min_length {
            messages.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        if length > PASSWORD_MAX_LENGTH {
            messages.push(format!(
                "This password is too long. It cannot contain more than {} characters.",
                PASSWORD_MAX_LENGTH
            ));
        }

        if self.reject_all_numeric && !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            messages.push("This password is entirely numeric.".to_string());
        }

        if self.reject_common && COMMON_PASSWORDS.contains(&password.to_lowercase().as_str()) {
            messages.push("This password is too common.".to_string());
        }

        if self.reject_similar_to_identity {
            for (label, value) in identity {
                if is_too_similar(password, value) {
                    messages.push(format!("The password is too similar to the {}.", label));
                }
            }
        }

        messages
    }
}

/// A password overlaps an attribute when either contains the other,
/// case-insensitively. Attributes shorter than 3 characters are ignored to
/// avoid trivial matches.
fn is_too_similar(password: &str, attribute: &str) -> bool {
    let attribute = attribute.trim().to_lowercase();

    if attribute.chars().count() < 3 {
        return false;
    }

    let password = password.to_lowercase();
    password.contains(&attribute) || attribute.contains(&password)
}
