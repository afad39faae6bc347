//! Ban entity and pattern matching

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Which registration field a ban applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BanScope {
    Username,
    Email,
}

impl BanScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
        }
    }
}

/// A stored rule blocking a username or email from registering.
///
/// Patterns are matched case-insensitively against the whole value, with `*`
/// acting as a wildcard for any run of characters. Bans flagged
/// `registration_only` apply only when a new account is being created; general
/// bans apply there too, so registration-scope lookups consider both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ban {
    scope: BanScope,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_message: Option<String>,
    registration_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
}

impl Ban {
    /// Create a ban for the given scope and pattern
    pub fn new(scope: BanScope, pattern: impl Into<String>) -> Self {
        Self {
            scope,
            pattern: pattern.into(),
            user_message: None,
            registration_only: false,
            expires_at: None,
        }
    }

    /// Attach a human-readable message shown to the rejected user
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    /// Restrict the ban to registration attempts only
    pub fn registration_only(mut self) -> Self {
        self.registration_only = true;
        self
    }

    /// Set an expiry time after which the ban no longer matches
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn scope(&self) -> BanScope {
        self.scope
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    pub fn is_registration_only(&self) -> bool {
        self.registration_only
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Check whether the ban has expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at <= Utc::now(),
            None => false,
        }
    }

    /// Check whether the value falls under this ban.
    ///
    /// Expired bans never match.
    pub fn matches(&self, value: &str) -> bool {
        if self.is_expired() {
            return false;
        }

        let anchored = format!(
            "^{}$",
            self.pattern
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*")
        );

        RegexBuilder::new(&anchored)
            .case_insensitive(true)
            .build()
            .map(|re| re.is_match(value))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_exact_pattern_match() {
        let ban = Ban::new(BanScope::Username, "spammer");

        assert!(ban.matches("spammer"));
        assert!(ban.matches("SPAMMER"));
        assert!(!ban.matches("spammer2"));
        assert!(!ban.matches("notspammer"));
    }

    #[test]
    fn test_wildcard_pattern_match() {
        let ban = Ban::new(BanScope::Email, "*@mailinator.com");

        assert!(ban.matches("bob@mailinator.com"));
        assert!(ban.matches("Bob.Smith@Mailinator.Com"));
        assert!(!ban.matches("bob@example.com"));
    }

    #[test]
    fn test_inner_wildcard() {
        let ban = Ban::new(BanScope::Username, "admin*bot");

        assert!(ban.matches("adminbot"));
        assert!(ban.matches("admin-super-bot"));
        assert!(!ban.matches("adminbots"));
    }

    #[test]
    fn test_pattern_is_escaped() {
        // dots in e-mail patterns are literal, not regex wildcards
        let ban = Ban::new(BanScope::Email, "*@mail.com");

        assert!(ban.matches("user@mail.com"));
        assert!(!ban.matches("user@mailxcom"));
    }

    #[test]
    fn test_expired_ban_never_matches() {
        let ban = Ban::new(BanScope::Username, "spammer")
            .with_expiry(Utc::now() - Duration::hours(1));

        assert!(ban.is_expired());
        assert!(!ban.matches("spammer"));
    }

    #[test]
    fn test_future_expiry_still_matches() {
        let ban = Ban::new(BanScope::Username, "spammer")
            .with_expiry(Utc::now() + Duration::hours(1));

        assert!(!ban.is_expired());
        assert!(ban.matches("spammer"));
    }

    #[test]
    fn test_builder_flags() {
        let ban = Ban::new(BanScope::Username, "troll*")
            .with_user_message("You can't register with that name.")
            .registration_only();

        assert!(ban.is_registration_only());
        assert_eq!(
            ban.user_message(),
            Some("You can't register with that name.")
        );
    }
}
