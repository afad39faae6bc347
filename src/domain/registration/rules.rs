//! Pluggable new-registration rules
//!
//! Deployments bolt extra business checks onto registration without touching
//! the core validator. Rules append to the shared error accumulator and never
//! short-circuit one another.

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use super::field_errors::FieldErrors;
use super::input::RegistrationInput;
use crate::domain::DomainError;

/// A business rule run against every new registration after the built-in
/// field checks. Implementations add user-facing messages to `errors`; an
/// `Err` return is reserved for infrastructure failures.
#[async_trait]
pub trait RegistrationRule: Send + Sync + Debug {
    async fn check(
        &self,
        input: &RegistrationInput,
        errors: &mut FieldErrors,
    ) -> Result<(), DomainError>;
}

/// Ordered set of registration rules, all of which run on every attempt
#[derive(Debug, Clone, Default)]
pub struct RegistrationRuleSet {
    rules: Vec<Arc<dyn RegistrationRule>>,
}

impl RegistrationRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: Arc<dyn RegistrationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule, accumulating their messages
    pub async fn check(
        &self,
        input: &RegistrationInput,
        errors: &mut FieldErrors,
    ) -> Result<(), DomainError> {
        for rule in &self.rules {
            rule.check(input, errors).await?;
        }

        Ok(())
    }
}

/// Rejects registrations from configured e-mail domains, typically
/// disposable-address providers.
#[derive(Debug)]
pub struct BlockedEmailDomains {
    domains: Vec<String>,
}

impl BlockedEmailDomains {
    pub fn new(domains: impl IntoIterator<Item = String>) -> Self {
        Self {
            domains: domains.into_iter().map(|d| d.to_lowercase()).collect(),
        }
    }
}

#[async_trait]
impl RegistrationRule for BlockedEmailDomains {
    async fn check(
        &self,
        input: &RegistrationInput,
        errors: &mut FieldErrors,
    ) -> Result<(), DomainError> {
        let Some((_, domain)) = input.email.rsplit_once('@') else {
            return Ok(());
        };

        let domain = domain.to_lowercase();

        if self.domains.iter().any(|blocked| *blocked == domain) {
            errors.add(
                "email",
                "E-mail addresses from this provider are not allowed.",
            );
        }

        Ok(())
    }
}
