//! CAPTCHA verification seam
//!
//! Registration runs a human-verification check after all field validation
//! has passed. Providers live in the infrastructure layer; the domain only
//! defines the trait and the error surfaced to users.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

/// Errors from a CAPTCHA check. Both variants fail the registration attempt;
/// the message is shown to the user.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CaptchaError {
    #[error("{0}")]
    Rejected(String),

    #[error("Captcha service is unavailable. Please try again later.")]
    Unavailable,
}

/// Trait for CAPTCHA verification services
#[async_trait]
pub trait CaptchaProvider: Send + Sync + Debug {
    /// Verify the user's solution. `client_ip` is forwarded to providers that
    /// use it for scoring.
    async fn verify(
        &self,
        solution: Option<&str>,
        client_ip: Option<&str>,
    ) -> Result<(), CaptchaError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Mock CAPTCHA provider with a fixed verdict
    #[derive(Debug)]
    pub struct MockCaptchaProvider {
        verdict: Result<(), CaptchaError>,
    }

    impl MockCaptchaProvider {
        /// Provider that accepts every solution
        pub fn passing() -> Self {
            Self { verdict: Ok(()) }
        }

        /// Provider that rejects every solution with the given message
        pub fn rejecting(message: impl Into<String>) -> Self {
            Self {
                verdict: Err(CaptchaError::Rejected(message.into())),
            }
        }
    }

    #[async_trait]
    impl CaptchaProvider for MockCaptchaProvider {
        async fn verify(
            &self,
            _solution: Option<&str>,
            _client_ip: Option<&str>,
        ) -> Result<(), CaptchaError> {
            self.verdict.clone()
        }
    }
}
