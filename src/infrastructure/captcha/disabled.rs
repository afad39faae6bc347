//! No-op CAPTCHA provider

use async_trait::async_trait;

use crate::domain::captcha::{CaptchaError, CaptchaProvider};

/// Provider used when the deployment has CAPTCHA turned off.
/// Every attempt passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCaptcha;

impl DisabledCaptcha {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CaptchaProvider for DisabledCaptcha {
    async fn verify(
        &self,
        _solution: Option<&str>,
        _client_ip: Option<&str>,
    ) -> Result<(), CaptchaError> {
        Ok(())
    }
}
