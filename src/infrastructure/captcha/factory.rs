//! CAPTCHA provider selection from configuration

use std::sync::Arc;

use crate::config::{CaptchaConfig, CaptchaKind};
use crate::domain::captcha::CaptchaProvider;
use crate::domain::DomainError;

use super::disabled::DisabledCaptcha;
use super::qa::QaCaptcha;
use super::recaptcha::ReCaptcha;

/// Build the CAPTCHA provider named by the deployment configuration
pub fn create_captcha_provider(
    config: &CaptchaConfig,
) -> Result<Arc<dyn CaptchaProvider>, DomainError> {
    match config.provider {
        CaptchaKind::Disabled => Ok(Arc::new(DisabledCaptcha::new())),
        CaptchaKind::Recaptcha => {
            let secret_key = config
                .secret_key
                .as_deref()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    DomainError::configuration(
                        "captcha.secret_key is required when the recaptcha provider is enabled",
                    )
                })?;

            let provider = match config.verify_url.as_deref() {
                Some(url) => ReCaptcha::with_verify_url(secret_key, url),
                None => ReCaptcha::new(secret_key),
            };

            Ok(Arc::new(provider))
        }
        CaptchaKind::Qa => {
            let question = config
                .question
                .as_deref()
                .filter(|q| !q.is_empty())
                .ok_or_else(|| {
                    DomainError::configuration(
                        "captcha.question is required when the qa provider is enabled",
                    )
                })?;

            if config.answers.iter().all(|a| a.trim().is_empty()) {
                return Err(DomainError::configuration(
                    "captcha.answers must list at least one accepted answer",
                ));
            }

            Ok(Arc::new(QaCaptcha::new(question, config.answers.clone())))
        }
    }
}
