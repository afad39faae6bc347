//! reCAPTCHA provider
//!
//! Verifies solutions against the reCAPTCHA `siteverify` endpoint. The
//! endpoint URL is overridable for tests.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::domain::captcha::{CaptchaError, CaptchaProvider};

const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// reCAPTCHA verification client
#[derive(Debug)]
pub struct ReCaptcha {
    client: reqwest::Client,
    secret_key: String,
    verify_url: String,
}

/// Response body from the siteverify endpoint
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

impl ReCaptcha {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_verify_url(secret_key, DEFAULT_VERIFY_URL)
    }

    pub fn with_verify_url(secret_key: impl Into<String>, verify_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
            verify_url: verify_url.into(),
        }
    }

    fn rejection_message(error_codes: &[String]) -> String {
        if error_codes.iter().any(|c| c == "timeout-or-duplicate") {
            "Captcha is no longer valid. Please try again.".to_string()
        } else {
            "Please try again.".to_string()
        }
    }
}

#[async_trait]
impl CaptchaProvider for ReCaptcha {
    async fn verify(
        &self,
        solution: Option<&str>,
        client_ip: Option<&str>,
    ) -> Result<(), CaptchaError> {
        let solution = match solution {
            Some(s) if !s.is_empty() => s,
            _ => {
                return Err(CaptchaError::Rejected(
                    "Please solve the quick test.".to_string(),
                ))
            }
        };

        let mut form = vec![
            ("secret", self.secret_key.as_str()),
            ("response", solution),
        ];

        if let Some(ip) = client_ip {
            form.push(("remoteip", ip));
        }

        let response = self
            .client
            .post(&self.verify_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                warn!("reCAPTCHA request failed: {}", e);
                CaptchaError::Unavailable
            })?;

        let verdict: VerifyResponse = response.json().await.map_err(|e| {
            warn!("reCAPTCHA returned an unreadable response: {}", e);
            CaptchaError::Unavailable
        })?;

        if verdict.success {
            Ok(())
        } else {
            Err(CaptchaError::Rejected(Self::rejection_message(
                &verdict.error_codes,
            )))
        }
    }
}
