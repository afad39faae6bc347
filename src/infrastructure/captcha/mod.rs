//! CAPTCHA provider implementations
//!
//! Three providers cover the deployment options: disabled (every attempt
//! passes), reCAPTCHA (external verification service), and a forum-configured
//! question/answer test.

mod disabled;
mod factory;
mod qa;
mod recaptcha;

pub use disabled::DisabledCaptcha;
pub use factory::create_captcha_provider;
pub use qa::QaCaptcha;
pub use recaptcha::ReCaptcha;
