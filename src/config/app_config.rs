use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub registration: RegistrationConfig,
    pub captcha: CaptchaConfig,
    pub bans: BanCacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection. The postgres backend reads the connection
/// string from the `DATABASE_URL` environment variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Registration policy knobs mirrored onto the sign-up form
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    pub username_min_length: usize,
    pub username_max_length: usize,
    pub password_min_length: usize,
    /// E-mail domains rejected at registration, e.g. disposable providers
    pub blocked_email_domains: Vec<String>,
}

/// CAPTCHA provider selection and its provider-specific settings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CaptchaConfig {
    pub provider: CaptchaKind,
    /// reCAPTCHA server-side secret
    pub secret_key: Option<String>,
    /// reCAPTCHA public key, exposed to clients through the criteria endpoint
    pub site_key: Option<String>,
    /// Override of the verification endpoint, for tests
    pub verify_url: Option<String>,
    /// Question shown by the qa provider
    pub question: Option<String>,
    /// Accepted answers for the qa provider
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaptchaKind {
    #[default]
    Disabled,
    Recaptcha,
    Qa,
}

impl CaptchaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Recaptcha => "recaptcha",
            Self::Qa => "qa",
        }
    }
}

/// TTL cache in front of ban lookups
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BanCacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
    pub max_entries: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            username_min_length: 3,
            username_max_length: 14,
            password_min_length: 8,
            blocked_email_domains: Vec::new(),
        }
    }
}

impl Default for BanCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 60,
            max_entries: 1024,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.registration.username_min_length, 3);
        assert_eq!(config.registration.username_max_length, 14);
        assert_eq!(config.registration.password_min_length, 8);
        assert_eq!(config.captcha.provider, CaptchaKind::Disabled);
        assert!(config.bans.enabled);
    }

    #[test]
    fn test_captcha_kind_deserializes_lowercase() {
        let kind: CaptchaKind = serde_json::from_str("\"recaptcha\"").unwrap();
        assert_eq!(kind, CaptchaKind::Recaptcha);

        let kind: CaptchaKind = serde_json::from_str("\"qa\"").unwrap();
        assert_eq!(kind, CaptchaKind::Qa);
    }

    #[test]
    fn test_storage_backend_deserializes_lowercase() {
        let backend: StorageBackend = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(backend, StorageBackend::Postgres);
    }
}
