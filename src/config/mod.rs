//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, BanCacheConfig, CaptchaConfig, CaptchaKind, LogFormat, LoggingConfig,
    RegistrationConfig, ServerConfig, StorageBackend, StorageConfig,
};
