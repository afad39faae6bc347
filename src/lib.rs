//! Forum Registration API
//!
//! Validates and creates new forum accounts:
//! - Username and e-mail format, availability, and ban checks
//! - Password-strength rules
//! - Pluggable per-deployment registration rules
//! - CAPTCHA verification (disabled, reCAPTCHA, or question/answer)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::{
    AppState, CaptchaCriteria, PasswordCriteria, RegistrationCriteria, UsernameCriteria,
};
use config::{CaptchaKind, StorageBackend};
use domain::ban::BanRepository;
use domain::password::PasswordPolicy;
use domain::registration::{BlockedEmailDomains, RegistrationRuleSet, RegistrationValidator};
use domain::user::{UserRepository, UsernameLimits};
use infrastructure::ban::{CachedBanRepository, InMemoryBanRepository, PostgresBanRepository};
use infrastructure::captcha::create_captcha_provider;
use infrastructure::password::Argon2Hasher;
use infrastructure::registration::RegistrationService;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let (user_repository, ban_repository): (Arc<dyn UserRepository>, Arc<dyn BanRepository>) =
        match config.storage.backend {
            StorageBackend::Postgres => {
                let database_url = std::env::var("DATABASE_URL").map_err(|_| {
                    anyhow::anyhow!(
                        "DATABASE_URL environment variable is required for the postgres backend"
                    )
                })?;

                info!("Connecting to PostgreSQL...");
                let pool = sqlx::PgPool::connect(&database_url)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
                info!("PostgreSQL connection established");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

                (
                    Arc::new(PostgresUserRepository::new(pool.clone())),
                    Arc::new(PostgresBanRepository::new(pool)),
                )
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryBanRepository::new()),
                )
            }
        };

    let ban_repository: Arc<dyn BanRepository> = if config.bans.enabled {
        Arc::new(CachedBanRepository::new(
            ban_repository,
            Duration::from_secs(config.bans.ttl_seconds),
            config.bans.max_entries,
        ))
    } else {
        ban_repository
    };

    let captcha_provider = create_captcha_provider(&config.captcha)?;

    let username_limits = UsernameLimits {
        min_length: config.registration.username_min_length,
        max_length: config.registration.username_max_length,
    };
    let password_policy = PasswordPolicy::new(config.registration.password_min_length);

    let mut rules = RegistrationRuleSet::new();

    if !config.registration.blocked_email_domains.is_empty() {
        rules = rules.with_rule(Arc::new(BlockedEmailDomains::new(
            config.registration.blocked_email_domains.clone(),
        )));
    }

    let validator = RegistrationValidator::new(
        user_repository.clone(),
        ban_repository.clone(),
        captcha_provider,
    )
    .with_username_limits(username_limits)
    .with_password_policy(password_policy)
    .with_rules(rules);

    let registration_service = Arc::new(RegistrationService::new(
        validator,
        user_repository,
        Arc::new(Argon2Hasher::new()),
    ));

    Ok(AppState::new(
        registration_service,
        ban_repository,
        build_criteria(config),
    ))
}

/// Registration form requirements derived from configuration
fn build_criteria(config: &AppConfig) -> RegistrationCriteria {
    let captcha = match config.captcha.provider {
        CaptchaKind::Disabled => CaptchaCriteria {
            provider: config.captcha.provider.as_str().to_string(),
            site_key: None,
            question: None,
        },
        CaptchaKind::Recaptcha => CaptchaCriteria {
            provider: config.captcha.provider.as_str().to_string(),
            site_key: config.captcha.site_key.clone(),
            question: None,
        },
        CaptchaKind::Qa => CaptchaCriteria {
            provider: config.captcha.provider.as_str().to_string(),
            site_key: None,
            question: config.captcha.question.clone(),
        },
    };

    RegistrationCriteria {
        username: UsernameCriteria {
            min_length: config.registration.username_min_length,
            max_length: config.registration.username_max_length,
        },
        password: PasswordCriteria {
            min_length: config.registration.password_min_length,
        },
        captcha,
    }
}
