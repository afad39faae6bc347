//! PostgreSQL ban repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::ban::{Ban, BanRepository, BanScope};
use crate::domain::DomainError;

/// PostgreSQL implementation of BanRepository.
///
/// Candidate rows are narrowed by scope and expiry in SQL; wildcard pattern
/// matching happens here, since the `*` syntax is owned by the domain. Ban
/// tables are small moderation data, so fetching all live candidates per
/// lookup is fine.
#[derive(Debug, Clone)]
pub struct PostgresBanRepository {
    pool: PgPool,
}

impl PostgresBanRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, scope: BanScope, value: &str) -> Result<Option<Ban>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT scope, pattern, user_message, registration_only, expires_at
            FROM bans
            WHERE scope = $1 AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY created_at
            "#,
        )
        .bind(scope.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to query bans: {}", e)))?;

        for row in rows {
            let ban = row_to_ban(&row)?;

            if ban.matches(value) {
                return Ok(Some(ban));
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl BanRepository for PostgresBanRepository {
    async fn find_username_ban(&self, username: &str) -> Result<Option<Ban>, DomainError> {
        self.find(BanScope::Username, username).await
    }

    async fn find_email_ban(&self, email: &str) -> Result<Option<Ban>, DomainError> {
        self.find(BanScope::Email, email).await
    }
}

fn row_to_ban(row: &sqlx::postgres::PgRow) -> Result<Ban, DomainError> {
    let scope: String = row.get("scope");
    let pattern: String = row.get("pattern");
    let user_message: Option<String> = row.get("user_message");
    let registration_only: bool = row.get("registration_only");
    let expires_at: Option<chrono::DateTime<chrono::Utc>> = row.get("expires_at");

    let scope = match scope.as_str() {
        "username" => BanScope::Username,
        "email" => BanScope::Email,
        other => {
            return Err(DomainError::storage(format!(
                "Invalid ban scope in database: {}",
                other
            )))
        }
    };

    let mut ban = Ban::new(scope, pattern);

    if let Some(message) = user_message {
        ban = ban.with_user_message(message);
    }

    if registration_only {
        ban = ban.registration_only();
    }

    if let Some(expires_at) = expires_at {
        ban = ban.with_expiry(expires_at);
    }

    Ok(ban)
}
