//! Registration API endpoints
//!
//! Exposes the registration form requirements and the sign-up call itself.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::state::{AppState, RegistrationCriteria, RegistrationServiceTrait};
use crate::api::types::{ApiError, Json};
use crate::domain::registration::{RegistrationContext, RegistrationInput};
use crate::domain::user::User;

/// Create the registration router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/register/criteria", get(criteria))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub captcha: Option<String>,
}

/// Newly created account (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub slug: String,
    pub email: String,
    pub status: String,
    pub joined_at: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            slug: user.slug().to_string(),
            email: user.email().to_string(),
            status: format!("{:?}", user.status()).to_lowercase(),
            joined_at: user.joined_at().to_rfc3339(),
        }
    }
}

/// Register a new account
///
/// POST /auth/register
///
/// Validates the submitted fields and creates the account. Validation
/// failures return 400 with per-field messages; a CAPTCHA rejection returns
/// 400 with a `captcha` field of its own.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let input = RegistrationInput::new(request.username, request.email, request.password);
    let context = RegistrationContext {
        captcha_solution: request.captcha,
        client_ip: client_ip(&headers),
    };

    let user = state.registration_service.register(input, context).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))))
}

/// Describe the registration form requirements
///
/// GET /auth/register/criteria
///
/// Lets the client mirror server-side rules: username length bounds,
/// password minimum length, and which CAPTCHA to render.
pub async fn criteria(State(state): State<AppState>) -> Json<RegistrationCriteria> {
    Json(state.criteria.as_ref().clone())
}

/// Client address as reported by the reverse proxy. Used only as a hint for
/// CAPTCHA scoring, so absence is fine.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    forwarded.or_else(|| {
        headers
            .get("x-real-ip")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_from_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(client_ip(&headers), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn test_client_ip_from_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_ip(&headers), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn test_client_ip_absent() {
        assert_eq!(client_ip(&HeaderMap::new()), None);
    }

    #[test]
    fn test_user_response_shape() {
        let user = User::new("BobAllen", "bob@example.com", Some("hash".to_string()));
        let response = UserResponse::from_user(&user);

        assert_eq!(response.username, "BobAllen");
        assert_eq!(response.slug, "boballen");
        assert_eq!(response.status, "active");

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("hash"));
    }
}
