use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::config::Config;
use crate::handlers::ErrorResponse;
use crate::models::Claims;
use crate::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Extractor that validates the session token and provides the operator's claims.
///
/// Add `operator: Option<Operator>` to a handler to know who is logged in, or
/// `_auth: Operator` to require a session outright.
pub struct Operator {
    pub claims: Claims,
}

impl Operator {
    pub fn username(&self) -> &str {
        &self.claims.username
    }
}

#[async_trait::async_trait]
impl FromRequestParts<Arc<AppState>> for Operator {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Authorization header for API clients, session cookie for browsers
        let token = if let Some(auth_header) = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        {
            auth_header
                .strip_prefix("Bearer ")
                .ok_or(AuthError::InvalidToken)?
                .to_string()
        } else {
            CookieJar::from_headers(&parts.headers)
                .get(SESSION_COOKIE)
                .map(|c| c.value().to_string())
                .ok_or(AuthError::MissingToken)?
        };

        let claims = decode_token(&token, &state.config.session_secret)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(Operator { claims })
    }
}

pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Check operator credentials against the configured UI password, if any
pub fn check_credentials(config: &Config, username: &str, password: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() || password.is_empty() {
        return Err("username and password are required");
    }
    match &config.ui_password {
        Some(expected) if expected != password => Err("invalid credentials"),
        _ => Ok(()),
    }
}

/// Issue a signed session token for an operator
pub fn issue_token(config: &Config, username: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let exp = now + config.session_ttl();

    let claims = Claims {
        sub: uuid::Uuid::new_v4().to_string(),
        username: username.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(config.session_secret.as_bytes()),
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    jsonwebtoken::decode::<Claims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(secret.as_bytes()),
        &jsonwebtoken::Validation::default(),
    )
    .map(|data| data.claims)
}

/// Session cookie carrying the token
pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
