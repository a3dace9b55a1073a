use axum::{extract::State, Json};
use std::sync::Arc;

use crate::auth;
use crate::models::{LoginRequest, LoginResponse};
use crate::AppState;

use super::ApiError;

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("username and password are required"));
    }

    if let Err(reason) = auth::check_credentials(&state.config, username, &req.password) {
        tracing::warn!("Rejected API login for \"{}\": {}", username, reason);
        return Err(ApiError::unauthorized(reason));
    }

    let token = auth::issue_token(&state.config, username)
        .map_err(|e| ApiError::internal(format!("token generation error: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        username: username.to_string(),
    }))
}
