pub mod auth;
pub mod configurations;
pub mod devices;
pub mod pages;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::Flash;
use crate::AppState;

/// Error response - `{"error": "message"}`
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API error type
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn not_found(resource: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{} not found", resource),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.into(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.into(),
        }
    }

    /// The device could not be reached or rejected the session
    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(nf) = err.downcast_ref::<crate::db::NotFoundError>() {
            return Self::not_found(&nf.resource);
        }
        if let Some(conflict) = err.downcast_ref::<crate::db::ConflictError>() {
            return Self::conflict(conflict.to_string());
        }
        tracing::error!("Internal error: {:#}", err);
        Self::internal(err.to_string())
    }
}

/// Response helper: return 201 Created with JSON body
pub fn created<T: Serialize>(item: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(item))
}

/// Healthcheck endpoint: 200 OK with status
pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "ios-configurator",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Render a page, turning template failures into a plain 500
pub fn render_page(state: &AppState, name: &str, context: &tera::Context) -> Response {
    match state.views.render(name, context) {
        Ok(html) => html.into_response(),
        Err(e) => {
            tracing::error!("Failed to render {}: {:?}", name, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template rendering failed").into_response()
        }
    }
}

/// Queue flashes for the next page and redirect there
pub async fn redirect_with(
    state: &Arc<AppState>,
    jar: CookieJar,
    flashes: Vec<Flash>,
    to: &str,
) -> Response {
    let jar = state.flashes.push(jar, flashes).await;
    (jar, Redirect::to(to)).into_response()
}
