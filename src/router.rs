use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Pages
        .route("/", get(handlers::pages::index))
        .route("/login", get(handlers::pages::login_page))
        .route("/login", post(handlers::pages::login_submit))
        .route("/logout", get(handlers::pages::logout))
        .route("/add_device", get(handlers::devices::device_page))
        .route("/add_device", post(handlers::devices::device_form))
        .route("/configurations", get(handlers::configurations::config_page))
        .route("/configurations", post(handlers::configurations::config_submit))
        // JSON API
        .route("/api/health", get(handlers::healthcheck))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/actions", get(handlers::configurations::list_actions))
        .route("/api/devices", get(handlers::devices::list_devices))
        .route("/api/devices", post(handlers::devices::create_device))
        .route("/api/devices/:ip", delete(handlers::devices::delete_device))
        .route("/api/devices/:ip/configure", post(handlers::configurations::configure_device))
        // Stylesheets and other assets
        .nest_service("/static", ServeDir::new(static_dir))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
