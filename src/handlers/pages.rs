use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{self, Operator};
use crate::models::{Flash, LoginRequest};
use crate::views::page_context;
use crate::AppState;

use super::{redirect_with, render_page};

/// GET /
pub async fn index(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let (jar, flashes) = state.flashes.take(jar).await;
    let context = page_context(&flashes, operator.as_ref().map(Operator::username));
    (jar, render_page(&state, "index.html", &context)).into_response()
}

/// GET /login
pub async fn login_page(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let (jar, flashes) = state.flashes.take(jar).await;
    let context = page_context(&flashes, operator.as_ref().map(Operator::username));
    (jar, render_page(&state, "login.html", &context)).into_response()
}

/// POST /login
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(req): Form<LoginRequest>,
) -> Response {
    if let Err(reason) = auth::check_credentials(&state.config, &req.username, &req.password) {
        tracing::warn!("Rejected login for \"{}\": {}", req.username, reason);
        return redirect_with(&state, jar, vec![Flash::error(format!("Login failed: {}", reason))], "/login").await;
    }

    let token = match auth::issue_token(&state.config, req.username.trim()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Token generation failed: {}", e);
            return redirect_with(&state, jar, vec![Flash::error("Login failed: token generation error")], "/login").await;
        }
    };

    tracing::info!("Operator \"{}\" logged in", req.username.trim());
    let jar = jar.add(auth::session_cookie(token));
    redirect_with(&state, jar, vec![Flash::success("Login successful!")], "/add_device").await
}

/// GET /logout
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let jar = auth::clear_session(jar);
    redirect_with(&state, jar, vec![Flash::success("You have been logged out")], "/login").await
}

/// Redirect to the login page when the deployment requires a session
pub async fn require_login(
    state: &Arc<AppState>,
    operator: &Option<Operator>,
    jar: CookieJar,
) -> Result<CookieJar, Response> {
    if state.config.require_login && operator.is_none() {
        return Err(redirect_with(state, jar, vec![Flash::error("Please log in first.")], "/login").await);
    }
    Ok(jar)
}
