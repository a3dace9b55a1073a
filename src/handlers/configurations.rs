use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::Operator;
use crate::commands::{ConfigAction, FormError, ACTIONS};
use crate::models::*;
use crate::ssh::{prompt::cli_errors, ConnectError, SshTarget};
use crate::utils::truncate_lines;
use crate::views::page_context;
use crate::AppState;

use super::{devices::require_api_operator, pages::require_login, redirect_with, render_page, ApiError};

/// Lines of transcript written to the debug log per run
const TRANSCRIPT_LOG_LINES: usize = 40;

/// Why a configuration run did not reach the device
enum ConfigureError {
    DeviceNotFound,
    MissingDeviceType,
    UnsupportedDeviceType(String),
    Form(FormError),
    Connect(ConnectError),
    Store(anyhow::Error),
}

impl std::fmt::Display for ConfigureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigureError::DeviceNotFound => write!(f, "Selected device not found!"),
            ConfigureError::MissingDeviceType => {
                write!(f, "Device type is missing in device information!")
            }
            ConfigureError::UnsupportedDeviceType(t) => {
                write!(f, "Unsupported device type \"{}\". Only {} is supported.", t, DEVICE_TYPE_CISCO_IOS)
            }
            ConfigureError::Form(e) => write!(f, "{}", e),
            ConfigureError::Connect(e) => write!(f, "An error occurred: {}", e),
            ConfigureError::Store(e) => write!(f, "An error occurred: {}", e),
        }
    }
}

impl From<ConfigureError> for ApiError {
    fn from(err: ConfigureError) -> Self {
        match err {
            ConfigureError::DeviceNotFound => ApiError::not_found("device"),
            ConfigureError::MissingDeviceType
            | ConfigureError::UnsupportedDeviceType(_)
            | ConfigureError::Form(_) => ApiError::bad_request(err.to_string()),
            ConfigureError::Connect(e) => ApiError::bad_gateway(e.to_string()),
            ConfigureError::Store(e) => e.into(),
        }
    }
}

/// Result of one configuration run
struct ConfigureOutcome {
    device: Device,
    action: &'static str,
    commands: Vec<String>,
    output: String,
    cli_errors: Vec<String>,
    /// Set when the run succeeded but recording the new management IP failed
    ip_update_error: Option<String>,
}

/// Look up the device, validate the form, push the commands over SSH and
/// record a changed management address
async fn run_action(state: &AppState, ip: &str, form: &ConfigForm) -> Result<ConfigureOutcome, ConfigureError> {
    let mut device = state
        .store
        .get_device(ip)
        .await
        .map_err(ConfigureError::Store)?
        .ok_or(ConfigureError::DeviceNotFound)?;

    match device.device_type.as_str() {
        "" => return Err(ConfigureError::MissingDeviceType),
        DEVICE_TYPE_CISCO_IOS => {}
        other => return Err(ConfigureError::UnsupportedDeviceType(other.to_string())),
    }

    let action = ConfigAction::from_form(form).map_err(ConfigureError::Form)?;
    let commands = action.commands(&device);

    tracing::info!(
        "Applying {} to {} ({} commands)",
        action.name(),
        device.ip,
        commands.len()
    );

    let target = SshTarget::for_device(&device, state.config.ssh_port);
    let output = state
        .connector
        .apply_config(&target, &commands)
        .await
        .map_err(|e| {
            tracing::error!("Configuration of {} failed: {}", device.ip, e);
            ConfigureError::Connect(e)
        })?;
    tracing::debug!("Transcript from {}:\n{}", device.ip, truncate_lines(&output, TRANSCRIPT_LOG_LINES));

    let errors = cli_errors(&output);
    if !errors.is_empty() {
        tracing::warn!("{} rejected {} line(s) of {}", device.ip, errors.len(), action.name());
    }

    let mut ip_update_error = None;
    if let Some(new_ip) = action.updates_management_ip() {
        match state.store.update_device_ip(&device.ip, new_ip).await {
            Ok(updated) => {
                tracing::info!("Management IP of {} is now {}", updated.hostname, updated.ip);
                device = updated;
            }
            Err(e) => {
                tracing::error!("Failed to record new IP for {}: {:#}", device.ip, e);
                ip_update_error = Some(format!("Failed to update device IP: {}", e));
            }
        }
    }

    Ok(ConfigureOutcome {
        device,
        action: action.name(),
        commands,
        output,
        cli_errors: errors,
        ip_update_error,
    })
}

async fn device_summaries(state: &AppState, flashes: &mut Vec<Flash>) -> Vec<DeviceSummary> {
    match state.store.list_devices().await {
        Ok(devices) => devices.iter().map(Device::summary).collect(),
        Err(e) => {
            tracing::error!("Failed to load devices: {:#}", e);
            flashes.push(Flash::error(format!("Failed to load devices: {}", e)));
            Vec::new()
        }
    }
}

/// GET /configurations
pub async fn config_page(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let jar = match require_login(&state, &operator, jar).await {
        Ok(jar) => jar,
        Err(redirect) => return redirect,
    };

    let (jar, mut flashes) = state.flashes.take(jar).await;
    let devices = device_summaries(&state, &mut flashes).await;

    let mut context = page_context(&flashes, operator.as_ref().map(Operator::username));
    context.insert("devices", &devices);
    context.insert("actions", ACTIONS);
    context.insert("selected_device", &None::<String>);
    context.insert("output", &None::<String>);
    context.insert("commands", &Vec::<String>::new());
    (jar, render_page(&state, "configurations.html", &context)).into_response()
}

/// POST /configurations
pub async fn config_submit(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ConfigForm>,
) -> Response {
    let jar = match require_login(&state, &operator, jar).await {
        Ok(jar) => jar,
        Err(redirect) => return redirect,
    };

    let ip = form.selected_device.as_deref().map(str::trim).unwrap_or_default();
    let outcome = match run_action(&state, ip, &form).await {
        Ok(outcome) => outcome,
        Err(e) => {
            return redirect_with(&state, jar, vec![Flash::error(e.to_string())], "/configurations").await;
        }
    };

    let (jar, mut flashes) = state.flashes.take(jar).await;
    flashes.push(Flash::success(format!(
        "{} applied to {} ({}).",
        outcome.action, outcome.device.hostname, outcome.device.ip
    )));
    flashes.extend(
        outcome
            .cli_errors
            .iter()
            .map(|line| Flash::warning(format!("Device reported: {}", line))),
    );
    if let Some(msg) = outcome.ip_update_error {
        flashes.push(Flash::error(msg));
    }
    let devices = device_summaries(&state, &mut flashes).await;

    let mut context = page_context(&flashes, operator.as_ref().map(Operator::username));
    context.insert("devices", &devices);
    context.insert("actions", ACTIONS);
    context.insert("selected_device", &Some(&outcome.device.ip));
    context.insert("output", &Some(&outcome.output));
    context.insert("commands", &outcome.commands);
    (jar, render_page(&state, "configurations.html", &context)).into_response()
}

/// GET /api/actions
pub async fn list_actions() -> Json<&'static [ActionInfo]> {
    Json(ACTIONS)
}

/// POST /api/devices/:ip/configure
pub async fn configure_device(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    Path(ip): Path<String>,
    Json(form): Json<ConfigForm>,
) -> Result<Json<ConfigureResponse>, ApiError> {
    require_api_operator(&state, &operator)?;

    let outcome = run_action(&state, &ip, &form).await?;
    if let Some(msg) = &outcome.ip_update_error {
        tracing::warn!("{}", msg);
    }

    Ok(Json(ConfigureResponse {
        device: outcome.device.summary(),
        action: outcome.action.to_string(),
        commands: outcome.commands,
        output: outcome.output,
        cli_errors: outcome.cli_errors,
    }))
}
