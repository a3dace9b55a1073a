use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::Operator;
use crate::models::*;
use crate::ssh::{ConnectError, SshTarget};
use crate::utils::is_valid_hostname;
use crate::views::page_context;
use crate::AppState;

use super::{created, pages::require_login, render_page, ApiError};

/// Why a device could not be registered
enum RegisterError {
    MissingFields,
    InvalidAddress(String),
    Duplicate(String),
    Unreachable(String, ConnectError),
    Store(anyhow::Error),
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterError::MissingFields => write!(f, "All fields are required."),
            RegisterError::InvalidAddress(ip) => write!(f, "Invalid IP address \"{}\".", ip),
            RegisterError::Duplicate(ip) => write!(f, "Device with IP \"{}\" already exists!", ip),
            RegisterError::Unreachable(ip, e) => {
                write!(f, "Failed to connect to device with IP \"{}\": {}", ip, e)
            }
            RegisterError::Store(e) => write!(f, "Failed to save device: {}", e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::MissingFields | RegisterError::InvalidAddress(_) => {
                ApiError::bad_request(err.to_string())
            }
            RegisterError::Duplicate(_) => ApiError::conflict(err.to_string()),
            RegisterError::Unreachable(..) => ApiError::bad_gateway(err.to_string()),
            RegisterError::Store(e) => e.into(),
        }
    }
}

/// Validate, check the device answers over SSH, then save it as a cisco_ios device
async fn register_device(state: &AppState, req: CreateDeviceRequest) -> Result<Device, RegisterError> {
    let hostname = req.hostname.trim();
    let ip = req.ip.trim();

    if hostname.is_empty() || ip.is_empty() || req.username.is_empty() || req.password.is_empty() {
        return Err(RegisterError::MissingFields);
    }
    if !is_valid_hostname(ip) {
        return Err(RegisterError::InvalidAddress(ip.to_string()));
    }

    match state.store.get_device(ip).await {
        Ok(Some(_)) => return Err(RegisterError::Duplicate(ip.to_string())),
        Ok(None) => {}
        Err(e) => return Err(RegisterError::Store(e)),
    }

    let mut device = Device::cisco_ios(hostname, ip, &req.username, &req.password);
    device.secret = req.secret.filter(|s| !s.is_empty());

    let target = SshTarget::for_device(&device, state.config.ssh_port);
    if let Err(e) = state.connector.verify(&target).await {
        tracing::warn!("Connectivity check failed for {}: {}", ip, e);
        return Err(RegisterError::Unreachable(ip.to_string(), e));
    }

    match state.store.add_device(device).await {
        Ok(device) => {
            tracing::info!("Registered device {} ({})", device.hostname, device.ip);
            Ok(device)
        }
        Err(e) if e.downcast_ref::<crate::db::ConflictError>().is_some() => {
            Err(RegisterError::Duplicate(ip.to_string()))
        }
        Err(e) => Err(RegisterError::Store(e)),
    }
}

async fn remove_device(state: &AppState, ip: Option<&str>) -> Flash {
    let Some(ip) = ip.map(str::trim).filter(|ip| !ip.is_empty()) else {
        return Flash::error("IP address not provided for deletion.");
    };

    match state.store.delete_device(ip).await {
        Ok(true) => {
            tracing::info!("Deleted device {}", ip);
            Flash::success(format!("Device with IP \"{}\" deleted successfully!", ip))
        }
        Ok(false) => Flash::error(format!("Device with IP \"{}\" not found!", ip)),
        Err(e) => {
            tracing::error!("Failed to delete device {}: {:#}", ip, e);
            Flash::error(format!("Failed to delete device: {}", e))
        }
    }
}

async fn device_list_page(
    state: &AppState,
    jar: CookieJar,
    operator: &Option<Operator>,
    mut flashes: Vec<Flash>,
) -> Response {
    let (jar, mut pending) = state.flashes.take(jar).await;
    pending.append(&mut flashes);

    let devices: Vec<DeviceSummary> = match state.store.list_devices().await {
        Ok(devices) => devices.iter().map(Device::summary).collect(),
        Err(e) => {
            tracing::error!("Failed to load devices: {:#}", e);
            pending.push(Flash::error(format!("Failed to load devices: {}", e)));
            Vec::new()
        }
    };

    let mut context = page_context(&pending, operator.as_ref().map(Operator::username));
    context.insert("devices", &devices);
    (jar, render_page(state, "add_device.html", &context)).into_response()
}

/// GET /add_device
pub async fn device_page(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Response {
    let jar = match require_login(&state, &operator, jar).await {
        Ok(jar) => jar,
        Err(redirect) => return redirect,
    };
    device_list_page(&state, jar, &operator, Vec::new()).await
}

/// POST /add_device (the `add` and `delete` buttons share this form)
pub async fn device_form(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<DeviceForm>,
) -> Response {
    let jar = match require_login(&state, &operator, jar).await {
        Ok(jar) => jar,
        Err(redirect) => return redirect,
    };

    let flash = if form.add.is_some() {
        let req = CreateDeviceRequest {
            hostname: form.device_name.unwrap_or_default(),
            ip: form.ipaddress.unwrap_or_default(),
            username: form.username.unwrap_or_default(),
            password: form.password.unwrap_or_default(),
            secret: None,
        };
        match register_device(&state, req).await {
            Ok(device) => Flash::success(format!(
                "Device \"{}\" with IP \"{}\" added successfully!",
                device.hostname, device.ip
            )),
            Err(e) => Flash::error(e.to_string()),
        }
    } else if form.delete.is_some() {
        remove_device(&state, form.ipaddress.as_deref()).await
    } else {
        return device_list_page(&state, jar, &operator, Vec::new()).await;
    };

    device_list_page(&state, jar, &operator, vec![flash]).await
}

/// GET /api/devices
pub async fn list_devices(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DeviceSummary>>, ApiError> {
    require_api_operator(&state, &operator)?;
    let devices = state.store.list_devices().await?;
    Ok(Json(devices.iter().map(Device::summary).collect()))
}

/// POST /api/devices
pub async fn create_device(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<(StatusCode, Json<DeviceSummary>), ApiError> {
    require_api_operator(&state, &operator)?;
    let device = register_device(&state, req).await?;
    Ok(created(device.summary()))
}

/// DELETE /api/devices/:ip
pub async fn delete_device(
    operator: Option<Operator>,
    State(state): State<Arc<AppState>>,
    Path(ip): Path<String>,
) -> Result<StatusCode, ApiError> {
    require_api_operator(&state, &operator)?;
    if state.store.delete_device(&ip).await? {
        tracing::info!("Deleted device {}", ip);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("device"))
    }
}

/// 401 for the JSON API when the deployment requires a session
pub fn require_api_operator(state: &AppState, operator: &Option<Operator>) -> Result<(), ApiError> {
    if state.config.require_login && operator.is_none() {
        return Err(ApiError::unauthorized("Missing authentication token"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::handlers::test_support::*;
    use crate::models::Device;
    use crate::ssh::ConnectError;

    #[tokio::test]
    async fn test_add_device_verifies_then_saves() {
        let connector = Arc::new(FakeConnector::default());
        let state = test_state(connector.clone(), Config::default());
        let app = crate::router::build(state.clone());

        let response = app
            .oneshot(form_request(
                "/add_device",
                "add=1&device_name=SW1&ipaddress=10.0.0.2&username=admin&password=cisco",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("Device &quot;SW1&quot; with IP &quot;10.0.0.2&quot; added successfully!"));

        assert_eq!(*connector.verified.lock().unwrap(), vec!["10.0.0.2".to_string()]);
        let saved = state.store.get_device("10.0.0.2").await.unwrap().unwrap();
        assert_eq!(saved.device_type, "cisco_ios");
        assert_eq!(saved.password, "cisco");

        let _ = tokio::fs::remove_file(state.store.path()).await;
    }

    #[tokio::test]
    async fn test_add_device_requires_all_fields() {
        let connector = Arc::new(FakeConnector::default());
        let state = test_state(connector.clone(), Config::default());
        let app = crate::router::build(state.clone());

        let response = app
            .oneshot(form_request("/add_device", "add=1&device_name=SW1&ipaddress=10.0.0.2"))
            .await
            .unwrap();
        assert!(body_string(response).await.contains("All fields are required."));
        assert!(connector.verified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_device_unreachable_is_not_saved() {
        let connector = Arc::new(FakeConnector::failing(ConnectError::Authentication(
            "all methods exhausted".into(),
        )));
        let state = test_state(connector, Config::default());
        let app = crate::router::build(state.clone());

        let response = app
            .oneshot(form_request(
                "/add_device",
                "add=1&device_name=SW1&ipaddress=10.0.0.2&username=admin&password=bad",
            ))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Failed to connect to device with IP &quot;10.0.0.2&quot;"));
        assert!(state.store.list_devices().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_duplicate_device() {
        let connector = Arc::new(FakeConnector::default());
        let state = test_state(connector.clone(), Config::default());
        state
            .store
            .add_device(Device::cisco_ios("SW1", "10.0.0.2", "admin", "cisco"))
            .await
            .unwrap();
        let app = crate::router::build(state.clone());

        let response = app
            .oneshot(form_request(
                "/add_device",
                "add=1&device_name=SW9&ipaddress=10.0.0.2&username=admin&password=cisco",
            ))
            .await
            .unwrap();
        assert!(body_string(response)
            .await
            .contains("Device with IP &quot;10.0.0.2&quot; already exists!"));
        assert!(connector.verified.lock().unwrap().is_empty());

        let _ = tokio::fs::remove_file(state.store.path()).await;
    }

    #[tokio::test]
    async fn test_delete_device_form() {
        let state = test_state(Arc::new(FakeConnector::default()), Config::default());
        state
            .store
            .add_device(Device::cisco_ios("SW1", "10.0.0.2", "admin", "cisco"))
            .await
            .unwrap();
        let app = crate::router::build(state.clone());

        let response = app
            .clone()
            .oneshot(form_request("/add_device", "delete=1&ipaddress=10.0.0.2"))
            .await
            .unwrap();
        assert!(body_string(response)
            .await
            .contains("Device with IP &quot;10.0.0.2&quot; deleted successfully!"));

        let response = app
            .clone()
            .oneshot(form_request("/add_device", "delete=1&ipaddress=10.0.0.2"))
            .await
            .unwrap();
        assert!(body_string(response)
            .await
            .contains("Device with IP &quot;10.0.0.2&quot; not found!"));

        let response = app
            .oneshot(form_request("/add_device", "delete=1"))
            .await
            .unwrap();
        assert!(body_string(response)
            .await
            .contains("IP address not provided for deletion."));

        let _ = tokio::fs::remove_file(state.store.path()).await;
    }

    #[tokio::test]
    async fn test_api_devices_hide_credentials() {
        let state = test_state(Arc::new(FakeConnector::default()), Config::default());
        let app = crate::router::build(state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/devices",
                serde_json::json!({
                    "hostname": "R1",
                    "ip": "10.0.0.1",
                    "username": "admin",
                    "password": "topsecret",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(get_request("/api/devices", None))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("\"hostname\":\"R1\""));
        assert!(!body.contains("topsecret"));

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/devices",
                serde_json::json!({
                    "hostname": "R1",
                    "ip": "10.0.0.1",
                    "username": "admin",
                    "password": "topsecret",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(json_request("DELETE", "/api/devices/10.0.0.1", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(json_request("DELETE", "/api/devices/10.0.0.1", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let _ = tokio::fs::remove_file(state.store.path()).await;
    }

    #[tokio::test]
    async fn test_api_create_unreachable_is_bad_gateway() {
        let connector = Arc::new(FakeConnector::failing(ConnectError::Timeout("TCP".into())));
        let state = test_state(connector, Config::default());
        let app = crate::router::build(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/devices",
                serde_json::json!({
                    "hostname": "R1",
                    "ip": "10.0.0.1",
                    "username": "admin",
                    "password": "pw",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_api_requires_token_when_login_required() {
        let config = Config {
            require_login: true,
            ..Config::default()
        };
        let app = crate::router::build(test_state(Arc::new(FakeConnector::default()), config));

        let response = app
            .oneshot(get_request("/api/devices", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
