mod auth;
mod commands;
mod config;
mod db;
mod flash;
mod handlers;
mod models;
mod router;
mod ssh;
mod utils;
mod views;

use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use db::Store;
use flash::FlashStore;
use ssh::{DeviceConnector, SshConnector, SshOptions};
use views::Views;

/// Application state shared across handlers
pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub views: Views,
    pub flashes: FlashStore,
    pub connector: Arc<dyn DeviceConnector>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ios_configurator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut cfg = Config::load();
    if cfg.session_secret.is_empty() {
        tracing::warn!("SESSION_SECRET not set - generating random secret (sessions will be invalidated on restart)");
        cfg.session_secret = uuid::Uuid::new_v4().to_string();
    }
    tracing::info!("Starting IOS Configurator");
    tracing::info!("Device file: {}", cfg.device_file);
    tracing::info!("Static dir: {}", cfg.static_dir);
    tracing::info!("Login required: {}", cfg.require_login);

    let store = Store::new(&cfg.device_file);
    match store.list_devices().await {
        Ok(devices) => tracing::info!("Loaded {} device(s) from {}", devices.len(), store.path().display()),
        Err(e) => tracing::warn!("Device file unreadable, requests will fail until fixed: {:#}", e),
    }

    let views = Views::new()?;
    let connector: Arc<dyn DeviceConnector> = Arc::new(SshConnector::new(SshOptions::from_config(&cfg)));

    let state = Arc::new(AppState {
        store,
        config: cfg.clone(),
        views,
        flashes: FlashStore::new(),
        connector,
    });

    // Build router
    let app = router::build(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("IOS Configurator listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("IOS Configurator shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
