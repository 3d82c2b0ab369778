pub mod db;
pub mod error;
pub mod interactions;
pub mod ledger;
pub mod server;
pub mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use db::Database;
use log::{error, info};
use settings::{Settings, SETTINGS_PATH_ENV};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub settings: Arc<Settings>,
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Crumbs starting up...");

    let settings_path = std::env::var(SETTINGS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("crumbs.json"));
    let settings = Settings::load(&settings_path)?;

    let database = Database::new(settings.database_path.clone())?;
    info!(
        "Using database {} (history edits {})",
        database.path().display(),
        if settings.allow_history_edits {
            "allowed"
        } else {
            "disabled"
        }
    );

    let bind_addr = settings.bind_addr.clone();
    let app = server::build_app(AppState {
        db: database,
        settings: Arc::new(settings),
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Listening on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
