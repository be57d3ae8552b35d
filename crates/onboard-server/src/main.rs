mod app;
mod config;
mod theme;
mod view;

use anyhow::Context;
use onboard::HttpSubmitter;
use tracing::{info, warn};

use crate::app::{router, AppState};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // .env is optional
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Failed to read .env: {}", e);
        }
    }

    let config = Config::load_default()
        .unwrap_or_else(|e| {
            warn!("Failed to load config: {:#}, using defaults", e);
            Config::default()
        })
        .with_env_overrides();

    info!(
        endpoint = %config.submit.endpoint,
        theme = %config.form.theme,
        "onboard starting"
    );

    let state = AppState::new(HttpSubmitter::new(config.submit.endpoint.clone()), config.form.theme)
        .with_idle_timeout(config.session_idle_timeout());
    let app = router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
