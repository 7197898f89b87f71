//! Glycora Web Server
//!
//! Run with: cargo run -p glycora-web

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use glycora_web::config::Config;
use glycora_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("glycora=debug,info")),
        )
        .init();

    info!("Starting Glycora Web Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    info!("Model: {}", config.model.path.display());

    // Classifier and cutoffs are loaded once and shared read-only.
    let state = AppState::init(&config).context("failed to initialise application state")?;
    info!(
        "Classifier `{}` ready, {} clinical cutoffs, charts {}",
        state.classifier.name(),
        state.cutoffs.len(),
        if state.chart.enabled { "enabled" } else { "disabled" }
    );

    let app = glycora_web::router::build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
