use anyhow::Context;
use bionic_tldr::api::{AppState, create_router};
use bionic_tldr::core::config::AppConfig;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bionic_tldr::setup_logging();

    let config = AppConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr;
    info!(backend = ?config.backend, "Loading summarization model");

    let state = AppState::from_config(config).context("initialising summarization model")?;
    let router = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router).await?;
    Ok(())
}
