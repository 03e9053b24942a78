use medbot_bot::config::BotConfig;
use medbot_bot::state::AppState;
use medbot_instruments::Catalog;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = BotConfig::from_env()?;

    // A catalog that fails to load is fatal: no traffic without tests.
    let catalog = Catalog::load(&config.tests_path).map_err(|e| {
        tracing::error!(path = %config.tests_path.display(), error = %e, "failed to load tests");
        e
    })?;
    let state = AppState::new(&config, catalog)?;

    let app = medbot_bot::router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        shortcut = %config.default_command,
        "medbot listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
