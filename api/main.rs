use tokio::{net::TcpListener, signal};

use common::utils::{config::Config, error::Result};
use crafthub::{AppState, app};

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Failed to install crypto provider");

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    // Schema is managed by `crafthub-admin migrate`; the server never creates tables.
    let pool = common::database::connection::create_pool(&config).await?;

    let app = app(AppState { pool });

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("CraftHub API starting on {}", addr);
    tracing::info!(
        "API documentation available at http://localhost:{}/docs",
        config.api_port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
