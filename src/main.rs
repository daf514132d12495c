use pdf_docx_service::{
    config::Config, conversion::CommandConverter, routes::create_router, utils::init_logger,
    AppState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    let converter = CommandConverter::from_config(&config.converter);
    info!(
        program = %config.converter.program,
        args = ?config.converter.args,
        timeout = ?config.converter.timeout,
        "Using external converter"
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = AppState::new(config, Arc::new(converter));

    let app = create_router(state);

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
