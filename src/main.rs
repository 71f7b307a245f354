use text_slot_server::config::ServerConfig;
use text_slot_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!("Starting with {:?}", config);

    let handle = server::start(config).await?;
    tracing::info!("Press Ctrl+C to shutdown");

    // In-flight connections are not drained; returning ends the process.
    tokio::select! {
        result = handle.wait() => result?,
        () = server::shutdown_signal() => tracing::info!("Shutting down server..."),
    }

    Ok(())
}
