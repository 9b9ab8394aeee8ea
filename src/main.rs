use mcp_cache_server::config::ServerConfig;
use mcp_cache_server::error::StartupError;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "shutting down");
        eprintln!("mcp-cache-server: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = ServerConfig::from_env()?;
    let backend = mcp_cache_server::connect_backend(&config)?;
    let mut server = mcp_cache_server::build_server(&config, backend).await?;

    tracing::info!("mcp-cache-server running on stdio");
    server.run().await?;
    Ok(())
}
