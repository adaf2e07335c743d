use anyhow::Result;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tvrec::config::{Config, Transport};
use tvrec::tools::Toolbox;

/// Logs go to stderr: stdout carries protocol messages on the stdio transport.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},tower_http=info")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_result = dotenv();
    let config = Config::from_env()?;
    init_tracing(&config.log_level);
    match dotenv_result {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    info!(
        "Starting {} v{} ({} transport, language {})",
        tvrec::mcp::SERVER_NAME,
        env!("CARGO_PKG_VERSION"),
        match config.transport {
            Transport::Stdio => "stdio",
            Transport::Http => "http",
        },
        config.language
    );
    let toolbox = Toolbox::from_config(&config)?;
    tvrec::app::run(&config, toolbox).await
}
