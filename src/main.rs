use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use platepick::api;

#[derive(Parser)]
#[clap(version = "0.1.0", author = "Platepick Contributors")]
enum Cli {
    /// Start the recommendation service
    Serve {
        #[clap(short, long, default_value = "config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse() {
        Cli::Serve { config } => api::start_service(&config).await,
    }
}
