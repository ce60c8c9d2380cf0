//! CLI tool to send one prompt to a running relay
//!
//! Usage:
//!   cargo run --bin glauc-ask -- "Explain what intraocular pressure measures"

use anyhow::Result;
use clap::Parser;
use glauc_relay::{RelayClient, RelayClientConfig};
use std::time::Duration;

/// Send a prompt to the Glauc relay and print the analysis
#[derive(Parser, Debug)]
#[command(name = "glauc-ask")]
#[command(about = "Send a prompt to the Glauc relay and print the analysis")]
struct Args {
    /// Relay base URL (overrides GLAUC_SERVER_URL env var)
    #[arg(long)]
    server_url: Option<String>,

    /// Request deadline in seconds (overrides GLAUC_CLIENT_TIMEOUT_SECS env var)
    #[arg(long)]
    timeout: Option<u64>,

    /// Prompt text; multiple words are joined with spaces
    #[arg(required = true)]
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = RelayClientConfig::from_env();
    if let Some(url) = args.server_url {
        config.base_url = url;
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    let client = RelayClient::new(config)?;
    let text = client.analyze(&args.prompt.join(" ")).await;

    println!("{}", text);

    Ok(())
}
