//! depotkey CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use depotkey_cli::cmd;
use depotkey_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let catalog = cli.catalog.as_deref();

    match cli.command {
        Commands::Fetch { appid, output_dir } => {
            cmd::fetch::fetch(&appid, &output_dir, catalog).await
        }
        Commands::Sources => cmd::sources::sources(catalog),
    }
}
