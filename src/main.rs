//! `versecheck` - scripture verification and repair CLI.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use versecheck::cli::{self, Cli};
use versecheck::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    cli::run(cli.command, &config).await?;
    Ok(())
}
