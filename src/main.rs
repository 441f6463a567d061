mod auth;
mod cli;
mod config;
mod error;
mod models;
mod providers;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting cibar - GitLab CI status summarizer");
    cli.execute().await?;

    Ok(())
}
