mod api_client;
mod cache;
mod card;
mod client;
mod cmd;
mod config;
mod error;
mod filter;
mod render;
mod session;
mod types;
mod view;

use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use crate::cmd::Cmd;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // stdout belongs to the rendered view
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    Cmd::parse().run(config).await
}
