use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use courtside::cli::Cli;
use courtside::commands;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    if let Err(err) = commands::dispatch(cli.command).await {
        error!(%err, "command failed");
        std::process::exit(1);
    }
}
