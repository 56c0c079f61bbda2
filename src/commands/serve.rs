//! `serve` command: HTTP API plus the nightly refresher.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::api::{router, AppState};
use crate::cli::types::Season;
use crate::error::Result;
use crate::nba::StatsClient;
use crate::refresher::{parse_refresh_time, Refresher};

pub async fn run(port: u16, season: Season, data_dir: PathBuf, refresh_at: String) -> Result<()> {
    let at = parse_refresh_time(&refresh_at)?;
    let client = Arc::new(StatsClient::new());

    Refresher {
        client: Arc::clone(&client),
        season: season.clone(),
        data_dir: data_dir.clone(),
        at,
    }
    .spawn();

    let state = AppState::new(client, data_dir, season);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    // Serve until interrupted; a failed signal hook would mean no clean
    // shutdown path, so fall through and let the process be killed.
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
