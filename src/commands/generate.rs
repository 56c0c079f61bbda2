//! `generate` command: one-shot artifact generation.

use std::path::Path;

use tracing::info;

use crate::artifacts::{
    write_artifact, TEAM_DIFFERENTIALS_FILE, TEAM_RANKINGS_FILE, TEAM_STATS_FILE,
};
use crate::cli::types::Season;
use crate::cli::Artifact;
use crate::error::Result;
use crate::nba::StatsClient;
use crate::refresher::refresh_artifacts;
use crate::stats::differentials::build_differentials;
use crate::stats::rankings::{fetch_team_rankings, team_stats_document};

pub async fn run(artifact: Artifact, season: Season, data_dir: &Path) -> Result<()> {
    let client = StatsClient::new();
    match artifact {
        Artifact::All => refresh_artifacts(&client, &season, data_dir).await?,
        Artifact::Rankings => {
            let rankings = fetch_team_rankings(&client, &season).await?;
            let path = write_artifact(data_dir, TEAM_RANKINGS_FILE, &rankings)?;
            info!(path = %path.display(), teams = rankings.teams.len(), "wrote rankings");
        }
        Artifact::TeamStats => {
            let rankings = fetch_team_rankings(&client, &season).await?;
            let doc = team_stats_document(&rankings);
            let path = write_artifact(data_dir, TEAM_STATS_FILE, &doc)?;
            info!(path = %path.display(), teams = doc.teams.len(), "wrote team stats");
        }
        Artifact::Differentials => {
            let doc = build_differentials(&client, &season).await;
            let path = write_artifact(data_dir, TEAM_DIFFERENTIALS_FILE, &doc)?;
            info!(path = %path.display(), teams = doc.teams.len(), "wrote differentials");
        }
    }
    Ok(())
}
