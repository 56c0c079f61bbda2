//! Nightly artifact refresh.
//!
//! A recurring task, decoupled from request serving: sleep until the
//! configured wall-clock time, regenerate every artifact, repeat. Failures
//! are logged and the task waits for the next night; it shares nothing with
//! the HTTP surface beyond the data directory and the provider throttle.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveTime, TimeDelta};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::artifacts::{
    write_artifact, TEAM_DIFFERENTIALS_FILE, TEAM_RANKINGS_FILE, TEAM_STATS_FILE,
};
use crate::cli::types::Season;
use crate::error::{CourtsideError, Result};
use crate::nba::StatsClient;
use crate::stats::differentials::build_differentials;
use crate::stats::rankings::{fetch_team_rankings, team_stats_document};

/// Default refresh time, local clock.
pub const DEFAULT_REFRESH_TIME: &str = "03:30";

pub fn parse_refresh_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| CourtsideError::InvalidRefreshTime {
        value: value.to_string(),
    })
}

/// Sleep duration until the next local occurrence of `target`.
fn until_next(target: NaiveTime) -> Duration {
    let now = Local::now().naive_local();
    let mut next = now.date().and_time(target);
    if next <= now {
        next += TimeDelta::days(1);
    }
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

pub struct Refresher {
    pub client: Arc<StatsClient>,
    pub season: Season,
    pub data_dir: PathBuf,
    pub at: NaiveTime,
}

impl Refresher {
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let wait = until_next(self.at);
                info!(at = %self.at, in_secs = wait.as_secs(), "next artifact refresh scheduled");
                tokio::time::sleep(wait).await;
                if let Err(err) = refresh_artifacts(&self.client, &self.season, &self.data_dir).await
                {
                    error!(%err, "nightly refresh failed, keeping previous artifacts");
                }
            }
        })
    }
}

/// Regenerate all three artifacts in place.
pub async fn refresh_artifacts(
    client: &StatsClient,
    season: &Season,
    data_dir: &std::path::Path,
) -> Result<()> {
    let rankings = fetch_team_rankings(client, season).await?;
    write_artifact(data_dir, TEAM_RANKINGS_FILE, &rankings)?;
    write_artifact(data_dir, TEAM_STATS_FILE, &team_stats_document(&rankings))?;

    let differentials = build_differentials(client, season).await;
    write_artifact(data_dir, TEAM_DIFFERENTIALS_FILE, &differentials)?;

    info!(season = %season, teams = rankings.teams.len(), "artifacts refreshed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_time_parses_hh_mm() {
        assert_eq!(
            parse_refresh_time("03:30").unwrap(),
            NaiveTime::from_hms_opt(3, 30, 0).unwrap()
        );
        assert!(parse_refresh_time("3:30pm").is_err());
        assert!(parse_refresh_time("25:00").is_err());
    }

    #[test]
    fn next_occurrence_is_within_a_day() {
        let wait = until_next(NaiveTime::from_hms_opt(3, 30, 0).unwrap());
        assert!(wait <= Duration::from_secs(24 * 60 * 60));
    }
}
