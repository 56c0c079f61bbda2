//! HTTP wrappers for the stats provider.
//!
//! Every stats endpoint returns the same result-set envelope, so the
//! wrappers stay thin: build the query, pass through the throttle gate,
//! parse. The gate is the one piece of shared state — a last-call
//! checkpoint that callers await so consecutive provider calls stay at
//! least [`MIN_REQUEST_INTERVAL`] apart. Advisory self-throttling only;
//! there is no fairness or backpressure beyond the fixed delay.

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER, USER_AGENT};
use reqwest::Client;
use tokio::sync::Mutex;

use crate::cli::types::{GameId, PlayerId, Season, TeamId};
use crate::error::Result;

use super::types::{ScoreboardResponse, StatsResponse};

pub const STATS_BASE_URL: &str = "https://stats.nba.com/stats";
pub const LIVE_SCOREBOARD_URL: &str =
    "https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json";

/// Minimum spacing between provider calls.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// How far back the game finder looks for recent games.
const GAME_FINDER_WINDOW_DAYS: i64 = 60;

/// Upstream query mode: a team's own production vs what opponents produced
/// against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureType {
    Base,
    Opponent,
}

impl MeasureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Opponent => "Opponent",
        }
    }
}

/// Provider client plus the shared throttle checkpoint.
///
/// Handlers and the nightly refresher share one instance, so all provider
/// traffic funnels through the same gate.
pub struct StatsClient {
    client: Client,
    base_url: String,
    live_url: String,
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

fn provider_headers() -> HeaderMap {
    // stats.nba.com rejects requests without browser-ish headers.
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("Mozilla/5.0 (compatible; courtside/0.1)"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://www.nba.com/"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

impl StatsClient {
    pub fn new() -> Self {
        Self::with_urls(STATS_BASE_URL, LIVE_SCOREBOARD_URL, MIN_REQUEST_INTERVAL)
    }

    /// Overridable endpoints and interval, used by tests.
    pub fn with_urls(base_url: &str, live_url: &str, min_interval: Duration) -> Self {
        let client = Client::builder()
            .default_headers(provider_headers())
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            live_url: live_url.to_string(),
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Block until the minimum inter-call interval has elapsed, then claim
    /// the checkpoint. Holding the lock across the sleep serializes callers,
    /// which is the intent.
    async fn throttle(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<StatsResponse> {
        self.throttle().await;
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json::<StatsResponse>()
            .await?;
        Ok(resp)
    }

    /// League-wide per-game team stats for one measure type.
    pub async fn league_team_stats(
        &self,
        season: &Season,
        measure: MeasureType,
    ) -> Result<StatsResponse> {
        self.get(
            "leaguedashteamstats",
            &[
                ("Season", season.to_string()),
                ("PerModeDetailed", "PerGame".into()),
                ("MeasureTypeDetailedDefense", measure.as_str().into()),
                ("SeasonTypeAllStar", "Regular Season".into()),
                ("LeagueID", "00".into()),
            ],
        )
        .await
    }

    /// Season totals (not per-game) for every team, used by the usage-rate
    /// calculator.
    pub async fn league_team_totals(&self, season: &Season) -> Result<StatsResponse> {
        self.get(
            "leaguedashteamstats",
            &[
                ("Season", season.to_string()),
                ("PerModeDetailed", "Totals".into()),
                ("MeasureTypeDetailedDefense", MeasureType::Base.as_str().into()),
                ("SeasonTypeAllStar", "Regular Season".into()),
                ("LeagueID", "00".into()),
            ],
        )
        .await
    }

    pub async fn league_standings(&self, season: &Season) -> Result<StatsResponse> {
        self.get(
            "leaguestandings",
            &[
                ("Season", season.to_string()),
                ("SeasonType", "Regular Season".into()),
                ("LeagueID", "00".into()),
            ],
        )
        .await
    }

    pub async fn team_game_log(&self, team_id: TeamId, season: &Season) -> Result<StatsResponse> {
        self.get(
            "teamgamelog",
            &[
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonTypeAllStar", "Regular Season".into()),
            ],
        )
        .await
    }

    /// Completed games for a team over the trailing window.
    pub async fn recent_team_games(
        &self,
        team_id: TeamId,
        season: &Season,
    ) -> Result<StatsResponse> {
        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(GAME_FINDER_WINDOW_DAYS);
        self.get(
            "leaguegamefinder",
            &[
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", "Regular Season".into()),
                ("LeagueID", "00".into()),
                ("DateFrom", start.format("%m/%d/%Y").to_string()),
                ("DateTo", end.format("%m/%d/%Y").to_string()),
            ],
        )
        .await
    }

    pub async fn team_player_dashboard(
        &self,
        team_id: TeamId,
        season: &Season,
    ) -> Result<StatsResponse> {
        self.get(
            "teamplayerdashboard",
            &[
                ("TeamID", team_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", "Regular Season".into()),
            ],
        )
        .await
    }

    pub async fn boxscore(&self, game_id: &GameId) -> Result<StatsResponse> {
        self.get("boxscoretraditionalv2", &[("GameID", game_id.to_string())])
            .await
    }

    pub async fn player_game_log(
        &self,
        player_id: PlayerId,
        season: &Season,
    ) -> Result<StatsResponse> {
        self.get(
            "playergamelog",
            &[
                ("PlayerID", player_id.to_string()),
                ("Season", season.to_string()),
                ("SeasonType", "Regular Season".into()),
            ],
        )
        .await
    }

    /// Today's live scoreboard. Different host, same throttle gate.
    pub async fn live_scoreboard(&self) -> Result<ScoreboardResponse> {
        self.throttle().await;
        let resp = self
            .client
            .get(&self.live_url)
            .send()
            .await?
            .error_for_status()?
            .json::<ScoreboardResponse>()
            .await?;
        Ok(resp)
    }
}

impl Default for StatsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn envelope_body() -> String {
        serde_json::json!({
            "resultSets": [{
                "name": "LeagueDashTeamStats",
                "headers": ["TEAM_ID", "TEAM_ABBREVIATION", "PTS"],
                "rowSet": [[1610612738, "BOS", 118.7]]
            }]
        })
        .to_string()
    }

    #[tokio::test]
    async fn league_team_stats_parses_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/leaguedashteamstats")
            .match_query(Matcher::UrlEncoded(
                "MeasureTypeDetailedDefense".into(),
                "Opponent".into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope_body())
            .create_async()
            .await;

        let client = StatsClient::with_urls(&server.url(), &server.url(), Duration::ZERO);
        let resp = client
            .league_team_stats(&Season::default(), MeasureType::Opponent)
            .await
            .unwrap();

        mock.assert_async().await;
        let table = resp.team_stats_table().unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[tokio::test]
    async fn provider_error_status_surfaces_as_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/leaguestandings")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let client = StatsClient::with_urls(&server.url(), &server.url(), Duration::ZERO);
        let result = client.league_standings(&Season::default()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn throttle_spaces_consecutive_calls() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/teamgamelog")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"resultSets": []}"#)
            .expect(2)
            .create_async()
            .await;

        let interval = Duration::from_millis(50);
        let client = StatsClient::with_urls(&server.url(), &server.url(), interval);
        let season = Season::default();
        let team = TeamId::new(1610612738);

        let started = Instant::now();
        client.team_game_log(team, &season).await.unwrap();
        client.team_game_log(team, &season).await.unwrap();
        assert!(started.elapsed() >= interval);
    }
}
