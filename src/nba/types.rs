//! Wire types for the stats provider.

use serde::{Deserialize, Serialize};

use super::table::ResultTable;

/// Envelope shared by every stats endpoint: a list of named result sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", default)]
    pub result_sets: Vec<ResultTable>,
}

impl StatsResponse {
    /// Result set by name.
    pub fn find(&self, name: &str) -> Option<&ResultTable> {
        self.result_sets.iter().find(|rs| rs.name == name)
    }

    pub fn first(&self) -> Option<&ResultTable> {
        self.result_sets.first()
    }

    /// Pick the per-team stats table out of a response.
    ///
    /// Some measure types return auxiliary sets first, so prefer the one
    /// carrying `TEAM_ABBREVIATION` plus a points column in either naming
    /// convention; fall back to the first set.
    pub fn team_stats_table(&self) -> Option<&ResultTable> {
        self.result_sets
            .iter()
            .find(|rs| {
                rs.resolve(&["TEAM_ABBREVIATION"]).is_some()
                    && rs.resolve(&["PTS", "PTS_PG"]).is_some()
            })
            .or_else(|| self.first())
    }
}

/// Live scoreboard feed (separate CDN endpoint, regular JSON rather than
/// the result-set envelope).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub scoreboard: Scoreboard,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scoreboard {
    #[serde(rename = "gameDate", default)]
    pub game_date: String,
    #[serde(default)]
    pub games: Vec<LiveGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveGame {
    #[serde(rename = "gameId", default)]
    pub game_id: String,
    #[serde(rename = "gameStatusText", default)]
    pub game_status_text: String,
    #[serde(default)]
    pub period: u8,
    #[serde(rename = "homeTeam", default)]
    pub home_team: LiveTeam,
    #[serde(rename = "awayTeam", default)]
    pub away_team: LiveTeam,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveTeam {
    #[serde(rename = "teamId", default)]
    pub team_id: i64,
    #[serde(rename = "teamName", default)]
    pub team_name: String,
    #[serde(rename = "teamCity", default)]
    pub team_city: String,
    #[serde(rename = "teamTricode", default)]
    pub team_tricode: String,
    #[serde(default)]
    pub score: i32,
}

/// Normalized game shape served by `/games`, matching the frontend contract
/// inherited from the old balldontlie-style feed.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub id: String,
    pub date: String,
    pub season: u16,
    pub status: String,
    pub period: u8,
    pub time: String,
    pub postseason: bool,
    pub home_team_score: i32,
    pub visitor_team_score: i32,
    pub home_team: GameTeam,
    pub visitor_team: GameTeam,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameTeam {
    pub id: i64,
    pub full_name: String,
    pub name: String,
    pub abbreviation: String,
    pub city: String,
}

impl GameTeam {
    pub fn from_live(team: &LiveTeam) -> Self {
        Self {
            id: team.team_id,
            full_name: format!("{} {}", team.team_city, team.team_name),
            name: team.team_name.clone(),
            abbreviation: team.team_tricode.clone(),
            city: team.team_city.clone(),
        }
    }
}
