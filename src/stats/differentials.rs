//! Last-ten point differentials per team.
//!
//! One provider fetch per franchise; a failed fetch degrades that team to an
//! empty game list instead of failing the document.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cli::types::{Season, TeamId};
use crate::nba::table::ResultTable;
use crate::nba::teams;
use crate::nba::StatsClient;
use crate::stats::games::{opponent_label, parse_matchup};

pub const GAMES_PER_TEAM: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDifferential {
    pub date: String,
    pub opponent: String,
    #[serde(rename = "pointsFor")]
    pub points_for: i64,
    #[serde(rename = "pointsAgainst")]
    pub points_against: i64,
    pub diff: i64,
    pub win: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDifferentials {
    #[serde(rename = "teamId")]
    pub team_id: i64,
    #[serde(rename = "teamName")]
    pub team_name: String,
    pub games: Vec<GameDifferential>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentialsDocument {
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub season: String,
    #[serde(rename = "seasonType")]
    pub season_type: String,
    #[serde(rename = "gamesPerTeam")]
    pub games_per_team: usize,
    pub teams: BTreeMap<String, TeamDifferentials>,
}

/// Extract the newest `limit` differentials from one team's game-finder
/// table. Opponent points come from `OPP_PTS` when present, otherwise from
/// `PTS - PLUS_MINUS`.
pub fn last_differentials(table: &ResultTable, limit: usize) -> Vec<GameDifferential> {
    let date = table.resolve(&["GAME_DATE", "GAME_DATE_EST"]);
    let matchup = table.resolve(&["MATCHUP"]);
    let wl = table.resolve(&["WL"]);
    let pts = table.resolve(&["PTS"]);
    let opp_pts = table.resolve(&["OPP_PTS"]);
    let plus_minus = table.resolve(&["PLUS_MINUS"]);

    let mut games: Vec<GameDifferential> = table
        .rows
        .iter()
        .filter_map(|row| {
            let (home, opponent) = parse_matchup(&table.text(row, matchup)?)?;
            let points_for = table.integer(row, pts, 0);
            let points_against = match opp_pts {
                Some(_) => table.integer(row, opp_pts, 0),
                None => points_for - table.integer(row, plus_minus, 0),
            };
            Some(GameDifferential {
                date: table.text(row, date).unwrap_or_default(),
                opponent: opponent_label(home, &opponent),
                points_for,
                points_against,
                diff: points_for - points_against,
                win: table.text(row, wl).as_deref() == Some("W"),
            })
        })
        .collect();

    games.sort_by(|a, b| b.date.cmp(&a.date));
    games.truncate(limit);
    games
}

/// Build the full document, one fetch per team through the shared throttle.
pub async fn build_differentials(client: &StatsClient, season: &Season) -> DifferentialsDocument {
    let mut out = BTreeMap::new();
    for team in teams::TEAMS {
        let games = match client.recent_team_games(TeamId::new(team.id), season).await {
            Ok(resp) => resp
                .first()
                .map(|t| last_differentials(t, GAMES_PER_TEAM))
                .unwrap_or_default(),
            Err(err) => {
                warn!(team = team.abbr, %err, "differentials fetch failed, skipping team");
                Vec::new()
            }
        };
        out.insert(
            team.abbr.to_string(),
            TeamDifferentials {
                team_id: team.id,
                team_name: team.full_name.to_string(),
                games,
            },
        );
    }
    DifferentialsDocument {
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        season: season.to_string(),
        season_type: "Regular Season".to_string(),
        games_per_team: GAMES_PER_TEAM,
        teams: out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn log_table() -> ResultTable {
        ResultTable {
            name: "LeagueGameFinderResults".into(),
            headers: ["GAME_DATE", "MATCHUP", "WL", "PTS", "PLUS_MINUS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: (0..12)
                .map(|i| {
                    vec![
                        json!(format!("2026-01-{:02}", i + 1)),
                        json!(if i % 2 == 0 { "BOS vs. NYK" } else { "BOS @ MIA" }),
                        json!(if i % 3 == 0 { "L" } else { "W" }),
                        json!(110 + i),
                        json!(if i % 3 == 0 { -5 } else { 7 }),
                    ]
                })
                .collect(),
        }
    }

    #[test]
    fn keeps_newest_ten_with_signed_diffs() {
        let games = last_differentials(&log_table(), GAMES_PER_TEAM);
        assert_eq!(games.len(), 10);
        assert_eq!(games[0].date, "2026-01-12");
        // Newest game (i=11): 121 points, +7.
        assert_eq!(games[0].points_for, 121);
        assert_eq!(games[0].points_against, 114);
        assert_eq!(games[0].diff, 7);
        assert!(games[0].win);
        // Losses carry negative diffs.
        let loss = games.iter().find(|g| !g.win).unwrap();
        assert_eq!(loss.diff, -5);
    }

    #[test]
    fn opponent_labels_distinguish_home_and_road() {
        let games = last_differentials(&log_table(), GAMES_PER_TEAM);
        assert!(games.iter().any(|g| g.opponent == "vs NYK"));
        assert!(games.iter().any(|g| g.opponent == "@ MIA"));
    }

    #[test]
    fn prefers_direct_opponent_points_column() {
        let table = ResultTable {
            name: "TeamGameLog".into(),
            headers: ["GAME_DATE", "MATCHUP", "WL", "PTS", "OPP_PTS"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![vec![
                json!("2026-02-01"),
                json!("BOS vs. DEN"),
                json!("W"),
                json!(115),
                json!(109),
            ]],
        };
        let games = last_differentials(&table, GAMES_PER_TEAM);
        assert_eq!(games[0].points_against, 109);
        assert_eq!(games[0].diff, 6);
    }
}
