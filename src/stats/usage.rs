//! Advanced usage metrics (USG%, AST%, REB%, TOV%) from season totals.
//!
//! The formulas and their constants reproduce the numbers the frontend has
//! always displayed. In particular the 0.44 free-throw possession weight and
//! the 0.79 opponent-rebound share are fixed heuristics — keep them exact.

use serde::{Deserialize, Serialize};

use crate::nba::table::{parse_minutes, ResultTable};

/// Share of free-throw attempts that end a possession.
pub const FT_POSSESSION_WEIGHT: f64 = 0.44;

/// Opponent rebounds approximated as this share of the team's own total.
pub const OPP_REBOUND_SHARE: f64 = 0.79;

/// Per-game league-average team totals, used when authoritative team totals
/// are unavailable. Scaled by the player's games played.
const AVG_TEAM_MINUTES_PER_GAME: f64 = 241.0;
const AVG_TEAM_FGM_PER_GAME: f64 = 42.0;
const AVG_TEAM_FGA_PER_GAME: f64 = 89.0;
const AVG_TEAM_FTA_PER_GAME: f64 = 21.8;
const AVG_TEAM_TOV_PER_GAME: f64 = 14.2;
const AVG_TEAM_REB_PER_GAME: f64 = 43.8;

/// Raw season totals for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerSeasonTotals {
    pub minutes: f64,
    pub fgm: f64,
    pub fga: f64,
    pub fta: f64,
    pub ast: f64,
    pub reb: f64,
    pub tov: f64,
    pub games_played: u32,
}

impl PlayerSeasonTotals {
    /// Sum a per-game log table into season totals. Minutes cells may be
    /// "34:12" strings or plain numbers; unparseable minutes count as zero.
    pub fn from_game_log(table: &ResultTable) -> Self {
        let min_col = table.resolve(&["MIN"]);
        let fgm_col = table.resolve(&["FGM"]);
        let fga_col = table.resolve(&["FGA"]);
        let fta_col = table.resolve(&["FTA"]);
        let ast_col = table.resolve(&["AST"]);
        let reb_col = table.resolve(&["REB"]);
        let tov_col = table.resolve(&["TOV"]);

        let mut totals = Self {
            games_played: table.rows.len() as u32,
            ..Self::default()
        };
        for row in &table.rows {
            totals.minutes += table
                .cell(row, min_col)
                .and_then(parse_minutes)
                .unwrap_or(0.0);
            totals.fgm += table.numeric(row, fgm_col, 0.0);
            totals.fga += table.numeric(row, fga_col, 0.0);
            totals.fta += table.numeric(row, fta_col, 0.0);
            totals.ast += table.numeric(row, ast_col, 0.0);
            totals.reb += table.numeric(row, reb_col, 0.0);
            totals.tov += table.numeric(row, tov_col, 0.0);
        }
        totals
    }

    fn possessions(&self) -> f64 {
        self.fga + FT_POSSESSION_WEIGHT * self.fta + self.tov
    }
}

/// Raw season totals for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeamSeasonTotals {
    pub minutes: f64,
    pub fgm: f64,
    pub fga: f64,
    pub fta: f64,
    pub tov: f64,
    pub reb: f64,
}

impl TeamSeasonTotals {
    /// Extract totals from one row of a season-totals table. `None` if any
    /// required column is absent.
    pub fn from_row(table: &ResultTable, row: &[serde_json::Value]) -> Option<Self> {
        let min = table.resolve(&["MIN"])?;
        let fgm = table.resolve(&["FGM"])?;
        let fga = table.resolve(&["FGA"])?;
        let fta = table.resolve(&["FTA"])?;
        let tov = table.resolve(&["TOV"])?;
        let reb = table.resolve(&["REB"])?;
        Some(Self {
            minutes: table.numeric(row, Some(min), 0.0),
            fgm: table.numeric(row, Some(fgm), 0.0),
            fga: table.numeric(row, Some(fga), 0.0),
            fta: table.numeric(row, Some(fta), 0.0),
            tov: table.numeric(row, Some(tov), 0.0),
            reb: table.numeric(row, Some(reb), 0.0),
        })
    }

    /// League-average substitute scaled by games played, for when the real
    /// team totals cannot be fetched.
    pub fn league_average_estimate(games_played: u32) -> Self {
        let games = f64::from(games_played);
        Self {
            minutes: AVG_TEAM_MINUTES_PER_GAME * games,
            fgm: AVG_TEAM_FGM_PER_GAME * games,
            fga: AVG_TEAM_FGA_PER_GAME * games,
            fta: AVG_TEAM_FTA_PER_GAME * games,
            tov: AVG_TEAM_TOV_PER_GAME * games,
            reb: AVG_TEAM_REB_PER_GAME * games,
        }
    }

    fn possessions(&self) -> f64 {
        self.fga + FT_POSSESSION_WEIGHT * self.fta + self.tov
    }

    /// Single-player-equivalent minutes.
    fn factor(&self) -> f64 {
        self.minutes / 5.0
    }
}

/// Whether the team-side inputs were real or the league-average estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Measured,
    Estimated,
}

/// Computed usage metrics. Each metric is independently null when its
/// inputs are missing or degenerate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRates {
    pub usg_pct: Option<f64>,
    pub ast_pct: Option<f64>,
    pub reb_pct: Option<f64>,
    pub tov_pct: Option<f64>,
    pub estimated: bool,
    pub data_source: DataSource,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn clamp_pct(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(round1(value.clamp(0.0, 100.0)))
    } else {
        None
    }
}

/// Compute all four metrics from player and team season totals.
///
/// Passing `None` for the team triggers the league-average estimate and
/// flags the output as estimated.
pub fn compute_usage_rates(
    player: &PlayerSeasonTotals,
    team: Option<&TeamSeasonTotals>,
) -> UsageRates {
    let (team, source) = match team {
        Some(t) => (*t, DataSource::Measured),
        None => (
            TeamSeasonTotals::league_average_estimate(player.games_played),
            DataSource::Estimated,
        ),
    };

    let player_poss = player.possessions();
    let team_poss = team.possessions();
    let team_factor = team.factor();
    let minutes = player.minutes;

    let usg_pct = if minutes > 0.0 && team_poss > 0.0 {
        clamp_pct(100.0 * (player_poss * team_factor) / (minutes * team_poss))
    } else {
        None
    };

    let ast_pct = if team_factor > 0.0 {
        let denom = (minutes / team_factor) * team.fgm - player.fgm;
        if denom > 0.0 {
            clamp_pct(100.0 * player.ast / denom)
        } else {
            None
        }
    } else {
        None
    };

    let reb_pct = {
        let opp_reb = team.reb * OPP_REBOUND_SHARE;
        let denom = minutes * (team.reb + opp_reb);
        if denom > 0.0 {
            clamp_pct(100.0 * (player.reb * team_factor) / denom)
        } else {
            None
        }
    };

    let tov_pct = if player_poss > 0.0 {
        clamp_pct(100.0 * player.tov / player_poss)
    } else {
        None
    };

    UsageRates {
        usg_pct,
        ast_pct,
        reb_pct,
        tov_pct,
        estimated: source == DataSource::Estimated,
        data_source: source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_player() -> PlayerSeasonTotals {
        PlayerSeasonTotals {
            minutes: 2000.0,
            fgm: 450.0,
            fga: 1000.0,
            fta: 200.0,
            ast: 300.0,
            reb: 400.0,
            tov: 150.0,
            games_played: 70,
        }
    }

    fn sample_team() -> TeamSeasonTotals {
        TeamSeasonTotals {
            minutes: 19710.0,
            fgm: 3400.0,
            fga: 7000.0,
            fta: 1800.0,
            tov: 1100.0,
            reb: 3600.0,
        }
    }

    #[test]
    fn usage_rate_worked_example_is_finite_and_bounded() {
        let rates = compute_usage_rates(&sample_player(), Some(&sample_team()));
        let usg = rates.usg_pct.unwrap();
        assert!(usg.is_finite());
        assert!((0.0..=100.0).contains(&usg));
        // playerPoss = 1000 + 88 + 150 = 1238; teamPoss = 7000 + 792 + 1100
        // = 8892; factor = 3942. 100 * 1238 * 3942 / (2000 * 8892) ≈ 27.4.
        assert!((usg - 27.4).abs() < 0.05, "usg = {usg}");
        assert_eq!(rates.data_source, DataSource::Measured);
        assert!(!rates.estimated);
    }

    #[test]
    fn zero_minutes_nulls_every_metric() {
        let player = PlayerSeasonTotals {
            games_played: 3,
            ..PlayerSeasonTotals::default()
        };
        let rates = compute_usage_rates(&player, Some(&sample_team()));
        assert_eq!(rates.usg_pct, None);
        assert_eq!(rates.ast_pct, None);
        assert_eq!(rates.reb_pct, None);
        assert_eq!(rates.tov_pct, None);
    }

    #[test]
    fn tov_pct_needs_no_team_data() {
        let mut player = sample_player();
        player.ast = 0.0;
        let rates = compute_usage_rates(&player, Some(&sample_team()));
        // 100 * 150 / 1238 ≈ 12.1
        assert_eq!(rates.tov_pct, Some(12.1));
    }

    #[test]
    fn metrics_clamp_to_percentage_range() {
        // Heavy per-minute possession load pushes the raw USG% above 100.
        let mut player = sample_player();
        player.minutes = 10.0;
        let rates = compute_usage_rates(&player, Some(&sample_team()));
        assert_eq!(rates.usg_pct, Some(100.0));
    }

    #[test]
    fn missing_team_totals_fall_back_to_estimate() {
        let rates = compute_usage_rates(&sample_player(), None);
        assert!(rates.estimated);
        assert_eq!(rates.data_source, DataSource::Estimated);
        assert!(rates.usg_pct.is_some());

        let json = serde_json::to_value(&rates).unwrap();
        assert_eq!(json["data_source"], "estimated");
        assert_eq!(json["estimated"], true);
    }

    #[test]
    fn game_log_totals_accumulate_and_parse_minutes() {
        let table = ResultTable {
            name: "PlayerGameLog".into(),
            headers: ["MIN", "FGM", "FGA", "FTA", "AST", "REB", "TOV"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec![json!("34:30"), json!(10), json!(20), json!(5), json!(7), json!(8), json!(2)],
                vec![json!(28), json!(8), json!(15), json!(4), json!(5), json!(6), json!(3)],
            ],
        };
        let totals = PlayerSeasonTotals::from_game_log(&table);
        assert_eq!(totals.games_played, 2);
        assert!((totals.minutes - 62.5).abs() < 1e-9);
        assert_eq!(totals.fga, 35.0);
        assert_eq!(totals.tov, 5.0);
    }
}
