//! League-wide team rankings across offensive and opponent stat categories.
//!
//! Ranks use competition ranking ("min" ties): tied teams all take the
//! lowest eligible rank and the next distinct value skips the tied count.
//! Directionality is fixed per category — higher is better everywhere
//! except turnovers committed and the opponent categories.

use std::collections::{BTreeMap, HashMap};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cli::types::Season;
use crate::error::{CourtsideError, Result};
use crate::nba::table::{Column, ResultTable};
use crate::nba::teams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Higher value is better (points, shooting percentages, ...).
    Desc,
    /// Lower value is better (turnovers, opponent stats).
    Asc,
}

/// Competition ranking over a value slice: 1 = best under `direction`,
/// ties share the lowest rank of their group.
pub fn rank_min(values: &[f64], direction: Direction) -> Vec<u32> {
    values
        .iter()
        .map(|&v| {
            let better = values
                .iter()
                .filter(|&&other| match direction {
                    Direction::Desc => other > v,
                    Direction::Asc => other < v,
                })
                .count();
            better as u32 + 1
        })
        .collect()
}

/// Ordinal display string for a rank. Only 1/2/3 get special suffixes;
/// everything else is "th" regardless of last digit (11th, 21th, 32th).
/// Non-positive ranks render as "-".
pub fn format_rank(rank: i64) -> String {
    match rank {
        r if r <= 0 => "-".to_string(),
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        r => format!("{r}th"),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Upstream mixes fraction (0.478) and already-scaled (47.8) percentage
/// conventions. Values at or below 1.1 are treated as fractions and scaled
/// ×100; anything above passes through. The inclusive 1.1 threshold is part
/// of the output contract — do not "fix" it.
pub fn format_pct(value: f64) -> f64 {
    if value <= 1.1 {
        round1(value * 100.0)
    } else {
        round1(value)
    }
}

/// Offensive categories for one team, raw value + rank display side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffenseStats {
    pub ppg: f64,
    #[serde(rename = "ppgRank")]
    pub ppg_rank: String,
    #[serde(rename = "fgPct")]
    pub fg_pct: f64,
    #[serde(rename = "fgPctRank")]
    pub fg_pct_rank: String,
    #[serde(rename = "fg3Pct")]
    pub fg3_pct: f64,
    #[serde(rename = "fg3PctRank")]
    pub fg3_pct_rank: String,
    #[serde(rename = "ftPct")]
    pub ft_pct: f64,
    #[serde(rename = "ftPctRank")]
    pub ft_pct_rank: String,
    pub ast: f64,
    #[serde(rename = "astRank")]
    pub ast_rank: String,
    pub to: f64,
    #[serde(rename = "toRank")]
    pub to_rank: String,
}

/// Defensive view: what opponents produced, plus the team's own defensive
/// production (blocks, steals, rebounds).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseStats {
    pub oppg: f64,
    #[serde(rename = "oppgRank")]
    pub oppg_rank: String,
    #[serde(rename = "ofgPct")]
    pub ofg_pct: f64,
    #[serde(rename = "ofgPctRank")]
    pub ofg_pct_rank: String,
    #[serde(rename = "o3fgPct")]
    pub o3fg_pct: f64,
    #[serde(rename = "o3fgPctRank")]
    pub o3fg_pct_rank: String,
    pub blk: f64,
    #[serde(rename = "blkRank")]
    pub blk_rank: String,
    pub stl: f64,
    #[serde(rename = "stlRank")]
    pub stl_rank: String,
    pub reb: f64,
    #[serde(rename = "rebRank")]
    pub reb_rank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRanking {
    #[serde(rename = "teamId")]
    pub team_id: Option<i64>,
    #[serde(rename = "teamName")]
    pub team_name: String,
    #[serde(rename = "teamAbbr")]
    pub team_abbr: String,
    pub wins: i64,
    pub losses: i64,
    pub offense: OffenseStats,
    pub defense: DefenseStats,
}

/// Full rankings document, keyed by team abbreviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRankings {
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub season: String,
    pub teams: BTreeMap<String, TeamRanking>,
}

/// Rank-free per-team stat line, for the flat team-stats artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatLine {
    #[serde(rename = "teamId")]
    pub team_id: Option<i64>,
    #[serde(rename = "teamName")]
    pub team_name: String,
    pub wins: i64,
    pub losses: i64,
    pub ppg: f64,
    #[serde(rename = "fgPct")]
    pub fg_pct: f64,
    #[serde(rename = "fg3Pct")]
    pub fg3_pct: f64,
    #[serde(rename = "ftPct")]
    pub ft_pct: f64,
    pub ast: f64,
    pub to: f64,
    pub oppg: f64,
    #[serde(rename = "ofgPct")]
    pub ofg_pct: f64,
    #[serde(rename = "o3fgPct")]
    pub o3fg_pct: f64,
    pub blk: f64,
    pub stl: f64,
    pub reb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStatsDocument {
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub season: String,
    pub teams: BTreeMap<String, TeamStatLine>,
}

/// Project the rankings document down to raw stat lines.
pub fn team_stats_document(rankings: &TeamRankings) -> TeamStatsDocument {
    let teams = rankings
        .teams
        .iter()
        .map(|(abbr, t)| {
            (
                abbr.clone(),
                TeamStatLine {
                    team_id: t.team_id,
                    team_name: t.team_name.clone(),
                    wins: t.wins,
                    losses: t.losses,
                    ppg: t.offense.ppg,
                    fg_pct: t.offense.fg_pct,
                    fg3_pct: t.offense.fg3_pct,
                    ft_pct: t.offense.ft_pct,
                    ast: t.offense.ast,
                    to: t.offense.to,
                    oppg: t.defense.oppg,
                    ofg_pct: t.defense.ofg_pct,
                    o3fg_pct: t.defense.o3fg_pct,
                    blk: t.defense.blk,
                    stl: t.defense.stl,
                    reb: t.defense.reb,
                },
            )
        })
        .collect();
    TeamStatsDocument {
        last_updated: rankings.last_updated.clone(),
        season: rankings.season.clone(),
        teams,
    }
}

struct BaseColumns {
    team_id: Option<Column>,
    team_abbr: Option<Column>,
    team_name: Option<Column>,
    wins: Option<Column>,
    losses: Option<Column>,
    pts: Column,
    fg_pct: Column,
    fg3_pct: Column,
    ft_pct: Column,
    ast: Column,
    tov: Column,
    blk: Column,
    stl: Column,
    reb: Column,
}

struct OppColumns {
    team_id: Option<Column>,
    team_abbr: Option<Column>,
    pts: Column,
    fg_pct: Column,
    fg3_pct: Column,
}

/// Resolve every required column or fail with the full missing/available
/// picture. Partial output with silently wrong ranks is worse than an error.
fn resolve_base(table: &ResultTable) -> Result<BaseColumns> {
    let required: [(&'static str, &[&str]); 9] = [
        ("PTS", &["PTS", "PTS_PG"]),
        ("FG_PCT", &["FG_PCT"]),
        ("FG3_PCT", &["FG3_PCT"]),
        ("FT_PCT", &["FT_PCT"]),
        ("AST", &["AST"]),
        ("TOV", &["TOV"]),
        ("BLK", &["BLK"]),
        ("STL", &["STL"]),
        ("REB", &["REB"]),
    ];
    let mut resolved = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for (label, candidates) in required {
        match table.resolve(candidates) {
            Some(col) => resolved.push(col),
            None => missing.push(label),
        }
    }
    if !missing.is_empty() {
        return Err(CourtsideError::MissingColumns {
            table: "base",
            missing,
            available: table.headers.clone(),
        });
    }
    Ok(BaseColumns {
        team_id: table.resolve(&["TEAM_ID"]),
        team_abbr: table.resolve(&["TEAM_ABBREVIATION"]),
        team_name: table.resolve(&["TEAM_NAME"]),
        wins: table.resolve(&["W"]),
        losses: table.resolve(&["L"]),
        pts: resolved[0],
        fg_pct: resolved[1],
        fg3_pct: resolved[2],
        ft_pct: resolved[3],
        ast: resolved[4],
        tov: resolved[5],
        blk: resolved[6],
        stl: resolved[7],
        reb: resolved[8],
    })
}

fn resolve_opponent(table: &ResultTable) -> Result<OppColumns> {
    let required: [(&'static str, &[&str]); 3] = [
        ("OPP_PTS", &["OPP_PTS", "PTS", "PTS_PG"]),
        ("OPP_FG_PCT", &["OPP_FG_PCT", "FG_PCT"]),
        ("OPP_FG3_PCT", &["OPP_FG3_PCT", "FG3_PCT"]),
    ];
    let mut resolved = Vec::with_capacity(required.len());
    let mut missing = Vec::new();
    for (label, candidates) in required {
        match table.resolve(candidates) {
            Some(col) => resolved.push(col),
            None => missing.push(label),
        }
    }
    if !missing.is_empty() {
        return Err(CourtsideError::MissingColumns {
            table: "opponent",
            missing,
            available: table.headers.clone(),
        });
    }
    Ok(OppColumns {
        team_id: table.resolve(&["TEAM_ID"]),
        team_abbr: table.resolve(&["TEAM_ABBREVIATION"]),
        pts: resolved[0],
        fg_pct: resolved[1],
        fg3_pct: resolved[2],
    })
}

fn column_values(table: &ResultTable, col: Column) -> Vec<f64> {
    table
        .rows
        .iter()
        .map(|row| table.numeric(row, Some(col), 0.0))
        .collect()
}

fn cell_i64(cell: Option<&Value>) -> Option<i64> {
    match cell {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Build the rankings document from aligned Base and Opponent tables.
///
/// Teams join across the tables by id, then abbreviation. A team absent
/// from the opponent table keeps zeroed opponent values and "-" ranks.
pub fn build_team_rankings(
    base: &ResultTable,
    opp: &ResultTable,
    season: &Season,
) -> Result<TeamRankings> {
    let bc = resolve_base(base)?;
    let oc = resolve_opponent(opp)?;

    let ranked = |col: Column, dir: Direction| rank_min(&column_values(base, col), dir);
    let pts_rank = ranked(bc.pts, Direction::Desc);
    let fg_rank = ranked(bc.fg_pct, Direction::Desc);
    let fg3_rank = ranked(bc.fg3_pct, Direction::Desc);
    let ft_rank = ranked(bc.ft_pct, Direction::Desc);
    let ast_rank = ranked(bc.ast, Direction::Desc);
    let tov_rank = ranked(bc.tov, Direction::Asc);
    let blk_rank = ranked(bc.blk, Direction::Desc);
    let stl_rank = ranked(bc.stl, Direction::Desc);
    let reb_rank = ranked(bc.reb, Direction::Desc);

    let opp_pts_rank = rank_min(&column_values(opp, oc.pts), Direction::Asc);
    let opp_fg_rank = rank_min(&column_values(opp, oc.fg_pct), Direction::Asc);
    let opp_fg3_rank = rank_min(&column_values(opp, oc.fg3_pct), Direction::Asc);

    let mut opp_by_id: HashMap<i64, usize> = HashMap::new();
    let mut opp_by_abbr: HashMap<String, usize> = HashMap::new();
    for (i, row) in opp.rows.iter().enumerate() {
        if let Some(id) = cell_i64(opp.cell(row, oc.team_id)) {
            opp_by_id.insert(id, i);
        }
        if let Some(abbr) = opp.text(row, oc.team_abbr) {
            opp_by_abbr.insert(abbr, i);
        }
    }

    let mut teams_out = BTreeMap::new();
    for (i, row) in base.rows.iter().enumerate() {
        let team_id = cell_i64(base.cell(row, bc.team_id));
        let team_name = base.text(row, bc.team_name);
        let team_abbr = base
            .text(row, bc.team_abbr)
            .or_else(|| {
                team_name
                    .as_deref()
                    .and_then(teams::abbr_for_name)
                    .map(String::from)
            })
            .or_else(|| team_name.clone());
        let Some(team_abbr) = team_abbr else {
            // No id path to key this row by; nothing downstream could
            // address it anyway.
            continue;
        };

        let opp_idx = team_id
            .and_then(|id| opp_by_id.get(&id).copied())
            .or_else(|| opp_by_abbr.get(&team_abbr).copied());

        let (oppg, oppg_rank, ofg_pct, ofg_pct_rank, o3fg_pct, o3fg_pct_rank) = match opp_idx {
            Some(j) => {
                let opp_row = &opp.rows[j];
                (
                    round1(opp.numeric(opp_row, Some(oc.pts), 0.0)),
                    format_rank(opp_pts_rank[j] as i64),
                    format_pct(opp.numeric(opp_row, Some(oc.fg_pct), 0.0)),
                    format_rank(opp_fg_rank[j] as i64),
                    format_pct(opp.numeric(opp_row, Some(oc.fg3_pct), 0.0)),
                    format_rank(opp_fg3_rank[j] as i64),
                )
            }
            None => (0.0, "-".into(), 0.0, "-".into(), 0.0, "-".into()),
        };

        let entry = TeamRanking {
            team_id,
            team_name: team_name.clone().unwrap_or_else(|| team_abbr.clone()),
            team_abbr: team_abbr.clone(),
            wins: base.integer(row, bc.wins, 0),
            losses: base.integer(row, bc.losses, 0),
            offense: OffenseStats {
                ppg: round1(base.numeric(row, Some(bc.pts), 0.0)),
                ppg_rank: format_rank(pts_rank[i] as i64),
                fg_pct: format_pct(base.numeric(row, Some(bc.fg_pct), 0.0)),
                fg_pct_rank: format_rank(fg_rank[i] as i64),
                fg3_pct: format_pct(base.numeric(row, Some(bc.fg3_pct), 0.0)),
                fg3_pct_rank: format_rank(fg3_rank[i] as i64),
                ft_pct: format_pct(base.numeric(row, Some(bc.ft_pct), 0.0)),
                ft_pct_rank: format_rank(ft_rank[i] as i64),
                ast: round1(base.numeric(row, Some(bc.ast), 0.0)),
                ast_rank: format_rank(ast_rank[i] as i64),
                to: round1(base.numeric(row, Some(bc.tov), 0.0)),
                to_rank: format_rank(tov_rank[i] as i64),
            },
            defense: DefenseStats {
                oppg,
                oppg_rank,
                ofg_pct,
                ofg_pct_rank,
                o3fg_pct,
                o3fg_pct_rank,
                blk: round1(base.numeric(row, Some(bc.blk), 0.0)),
                blk_rank: format_rank(blk_rank[i] as i64),
                stl: round1(base.numeric(row, Some(bc.stl), 0.0)),
                stl_rank: format_rank(stl_rank[i] as i64),
                reb: round1(base.numeric(row, Some(bc.reb), 0.0)),
                reb_rank: format_rank(reb_rank[i] as i64),
            },
        };
        teams_out.insert(team_abbr, entry);
    }

    Ok(TeamRankings {
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        season: season.to_string(),
        teams: teams_out,
    })
}

/// Fetch both measure types and build the rankings document.
pub async fn fetch_team_rankings(
    client: &crate::nba::StatsClient,
    season: &Season,
) -> Result<TeamRankings> {
    let base = client
        .league_team_stats(season, crate::nba::MeasureType::Base)
        .await?;
    let opp = client
        .league_team_stats(season, crate::nba::MeasureType::Opponent)
        .await?;
    let base_table = base
        .team_stats_table()
        .ok_or(CourtsideError::MissingResultSet {
            name: "LeagueDashTeamStats",
        })?;
    let opp_table = opp
        .team_stats_table()
        .ok_or(CourtsideError::MissingResultSet {
            name: "LeagueDashTeamStats",
        })?;
    build_team_rankings(base_table, opp_table, season)
}
