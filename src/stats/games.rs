//! Game-level normalization: box scores, recent results, team leaders, and
//! player game logs.
//!
//! All functions here are pure table transforms; fetching stays with the
//! caller. Missing columns degrade to defaults rather than erroring — a
//! partially filled line is more useful to the frontend than none.

use serde::{Deserialize, Serialize};

use crate::nba::table::{parse_minutes, ResultTable};

/// Split a `MATCHUP` cell ("BOS vs. NYK" home, "BOS @ NYK" away) into
/// home flag and opponent abbreviation.
pub fn parse_matchup(matchup: &str) -> Option<(bool, String)> {
    if let Some((_, opp)) = matchup.split_once(" vs. ") {
        Some((true, opp.trim().to_string()))
    } else if let Some((_, opp)) = matchup.split_once(" @ ") {
        Some((false, opp.trim().to_string()))
    } else {
        None
    }
}

/// Opponent label for display: `"vs NYK"` at home, `"@ NYK"` on the road.
pub fn opponent_label(home: bool, opponent: &str) -> String {
    if home {
        format!("vs {opponent}")
    } else {
        format!("@ {opponent}")
    }
}

/// One player's line in a box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLine {
    #[serde(rename = "playerId")]
    pub player_id: i64,
    pub name: String,
    pub team: String,
    /// Decimal minutes; `None` for a DNP.
    pub minutes: Option<f64>,
    pub pts: i64,
    pub reb: i64,
    pub ast: i64,
    pub stl: i64,
    pub blk: i64,
    pub tov: i64,
    pub fgm: i64,
    pub fga: i64,
    pub fg3m: i64,
    pub fg3a: i64,
    pub ftm: i64,
    pub fta: i64,
    #[serde(rename = "plusMinus")]
    pub plus_minus: i64,
}

/// One team's totals in a box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLine {
    #[serde(rename = "teamId")]
    pub team_id: i64,
    pub abbreviation: String,
    pub name: String,
    pub pts: i64,
    pub reb: i64,
    pub ast: i64,
    #[serde(rename = "fgPct")]
    pub fg_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxScore {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub players: Vec<PlayerLine>,
    pub teams: Vec<TeamLine>,
}

pub fn build_box_score(
    game_id: &str,
    player_stats: Option<&ResultTable>,
    team_stats: Option<&ResultTable>,
) -> BoxScore {
    let players = player_stats.map(player_lines).unwrap_or_default();
    let teams = team_stats.map(team_lines).unwrap_or_default();
    BoxScore {
        game_id: game_id.to_string(),
        players,
        teams,
    }
}

fn player_lines(table: &ResultTable) -> Vec<PlayerLine> {
    let id = table.resolve(&["PLAYER_ID"]);
    let name = table.resolve(&["PLAYER_NAME"]);
    let team = table.resolve(&["TEAM_ABBREVIATION"]);
    let min = table.resolve(&["MIN"]);
    let pts = table.resolve(&["PTS"]);
    let reb = table.resolve(&["REB"]);
    let ast = table.resolve(&["AST"]);
    let stl = table.resolve(&["STL"]);
    let blk = table.resolve(&["BLK"]);
    let tov = table.resolve(&["TO", "TOV"]);
    let fgm = table.resolve(&["FGM"]);
    let fga = table.resolve(&["FGA"]);
    let fg3m = table.resolve(&["FG3M"]);
    let fg3a = table.resolve(&["FG3A"]);
    let ftm = table.resolve(&["FTM"]);
    let fta = table.resolve(&["FTA"]);
    let pm = table.resolve(&["PLUS_MINUS"]);

    table
        .rows
        .iter()
        .map(|row| PlayerLine {
            player_id: table.integer(row, id, 0),
            name: table.text(row, name).unwrap_or_default(),
            team: table.text(row, team).unwrap_or_default(),
            minutes: table.cell(row, min).and_then(parse_minutes),
            pts: table.integer(row, pts, 0),
            reb: table.integer(row, reb, 0),
            ast: table.integer(row, ast, 0),
            stl: table.integer(row, stl, 0),
            blk: table.integer(row, blk, 0),
            tov: table.integer(row, tov, 0),
            fgm: table.integer(row, fgm, 0),
            fga: table.integer(row, fga, 0),
            fg3m: table.integer(row, fg3m, 0),
            fg3a: table.integer(row, fg3a, 0),
            ftm: table.integer(row, ftm, 0),
            fta: table.integer(row, fta, 0),
            plus_minus: table.integer(row, pm, 0),
        })
        .collect()
}

fn team_lines(table: &ResultTable) -> Vec<TeamLine> {
    let id = table.resolve(&["TEAM_ID"]);
    let abbr = table.resolve(&["TEAM_ABBREVIATION"]);
    let city = table.resolve(&["TEAM_CITY"]);
    let name = table.resolve(&["TEAM_NAME"]);
    let pts = table.resolve(&["PTS"]);
    let reb = table.resolve(&["REB"]);
    let ast = table.resolve(&["AST"]);
    let fg_pct = table.resolve(&["FG_PCT"]);

    table
        .rows
        .iter()
        .map(|row| {
            let nickname = table.text(row, name).unwrap_or_default();
            let full = match table.text(row, city) {
                Some(c) if !c.is_empty() => format!("{c} {nickname}"),
                _ => nickname,
            };
            TeamLine {
                team_id: table.integer(row, id, 0),
                abbreviation: table.text(row, abbr).unwrap_or_default(),
                name: full,
                pts: table.integer(row, pts, 0),
                reb: table.integer(row, reb, 0),
                ast: table.integer(row, ast, 0),
                fg_pct: table.numeric(row, fg_pct, 0.0),
            }
        })
        .collect()
}

/// One completed game from a team's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamGame {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub date: String,
    pub home: bool,
    pub opponent: String,
    #[serde(rename = "teamScore")]
    pub team_score: i64,
    #[serde(rename = "opponentScore")]
    pub opponent_score: i64,
    pub win: bool,
    /// Display form, e.g. `"W 118-104 vs NYK"`.
    pub result: String,
}

/// Normalize a game-finder table into completed games, newest first,
/// capped at `limit`. Rows without a parseable matchup are skipped.
pub fn recent_games(table: &ResultTable, limit: usize) -> Vec<TeamGame> {
    let game_id = table.resolve(&["GAME_ID", "Game_ID"]);
    let date = table.resolve(&["GAME_DATE", "GAME_DATE_EST"]);
    let matchup = table.resolve(&["MATCHUP"]);
    let wl = table.resolve(&["WL"]);
    let pts = table.resolve(&["PTS"]);
    let opp_pts = table.resolve(&["OPP_PTS"]);
    let plus_minus = table.resolve(&["PLUS_MINUS"]);

    let mut games: Vec<TeamGame> = table
        .rows
        .iter()
        .filter_map(|row| {
            let (home, opponent) = parse_matchup(&table.text(row, matchup)?)?;
            let team_score = table.integer(row, pts, 0);
            // Opponent score is rarely reported directly; the plus-minus
            // column recovers it.
            let opponent_score = match opp_pts {
                Some(_) => table.integer(row, opp_pts, 0),
                None => team_score - table.integer(row, plus_minus, 0),
            };
            let win = table.text(row, wl).as_deref() == Some("W");
            let result = format!(
                "{} {}-{} {}",
                if win { "W" } else { "L" },
                team_score,
                opponent_score,
                opponent_label(home, &opponent),
            );
            Some(TeamGame {
                game_id: table.text(row, game_id).unwrap_or_default(),
                date: table.text(row, date).unwrap_or_default(),
                home,
                opponent,
                team_score,
                opponent_score,
                win,
                result,
            })
        })
        .collect();

    // Dates arrive ISO-formatted, so lexicographic order is chronological.
    games.sort_by(|a, b| b.date.cmp(&a.date));
    games.truncate(limit);
    games
}

/// Top performer in one per-game category, identified by last name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLeader {
    pub player: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterPlayer {
    #[serde(rename = "playerId")]
    pub player_id: i64,
    pub name: String,
    pub gp: i64,
    pub ppg: f64,
    pub rpg: f64,
    pub apg: f64,
    pub spg: f64,
    pub bpg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamLeaders {
    #[serde(rename = "teamId")]
    pub team_id: i64,
    pub ppg: Option<CategoryLeader>,
    pub rpg: Option<CategoryLeader>,
    pub apg: Option<CategoryLeader>,
    pub spg: Option<CategoryLeader>,
    pub bpg: Option<CategoryLeader>,
    /// Top five rotation players by scoring average.
    pub roster: Vec<RosterPlayer>,
}

fn last_name(full: &str) -> String {
    full.split_whitespace()
        .last()
        .unwrap_or(full)
        .to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-game leaders and a top-five roster from a player season-totals table.
/// Players with zero games are excluded from averages.
pub fn build_team_leaders(team_id: i64, table: &ResultTable) -> TeamLeaders {
    let id = table.resolve(&["PLAYER_ID"]);
    let name = table.resolve(&["PLAYER_NAME"]);
    let gp = table.resolve(&["GP"]);
    let pts = table.resolve(&["PTS"]);
    let reb = table.resolve(&["REB"]);
    let ast = table.resolve(&["AST"]);
    let stl = table.resolve(&["STL"]);
    let blk = table.resolve(&["BLK"]);

    let mut roster: Vec<RosterPlayer> = table
        .rows
        .iter()
        .filter_map(|row| {
            let games = table.integer(row, gp, 0);
            if games <= 0 {
                return None;
            }
            let per_game = |col| round1(table.numeric(row, col, 0.0) / games as f64);
            Some(RosterPlayer {
                player_id: table.integer(row, id, 0),
                name: table.text(row, name)?,
                gp: games,
                ppg: per_game(pts),
                rpg: per_game(reb),
                apg: per_game(ast),
                spg: per_game(stl),
                bpg: per_game(blk),
            })
        })
        .collect();

    let leader = |pick: fn(&RosterPlayer) -> f64| {
        roster
            .iter()
            .max_by(|a, b| pick(a).total_cmp(&pick(b)))
            .map(|p| CategoryLeader {
                player: last_name(&p.name),
                value: pick(p),
            })
    };
    let leaders = TeamLeaders {
        team_id,
        ppg: leader(|p| p.ppg),
        rpg: leader(|p| p.rpg),
        apg: leader(|p| p.apg),
        spg: leader(|p| p.spg),
        bpg: leader(|p| p.bpg),
        roster: Vec::new(),
    };

    roster.sort_by(|a, b| b.ppg.total_cmp(&a.ppg));
    roster.truncate(5);
    TeamLeaders { roster, ..leaders }
}

/// One row of a player's game log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGameLine {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub date: String,
    pub matchup: String,
    pub minutes: Option<f64>,
    pub pts: i64,
    pub reb: i64,
    pub ast: i64,
    pub stl: i64,
    pub blk: i64,
    pub tov: i64,
    pub fgm: i64,
    pub fga: i64,
    pub fg3m: i64,
    pub fg3a: i64,
    #[serde(rename = "plusMinus")]
    pub plus_minus: i64,
}

/// The most recent `limit` games from a player game-log table (the provider
/// returns newest first; that order is kept).
pub fn player_game_lines(table: &ResultTable, limit: usize) -> Vec<PlayerGameLine> {
    let game_id = table.resolve(&["Game_ID", "GAME_ID"]);
    let date = table.resolve(&["GAME_DATE"]);
    let matchup = table.resolve(&["MATCHUP"]);
    let min = table.resolve(&["MIN"]);
    let pts = table.resolve(&["PTS"]);
    let reb = table.resolve(&["REB"]);
    let ast = table.resolve(&["AST"]);
    let stl = table.resolve(&["STL"]);
    let blk = table.resolve(&["BLK"]);
    let tov = table.resolve(&["TOV", "TO"]);
    let fgm = table.resolve(&["FGM"]);
    let fga = table.resolve(&["FGA"]);
    let fg3m = table.resolve(&["FG3M"]);
    let fg3a = table.resolve(&["FG3A"]);
    let pm = table.resolve(&["PLUS_MINUS"]);

    table
        .rows
        .iter()
        .take(limit)
        .map(|row| PlayerGameLine {
            game_id: table.text(row, game_id).unwrap_or_default(),
            date: table.text(row, date).unwrap_or_default(),
            matchup: table.text(row, matchup).unwrap_or_default(),
            minutes: table.cell(row, min).and_then(parse_minutes),
            pts: table.integer(row, pts, 0),
            reb: table.integer(row, reb, 0),
            ast: table.integer(row, ast, 0),
            stl: table.integer(row, stl, 0),
            blk: table.integer(row, blk, 0),
            tov: table.integer(row, tov, 0),
            fgm: table.integer(row, fgm, 0),
            fga: table.integer(row, fga, 0),
            fg3m: table.integer(row, fg3m, 0),
            fg3a: table.integer(row, fg3a, 0),
            plus_minus: table.integer(row, pm, 0),
        })
        .collect()
}
