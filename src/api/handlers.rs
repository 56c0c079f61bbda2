//! Request handlers.
//!
//! Every endpoint answers JSON. Failures keep the response shape: an
//! `error` field next to empty data, with a non-2xx status, so the frontend
//! renders a degraded view instead of breaking on a missing key.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::artifacts::{write_artifact, TEAM_DIFFERENTIALS_FILE};
use crate::cli::types::{GameId, PlayerId, Season, TeamId};
use crate::error::{CourtsideError, Result};
use crate::nba::types::{GameSummary, GameTeam, LiveGame};
use crate::nba::ResultTable;
use crate::stats::differentials::build_differentials;
use crate::stats::games::{
    build_box_score, build_team_leaders, player_game_lines, recent_games, BoxScore, TeamGame,
    TeamLeaders,
};
use crate::stats::rankings::fetch_team_rankings;
use crate::stats::standings::{build_standings, ConferenceStandings};
use crate::stats::usage::{compute_usage_rates, PlayerSeasonTotals, TeamSeasonTotals};

use super::state::AppState;

const RECENT_GAMES_LIMIT: usize = 10;
const GAMELOG_DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GameLogQuery {
    pub season: Option<String>,
    pub last: Option<usize>,
}

fn season_or_default(raw: &Option<String>, state: &AppState) -> Result<Season> {
    match raw {
        Some(s) => Season::new(s),
        None => Ok(state.season.clone()),
    }
}

fn status_for(err: &CourtsideError) -> StatusCode {
    match err {
        CourtsideError::InvalidSeason { .. }
        | CourtsideError::InvalidRefreshTime { .. }
        | CourtsideError::InvalidId(_)
        | CourtsideError::UnknownTeam { .. } => StatusCode::BAD_REQUEST,
        CourtsideError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// Error body: the endpoint's empty shape plus an `error` field.
fn error_response(err: &CourtsideError, mut empty: Value) -> Response {
    empty["error"] = json!(err.to_string());
    (status_for(err), Json(empty)).into_response()
}

pub async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

fn season_year(season: &Season) -> u16 {
    season.as_str()[..4].parse().unwrap_or(0)
}

fn summarize_game(game: &LiveGame, date: &str, season: u16) -> GameSummary {
    GameSummary {
        id: game.game_id.clone(),
        date: date.to_string(),
        season,
        status: game.game_status_text.clone(),
        period: game.period,
        time: game.game_status_text.clone(),
        // Playoff game ids carry the 004 prefix.
        postseason: game.game_id.starts_with("004"),
        home_team_score: game.home_team.score,
        visitor_team_score: game.away_team.score,
        home_team: GameTeam::from_live(&game.home_team),
        visitor_team: GameTeam::from_live(&game.away_team),
    }
}

async fn fetch_games(state: &AppState) -> Result<(String, Vec<GameSummary>)> {
    let scoreboard = state.client.live_scoreboard().await?.scoreboard;
    let year = season_year(&state.season);
    let games = scoreboard
        .games
        .iter()
        .map(|g| summarize_game(g, &scoreboard.game_date, year))
        .collect();
    Ok((scoreboard.game_date, games))
}

pub async fn games(State(state): State<AppState>) -> Response {
    match fetch_games(&state).await {
        Ok((date, games)) => Json(json!({ "date": date, "games": games })).into_response(),
        Err(err) => error_response(&err, json!({ "date": "", "games": [] })),
    }
}

pub async fn game_finals(State(state): State<AppState>) -> Response {
    match fetch_games(&state).await {
        Ok((date, games)) => {
            let finals: Vec<GameSummary> = games
                .into_iter()
                .filter(|g| g.status.starts_with("Final"))
                .collect();
            Json(json!({ "date": date, "games": finals })).into_response()
        }
        Err(err) => error_response(&err, json!({ "date": "", "games": [] })),
    }
}

async fn fetch_box_score(state: &AppState, game_id: &GameId) -> Result<BoxScore> {
    let resp = state.client.boxscore(game_id).await?;
    Ok(build_box_score(
        game_id.as_str(),
        resp.find("PlayerStats"),
        resp.find("TeamStats"),
    ))
}

pub async fn box_score(State(state): State<AppState>, Path(game_id): Path<String>) -> Response {
    let game_id = GameId::new(game_id);
    match fetch_box_score(&state, &game_id).await {
        Ok(doc) => Json(doc).into_response(),
        Err(err) => error_response(
            &err,
            json!({ "gameId": game_id.as_str(), "players": [], "teams": [] }),
        ),
    }
}

async fn fetch_standings(state: &AppState, season: &Season) -> Result<ConferenceStandings> {
    let resp = state.client.league_standings(season).await?;
    let table = resp
        .find("Standings")
        .or_else(|| resp.first())
        .ok_or(CourtsideError::MissingResultSet { name: "Standings" })?;
    Ok(build_standings(table))
}

pub async fn standings(
    State(state): State<AppState>,
    Query(q): Query<SeasonQuery>,
) -> Response {
    let result = match season_or_default(&q.season, &state) {
        Ok(season) => fetch_standings(&state, &season).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(doc) => Json(doc).into_response(),
        Err(err) => error_response(&err, json!({ "east": [], "west": [] })),
    }
}

pub async fn team_rankings(
    State(state): State<AppState>,
    Query(q): Query<SeasonQuery>,
) -> Response {
    let season = match season_or_default(&q.season, &state) {
        Ok(season) => season,
        Err(err) => return error_response(&err, json!({ "teams": {} })),
    };

    {
        let mut cache = state.rankings.lock().await;
        if let Some(doc) = cache.get(&season) {
            return Json(doc.clone()).into_response();
        }
    }

    match fetch_team_rankings(&state.client, &season).await {
        Ok(doc) => {
            state.rankings.lock().await.insert(season, doc.clone());
            Json(doc).into_response()
        }
        Err(err) => error_response(&err, json!({ "teams": {} })),
    }
}

async fn fetch_team_games(
    state: &AppState,
    team_id: TeamId,
    season: &Season,
) -> Result<Vec<TeamGame>> {
    let resp = state.client.recent_team_games(team_id, season).await?;
    Ok(resp
        .first()
        .map(|t| recent_games(t, RECENT_GAMES_LIMIT))
        .unwrap_or_default())
}

pub async fn team_games(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(q): Query<SeasonQuery>,
) -> Response {
    let empty = json!({ "teamId": team_id, "games": [] });
    let result = team_id
        .parse::<TeamId>()
        .and_then(|id| season_or_default(&q.season, &state).map(|s| (id, s)));
    let (team_id, season) = match result {
        Ok(pair) => pair,
        Err(err) => return error_response(&err, empty),
    };
    match fetch_team_games(&state, team_id, &season).await {
        Ok(games) => {
            Json(json!({ "teamId": team_id.as_i64(), "games": games })).into_response()
        }
        Err(err) => error_response(&err, empty),
    }
}

async fn fetch_team_leaders(
    state: &AppState,
    team_id: TeamId,
    season: &Season,
) -> Result<TeamLeaders> {
    let resp = state.client.team_player_dashboard(team_id, season).await?;
    let table = resp
        .find("PlayersSeasonTotals")
        .or_else(|| resp.first())
        .ok_or(CourtsideError::MissingResultSet {
            name: "PlayersSeasonTotals",
        })?;
    Ok(build_team_leaders(team_id.as_i64(), table))
}

pub async fn team_leaders(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
    Query(q): Query<SeasonQuery>,
) -> Response {
    let empty = json!({ "teamId": team_id, "roster": [] });
    let result = team_id
        .parse::<TeamId>()
        .and_then(|id| season_or_default(&q.season, &state).map(|s| (id, s)));
    let (team_id, season) = match result {
        Ok(pair) => pair,
        Err(err) => return error_response(&err, empty),
    };
    match fetch_team_leaders(&state, team_id, &season).await {
        Ok(doc) => Json(doc).into_response(),
        Err(err) => error_response(&err, empty),
    }
}

async fn fetch_player_log(
    state: &AppState,
    player_id: PlayerId,
    season: &Season,
) -> Result<Option<ResultTable>> {
    let resp = state.client.player_game_log(player_id, season).await?;
    Ok(resp
        .find("PlayerGameLog")
        .or_else(|| resp.first())
        .cloned())
}

pub async fn player_gamelog(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(q): Query<GameLogQuery>,
) -> Response {
    let empty = json!({ "playerId": player_id, "games": [] });
    let result = player_id
        .parse::<PlayerId>()
        .and_then(|id| season_or_default(&q.season, &state).map(|s| (id, s)));
    let (player_id, season) = match result {
        Ok(pair) => pair,
        Err(err) => return error_response(&err, empty),
    };
    let limit = q.last.unwrap_or(GAMELOG_DEFAULT_LIMIT);
    match fetch_player_log(&state, player_id, &season).await {
        Ok(table) => {
            let games = table
                .as_ref()
                .map(|t| player_game_lines(t, limit))
                .unwrap_or_default();
            Json(json!({ "playerId": player_id.as_i64(), "games": games })).into_response()
        }
        Err(err) => error_response(&err, empty),
    }
}

/// The roster team's abbreviation is the first token of the newest
/// matchup line ("BOS vs. NYK" → "BOS").
fn team_abbr_from_log(table: &ResultTable) -> Option<String> {
    let matchup = table.resolve(&["MATCHUP"]);
    let cell = table.rows.first().and_then(|row| table.text(row, matchup))?;
    cell.split_whitespace().next().map(str::to_string)
}

/// Real team totals for the player's team, or `None` to trigger the
/// league-average estimate.
async fn fetch_team_totals(
    state: &AppState,
    abbr: &str,
    season: &Season,
) -> Option<TeamSeasonTotals> {
    let resp = match state.client.league_team_totals(season).await {
        Ok(resp) => resp,
        Err(err) => {
            warn!(%err, "team totals fetch failed, estimating usage inputs");
            return None;
        }
    };
    let table = resp.team_stats_table()?;
    let abbr_col = table.resolve(&["TEAM_ABBREVIATION"]);
    let row = table
        .rows
        .iter()
        .find(|row| table.text(row, abbr_col).as_deref() == Some(abbr))?;
    TeamSeasonTotals::from_row(table, row)
}

pub async fn player_usage_rates(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Query(q): Query<SeasonQuery>,
) -> Response {
    let empty = json!({
        "playerId": player_id,
        "usg_pct": null, "ast_pct": null, "reb_pct": null, "tov_pct": null,
    });
    let result = player_id
        .parse::<PlayerId>()
        .and_then(|id| season_or_default(&q.season, &state).map(|s| (id, s)));
    let (player_id, season) = match result {
        Ok(pair) => pair,
        Err(err) => return error_response(&err, empty),
    };

    let log = match fetch_player_log(&state, player_id, &season).await {
        Ok(Some(table)) => table,
        Ok(None) => ResultTable::default(),
        Err(err) => return error_response(&err, empty),
    };

    let totals = PlayerSeasonTotals::from_game_log(&log);
    let team_totals = match team_abbr_from_log(&log) {
        Some(abbr) => fetch_team_totals(&state, &abbr, &season).await,
        None => None,
    };
    let rates = compute_usage_rates(&totals, team_totals.as_ref());

    let mut body = json!({
        "playerId": player_id.as_i64(),
        "season": season.as_str(),
    });
    if let (Value::Object(target), Ok(Value::Object(fields))) =
        (&mut body, serde_json::to_value(&rates))
    {
        for (k, v) in fields {
            target.insert(k, v);
        }
    }
    Json(body).into_response()
}

pub async fn refresh_differentials(State(state): State<AppState>) -> Response {
    let doc = build_differentials(&state.client, &state.season).await;
    match write_artifact(&state.data_dir, TEAM_DIFFERENTIALS_FILE, &doc) {
        Ok(_) => Json(doc).into_response(),
        Err(err) => error_response(&err, json!({ "teams": {} })),
    }
}
