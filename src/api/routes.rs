//! Route table for the JSON API.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::handlers;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/games", get(handlers::games))
        .route("/games/finals", get(handlers::game_finals))
        .route("/games/:game_id/boxscore", get(handlers::box_score))
        .route("/standings", get(handlers::standings))
        .route("/team-rankings", get(handlers::team_rankings))
        .route("/teams/:team_id/games", get(handlers::team_games))
        .route("/teams/:team_id/leaders", get(handlers::team_leaders))
        .route("/players/:player_id/gamelog", get(handlers::player_gamelog))
        .route(
            "/players/:player_id/usage-rates",
            get(handlers::player_usage_rates),
        )
        .route(
            "/team-differentials/refresh",
            post(handlers::refresh_differentials),
        )
        // The frontend is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
