//! # courtside
//!
//! NBA statistics republishing service: fetches tabular result sets from the
//! league's stats provider, normalizes them through column resolution,
//! computes league-wide team rankings and advanced player usage metrics, and
//! republishes everything as JSON — over an HTTP API and as static artifacts
//! regenerated nightly.
//!
//! Module map:
//! - [`nba`]: provider client, result-set tables, wire types, team directory
//! - [`stats`]: rankings, usage rates, standings, differentials, game data
//! - [`api`]: axum router, handlers, shared state
//! - [`cache`] / [`artifacts`] / [`refresher`]: TTL cache, JSON files, and
//!   the nightly regeneration task
//! - [`cli`] / [`commands`]: argument parsing and command entry points

pub mod api;
pub mod artifacts;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod error;
pub mod nba;
pub mod refresher;
pub mod stats;

pub use cli::types::{GameId, PlayerId, Season, TeamId};
pub use error::{CourtsideError, Result};
