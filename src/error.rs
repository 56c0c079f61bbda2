//! Error types for the courtside service.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CourtsideError>;

#[derive(Error, Debug)]
pub enum CourtsideError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing required {table} stat columns {missing:?}; available columns: {available:?}")]
    MissingColumns {
        table: &'static str,
        missing: Vec<&'static str>,
        available: Vec<String>,
    },

    #[error("provider returned no result set named {name}")]
    MissingResultSet { name: &'static str },

    #[error("unknown team: {team}")]
    UnknownTeam { team: String },

    #[error("invalid season {season}; expected e.g. 2025-26")]
    InvalidSeason { season: String },

    #[error("invalid refresh time {value}; expected HH:MM")]
    InvalidRefreshTime { value: String },

    #[error("failed to parse numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
