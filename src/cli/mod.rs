//! CLI argument parsing and shared typed identifiers.

pub mod args;
pub mod types;

pub use args::{Artifact, Cli, Command};
pub use types::{GameId, PlayerId, Season, TeamId};
