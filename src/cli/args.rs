//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::types::Season;
use crate::refresher::DEFAULT_REFRESH_TIME;

#[derive(Debug, Parser)]
#[command(name = "courtside", version, about = "NBA stats normalization and ranking service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API and refresh artifacts nightly.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8000)]
        port: u16,

        /// Season to serve by default, e.g. 2025-26.
        #[arg(long, default_value_t = Season::default())]
        season: Season,

        /// Directory for generated JSON artifacts.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Local wall-clock time (HH:MM) of the nightly refresh.
        #[arg(long, default_value = DEFAULT_REFRESH_TIME)]
        refresh_at: String,
    },

    /// Generate JSON artifacts once and exit.
    Generate {
        /// Which artifact to generate.
        #[arg(value_enum, default_value_t = Artifact::All)]
        artifact: Artifact,

        /// Season to generate for, e.g. 2025-26.
        #[arg(long, default_value_t = Season::default())]
        season: Season,

        /// Directory for generated JSON artifacts.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Artifact {
    Rankings,
    Differentials,
    TeamStats,
    All,
}
