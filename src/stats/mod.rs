//! Derived statistics: rankings, usage metrics, standings, differentials,
//! and game-level normalization.

pub mod differentials;
pub mod games;
pub mod rankings;
pub mod standings;
pub mod usage;

pub use rankings::{build_team_rankings, TeamRankings};
pub use usage::{compute_usage_rates, PlayerSeasonTotals, TeamSeasonTotals, UsageRates};
