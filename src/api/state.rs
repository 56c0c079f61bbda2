//! Shared state for the HTTP surface.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::{TtlCache, TEAM_RANKINGS_TTL};
use crate::cli::types::Season;
use crate::nba::StatsClient;
use crate::stats::TeamRankings;

/// Cloned into every handler. The provider client is shared so all request
/// traffic funnels through one throttle gate; the rankings cache holds one
/// computed document per season.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<StatsClient>,
    pub rankings: Arc<Mutex<TtlCache<Season, TeamRankings>>>,
    pub data_dir: PathBuf,
    pub season: Season,
}

impl AppState {
    pub fn new(client: Arc<StatsClient>, data_dir: PathBuf, season: Season) -> Self {
        // A handful of seasons at most are ever queried.
        let capacity = NonZeroUsize::new(8).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            rankings: Arc::new(Mutex::new(TtlCache::new(capacity, TEAM_RANKINGS_TTL))),
            data_dir,
            season,
        }
    }
}
