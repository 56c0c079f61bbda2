//! Command dispatch.

pub mod generate;
pub mod serve;

use crate::cli::Command;
use crate::error::Result;

pub async fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Serve {
            port,
            season,
            data_dir,
            refresh_at,
        } => serve::run(port, season, data_dir, refresh_at).await,
        Command::Generate {
            artifact,
            season,
            data_dir,
        } => generate::run(artifact, season, &data_dir).await,
    }
}
