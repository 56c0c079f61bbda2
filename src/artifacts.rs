//! Static JSON artifacts under the data directory.
//!
//! Each document is written wholesale: serialize, create parents, replace
//! the file. Readers only ever see a complete previous or current version
//! of the content, never a partial merge.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub const TEAM_RANKINGS_FILE: &str = "team_rankings.json";
pub const TEAM_DIFFERENTIALS_FILE: &str = "team_differentials.json";
pub const TEAM_STATS_FILE: &str = "team_stats.json";

pub fn artifact_path(data_dir: &Path, file: &str) -> PathBuf {
    data_dir.join(file)
}

/// Pretty-print `document` to `data_dir/file`, creating parents on demand.
pub fn write_artifact<T: Serialize>(data_dir: &Path, file: &str, document: &T) -> Result<PathBuf> {
    let path = artifact_path(data_dir, file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(document)?;
    fs::write(&path, body)?;
    Ok(path)
}

/// Read an artifact back; `Ok(None)` when it has never been generated.
pub fn read_artifact<T: DeserializeOwned>(data_dir: &Path, file: &str) -> Result<Option<T>> {
    let path = artifact_path(data_dir, file);
    if !path.exists() {
        return Ok(None);
    }
    let body = fs::read_to_string(&path)?;
    Ok(Some(serde_json::from_str(&body)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn writes_create_parents_and_overwrite_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data").join("rankings");

        let mut doc = BTreeMap::new();
        doc.insert("BOS".to_string(), 1u32);
        write_artifact(&data_dir, TEAM_RANKINGS_FILE, &doc).unwrap();

        doc.insert("NYK".to_string(), 2);
        doc.insert("BOS".to_string(), 3);
        write_artifact(&data_dir, TEAM_RANKINGS_FILE, &doc).unwrap();

        let read: BTreeMap<String, u32> = read_artifact(&data_dir, TEAM_RANKINGS_FILE)
            .unwrap()
            .unwrap();
        assert_eq!(read, doc);
    }

    #[test]
    fn missing_artifact_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let read: Option<BTreeMap<String, u32>> =
            read_artifact(dir.path(), TEAM_STATS_FILE).unwrap();
        assert!(read.is_none());
    }
}
