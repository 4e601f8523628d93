// src/storage/mod.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::MasterRecord;
use crate::utils::error::StorageError;

// This column order is the export contract; downstream consumers key on it.
const MASTER_COLUMNS: [&str; 8] = [
    "overall_rank",
    "rank",
    "name",
    "team",
    "pos",
    "bye",
    "value",
    "source",
];

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::Io)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Writes the merged master list as CSV in the canonical column layout.
    pub fn save_master_csv(
        &self,
        records: &[MasterRecord],
        filename: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);
        let mut writer = csv::Writer::from_path(&file_path)?;

        writer.write_record(MASTER_COLUMNS)?;
        for r in records {
            writer.write_record([
                r.overall_rank.to_string(),
                r.rank.map(|v| v.to_string()).unwrap_or_default(),
                r.name.clone(),
                r.team.clone().unwrap_or_default(),
                r.position.to_string(),
                r.bye_week.map(|v| v.to_string()).unwrap_or_default(),
                r.value.map(|v| v.to_string()).unwrap_or_default(),
                r.source.clone(),
            ])?;
        }
        writer.flush().map_err(StorageError::Io)?;

        tracing::info!("Saved master list to {}", file_path.display());
        Ok(file_path)
    }

    /// Saves metadata about a master-list export in JSON format
    pub fn save_master_metadata(
        &self,
        records: &[MasterRecord],
        sources: &[String],
        filename: &str,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);

        let metadata = serde_json::json!({
            "rows": records.len(),
            "sources": sources,
            "columns": MASTER_COLUMNS,
            "exported_at": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&file_path, metadata_str).map_err(StorageError::Io)?;

        tracing::info!("Saved export metadata to {}", file_path.display());
        Ok(file_path)
    }
}

/// Between-session scratch state: which players the user has marked as
/// drafted, and where the last roster upload lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueState {
    #[serde(default)]
    pub drafted: Vec<String>,
    #[serde(default)]
    pub roster_csv_path: String,
}

/// Default scratch location for league state snapshots.
pub fn default_state_dir() -> PathBuf {
    std::env::temp_dir().join("ff_helper_state")
}

fn state_path(dir: &Path, league_key: &str) -> PathBuf {
    dir.join(format!("{league_key}.json"))
}

pub fn save_league_state(
    dir: &Path,
    league_key: &str,
    state: &LeagueState,
) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(StorageError::Io)?;
    let raw = serde_json::to_string(state).map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(state_path(dir, league_key), raw).map_err(StorageError::Io)?;
    Ok(())
}

/// Loads the saved state for a league; a missing or malformed snapshot just
/// means a fresh session.
pub fn load_league_state(dir: &Path, league_key: &str) -> LeagueState {
    let path = state_path(dir, league_key);
    match fs::read_to_string(&path) {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Discarding malformed state snapshot {}: {}", path.display(), e);
            LeagueState::default()
        }),
        Err(_) => LeagueState::default(),
    }
}
