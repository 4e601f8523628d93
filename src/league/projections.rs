// src/league/projections.rs

// --- Imports ---
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::models::Position;
use crate::utils::error::StorageError;

/// One row of an already-clean projection table. Column headers from the
/// common sheet vendors are aliased onto the canonical names used downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    #[serde(alias = "Player")]
    pub player: String,
    #[serde(alias = "Team", default)]
    pub team: Option<String>,
    #[serde(alias = "Pos")]
    pub pos: Position,
    #[serde(alias = "Opp", default)]
    pub opp: Option<String>,
    #[serde(alias = "Week", default)]
    pub week: Option<u32>,
    #[serde(alias = "Proj", default)]
    pub proj_points: Option<f64>,
    #[serde(alias = "ECR", default)]
    pub ecr: Option<f64>,
    #[serde(alias = "ADP", default)]
    pub adp: Option<f64>,
    #[serde(alias = "Bye", default)]
    pub bye_week: Option<u8>,
    #[serde(default)]
    pub ros_points: Option<f64>,
    #[serde(default)]
    pub on_team: Option<bool>,
}

impl Projection {
    /// Roster files mark membership explicitly; plain projection tables
    /// default to "on team" so roster CSVs can omit the column.
    pub fn is_on_team(&self) -> bool {
        self.on_team.unwrap_or(true)
    }
}

/// One row of a defense-vs-position table.
#[derive(Debug, Clone, Deserialize)]
pub struct DvpRow {
    #[serde(alias = "Team")]
    pub team: String,
    #[serde(alias = "Pos")]
    pub pos: Position,
    #[serde(alias = "DvP")]
    pub dvp: f64,
}

/// Loads a projection CSV. Malformed rows are logged and skipped rather than
/// failing the whole table.
pub fn load_projections(path: &Path) -> Result<Vec<Projection>, StorageError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize::<Projection>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => tracing::warn!("Skipping malformed projection row: {}", e),
        }
    }
    tracing::debug!("Loaded {} projection rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Tries `path` first, then `data_dir/default_name`, then gives up with an
/// empty table — mirrors how optional uploads degrade to bundled defaults.
pub fn load_projections_or_default(
    path: Option<&Path>,
    data_dir: &Path,
    default_name: &str,
) -> Vec<Projection> {
    if let Some(p) = path {
        if p.exists() {
            if let Ok(rows) = load_projections(p) {
                return rows;
            }
        }
    }
    let fallback = data_dir.join(default_name);
    if fallback.exists() {
        if let Ok(rows) = load_projections(&fallback) {
            return rows;
        }
    }
    tracing::warn!("No projection table found (wanted {:?} or {})", path, fallback.display());
    Vec::new()
}

/// Loads a defense-vs-position CSV keyed by `(team, pos)`.
pub fn load_dvp(path: &Path) -> Result<HashMap<(String, Position), f64>, StorageError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut map = HashMap::new();
    for result in reader.deserialize::<DvpRow>() {
        match result {
            Ok(row) => {
                map.insert((row.team, row.pos), row.dvp);
            }
            Err(e) => tracing::warn!("Skipping malformed DvP row: {}", e),
        }
    }
    Ok(map)
}
