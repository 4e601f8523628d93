// src/league/rules.rs

// --- Imports ---
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::models::Position;
use crate::utils::error::RulesError;

/// Scoring settings of a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoring {
    #[serde(default = "default_ppr")]
    pub ppr: f64,
    #[serde(default = "default_pass_td")]
    pub pass_td: f64,
    #[serde(default = "default_rush_td")]
    pub rush_td: f64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            ppr: default_ppr(),
            pass_td: default_pass_td(),
            rush_td: default_rush_td(),
        }
    }
}

/// One league's configuration, loaded from a JSON rules file. Slot keys are
/// position codes plus the pseudo-slots "FLEX" and "BENCH".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueRules {
    #[serde(default = "default_league_name")]
    pub league_name: String,
    #[serde(default = "default_num_teams")]
    pub num_teams: u32,
    #[serde(default)]
    pub scoring: Scoring,
    #[serde(default = "default_roster_slots")]
    pub roster_slots: BTreeMap<String, u32>,
    #[serde(default = "default_flex_eligible")]
    pub flex_eligible: Vec<Position>,
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self {
            league_name: default_league_name(),
            num_teams: default_num_teams(),
            scoring: Scoring::default(),
            roster_slots: default_roster_slots(),
            flex_eligible: default_flex_eligible(),
        }
    }
}

fn default_ppr() -> f64 {
    1.0
}

fn default_pass_td() -> f64 {
    4.0
}

fn default_rush_td() -> f64 {
    6.0
}

fn default_league_name() -> String {
    "My League".to_string()
}

fn default_num_teams() -> u32 {
    10
}

fn default_roster_slots() -> BTreeMap<String, u32> {
    BTreeMap::from([
        ("QB".to_string(), 1),
        ("RB".to_string(), 2),
        ("WR".to_string(), 2),
        ("TE".to_string(), 1),
        ("FLEX".to_string(), 1),
        ("DST".to_string(), 1),
        ("K".to_string(), 1),
        ("BENCH".to_string(), 6),
    ])
}

fn default_flex_eligible() -> Vec<Position> {
    vec![Position::RB, Position::WR, Position::TE]
}

/// Loads a single league rules file.
pub fn load_rules(path: &Path) -> Result<LeagueRules, RulesError> {
    let raw = fs::read_to_string(path)?;
    let rules: LeagueRules = serde_json::from_str(&raw)?;
    tracing::debug!("Loaded league rules '{}' from {}", rules.league_name, path.display());
    Ok(rules)
}

/// Loads every `*.json` rules file in a directory, keyed by file stem.
pub fn load_rules_dir(dir: &Path) -> Result<BTreeMap<String, LeagueRules>, RulesError> {
    let mut leagues = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(s) => s.to_string(),
            None => continue,
        };
        match load_rules(&path) {
            Ok(rules) => {
                leagues.insert(stem, rules);
            }
            Err(e) => tracing::warn!("Skipping unreadable rules file {}: {}", path.display(), e),
        }
    }
    if leagues.is_empty() {
        return Err(RulesError::Empty(dir.display().to_string()));
    }
    Ok(leagues)
}
