// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Roster positions recognized by the extraction pipeline. The source token
/// "D/ST" is folded into `DST` during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    #[serde(alias = "D/ST")]
    DST,
}

impl Position {
    /// Maps a raw sheet token to a position. Tokens outside the closed set
    /// are never treated as a position.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DST" | "D/ST" => Some(Position::DST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DST => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One player row as extracted from a single cheat sheet.
///
/// Extraction never emits a record without a name, position and team, but
/// `team` stays optional so records produced elsewhere (or hand-built inputs
/// to the reconciler) can have the field filled in during merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub rank: Option<u32>,
    pub name: String,
    pub team: Option<String>,
    pub position: Position,
    pub bye_week: Option<u8>,
    pub value: Option<f64>,
}

impl PlayerRecord {
    /// Dedup identity within a single extraction pass.
    pub fn dedup_key(&self) -> (String, Option<String>, Position) {
        (self.name.clone(), self.team.clone(), self.position)
    }
}

/// One row of the merged master list. Identity across sheets is
/// `(name, position)` — team is deliberately not part of the merge key, since
/// minor team disagreement between sheets still refers to one real player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterRecord {
    pub overall_rank: u32,
    pub rank: Option<u32>,
    pub name: String,
    pub team: Option<String>,
    pub position: Position,
    pub bye_week: Option<u8>,
    pub value: Option<f64>,
    /// Comma-joined, sorted, deduplicated labels of the contributing sheets.
    pub source: String,
}
