// src/extractors/table.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::extractors::normalize::{is_canonical_team, normalize_team, BYE_RE, POS_RE, TEAM_RE};
use crate::models::{PlayerRecord, Position};

// --- Constants ---
// Tables with fewer rows are captions or legends, not player tables.
const MIN_TABLE_ROWS: usize = 3;

// Non-negative decimal, the only shape accepted for a value cell.
static NUMERIC_CELL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("Failed to compile NUMERIC_CELL_RE"));

/// Converts already-segmented grid tables into player records.
///
/// Each table is an ordered sequence of rows, each row an ordered sequence of
/// raw cell strings. Rows that fail the heuristics are expected noise
/// (sub-headers, separators, page furniture) and are dropped silently.
pub fn extract(tables: &[Vec<Vec<String>>], assume_has_value: bool) -> Vec<PlayerRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<(String, Option<String>, Position)> = HashSet::new();

    for table in tables {
        if table.len() < MIN_TABLE_ROWS {
            tracing::trace!("Skipping table with {} rows", table.len());
            continue;
        }
        for row in table {
            if let Some(record) = extract_row(row, assume_has_value) {
                // First occurrence wins.
                if seen.insert(record.dedup_key()) {
                    records.push(record);
                }
            }
        }
    }
    records
}

fn extract_row(cells: &[String], assume_has_value: bool) -> Option<PlayerRecord> {
    let line = cells.join(" | ");

    // A position token is the mandatory anchor; rows without one are noise.
    let position = POS_RE
        .captures(&line)
        .and_then(|c| Position::from_token(c.get(1)?.as_str()))?;

    // Rank: first purely-numeric cell, taken verbatim. A cell that overflows
    // the integer type is left null rather than failing the row.
    let rank = cells
        .iter()
        .find(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_digit()))
        .and_then(|c| c.parse::<u32>().ok());

    // Team codes in these sheets typically sit adjacent to, and after, the
    // player name, so the last candidate that normalizes to a real franchise
    // code wins. Known misattribution risk on ambiguous rows; kept as-is.
    let mut team: Option<String> = None;
    for cap in TEAM_RE.captures_iter(&line) {
        let candidate = normalize_team(&cap[1]);
        if is_canonical_team(&candidate) {
            team = Some(candidate);
        }
    }

    let bye_week = BYE_RE
        .captures(&line)
        .and_then(|c| c[1].parse::<u8>().ok());

    // Name: first cell that is not numeric, holds no position or bye token,
    // and has at least two words. Single-word cells are stray tokens.
    let mut name: Option<String> = None;
    for cell in cells {
        if cell.is_empty() || cell.chars().all(|ch| ch.is_ascii_digit()) {
            continue;
        }
        if POS_RE.is_match(cell) {
            continue;
        }
        if cell.contains("Bye") || cell.contains("BYE") {
            continue;
        }
        if cell.split_whitespace().count() >= 2 {
            name = Some(cell.clone());
            break;
        }
    }

    // Value: scanned from the end of the row, gated on the caller's flag.
    // The (0, 1000) bound rejects spurious numeric matches.
    let mut value: Option<f64> = None;
    if assume_has_value {
        for cell in cells.iter().rev() {
            if !NUMERIC_CELL_RE.is_match(cell) {
                continue;
            }
            if let Ok(v) = cell.parse::<f64>() {
                if v > 0.0 && v < 1000.0 {
                    value = Some(v);
                    break;
                }
            }
        }
    }

    // Some sheets list defenses by team alone.
    if name.is_none() && position == Position::DST {
        if let Some(t) = &team {
            name = Some(format!("{t} DST"));
        }
    }

    let name = name?;
    team.as_ref()?;
    Some(PlayerRecord {
        rank,
        name,
        team,
        position,
        bye_week,
        value,
    })
}
