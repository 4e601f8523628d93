// src/extractors/text.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::extractors::normalize::{
    is_canonical_team, is_team_token, normalize_team, BYE_RE, POS_RE, TEAM_RE,
};
use crate::models::{PlayerRecord, Position};

// --- Regex Patterns (Lazy Static) ---
// Primary structured grammar, anchored at line start: optional rank, name,
// team code, mandatory position, then optional bye marker and trailing value.
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*",
        r"(?:(?P<rank>\d{1,3})\s+)?",
        r"(?P<name>[A-Za-z][A-Za-z'\- ]*?)\s+",
        r"(?P<team>[A-Z]{2,3})\s+",
        r"(?P<pos>QB|RB|WR|TE|K|DST|D/ST)\b",
        r"(?:.*?\b(?:Bye|BYE)\s*(?P<bye>\d{1,2})\b)?",
        r"(?:.*?\b(?P<value>\d{1,3}(?:\.\d+)?))?",
        r"\s*$",
    ))
    .expect("Failed to compile LINE_RE")
});

// Numeric-looking token shape, decimals included.
static NUMERIC_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?$").expect("Failed to compile NUMERIC_TOKEN_RE"));

/// Fallback extractor over the document's plain text, line by line. Runs only
/// when table extraction yields nothing. Each line is tried against the
/// structured grammar first, then the loose token scan; lines matching
/// neither are dropped without error.
pub fn extract(text: &str, assume_has_value: bool) -> Vec<PlayerRecord> {
    let mut records = Vec::new();
    let mut seen: HashSet<(String, Option<String>, Position)> = HashSet::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = extract_structured(line, assume_has_value)
            .or_else(|| extract_loose(line, assume_has_value));
        if let Some(record) = record {
            if seen.insert(record.dedup_key()) {
                records.push(record);
            }
        }
    }
    records
}

fn extract_structured(line: &str, assume_has_value: bool) -> Option<PlayerRecord> {
    let caps = LINE_RE.captures(line)?;

    let position = Position::from_token(caps.name("pos")?.as_str())?;
    let name = caps.name("name")?.as_str().trim().to_string();
    if name.is_empty() {
        return None;
    }
    let team = normalize_team(caps.name("team")?.as_str());
    if !is_canonical_team(&team) {
        return None;
    }

    let rank = caps.name("rank").and_then(|m| m.as_str().parse::<u32>().ok());
    let bye_week = caps.name("bye").and_then(|m| m.as_str().parse::<u8>().ok());
    let value = if assume_has_value {
        caps.name("value")
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|v| *v > 0.0 && *v < 1000.0)
    } else {
        None
    };

    Some(PlayerRecord {
        rank,
        name,
        team: Some(team),
        position,
        bye_week,
        value,
    })
}

/// Loose token scan, tried only when the structured grammar fails but the
/// line still holds both a position token and a recognizable team token.
fn extract_loose(line: &str, assume_has_value: bool) -> Option<PlayerRecord> {
    let position = POS_RE
        .captures(line)
        .and_then(|c| Position::from_token(c.get(1)?.as_str()))?;

    // Unlike table mode, the first candidate that normalizes to a franchise
    // code is taken here.
    let mut team: Option<String> = None;
    for cap in TEAM_RE.captures_iter(line) {
        let candidate = normalize_team(&cap[1]);
        if is_canonical_team(&candidate) {
            team = Some(candidate);
            break;
        }
    }
    let team = team?;

    let tokens: Vec<&str> = line.split_whitespace().collect();

    let rank = tokens
        .first()
        .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit()))
        .and_then(|t| t.parse::<u32>().ok());

    // Whatever is left after stripping numerics, team tokens and keywords is
    // the name, in original order.
    let name_parts: Vec<&str> = tokens
        .iter()
        .filter(|t| !NUMERIC_TOKEN_RE.is_match(t))
        .filter(|t| !is_team_token(t))
        .filter(|t| !is_keyword(t))
        .copied()
        .collect();
    let mut name = name_parts.join(" ");

    let bye_week = BYE_RE
        .captures(line)
        .and_then(|c| c[1].parse::<u8>().ok());

    let mut value: Option<f64> = None;
    if assume_has_value {
        for token in tokens.iter().rev() {
            if !NUMERIC_TOKEN_RE.is_match(token) {
                continue;
            }
            if let Ok(v) = token.parse::<f64>() {
                if v > 0.0 && v < 1000.0 {
                    value = Some(v);
                    break;
                }
            }
        }
    }

    if name.is_empty() && position == Position::DST {
        name = format!("{team} DST");
    }
    if name.is_empty() {
        return None;
    }

    Some(PlayerRecord {
        rank,
        name,
        team: Some(team),
        position,
        bye_week,
        value,
    })
}

fn is_keyword(token: &str) -> bool {
    Position::from_token(token).is_some() || token == "Bye" || token == "BYE"
}
