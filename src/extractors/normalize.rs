// src/extractors/normalize.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::models::Position;

// --- Lookup Tables (Lazy Static) ---
// Alias spellings seen across sheet vendors, mapped to the canonical code.
static TEAM_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("JAX", "JAC"),
        ("WSH", "WAS"),
        ("LA", "LAR"),
    ])
});

/// The 32 canonical franchise codes.
static CANONICAL_TEAMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN",
        "DET", "GB", "HOU", "IND", "JAC", "KC", "LAC", "LAR", "LV", "MIA",
        "MIN", "NE", "NO", "NYG", "NYJ", "PHI", "PIT", "SEA", "SF", "TB",
        "TEN", "WAS",
    ])
});

// --- Shared Regex Patterns (Lazy Static) ---
// Order matters in the alternation: "DST" cannot match the text "D/ST", so
// both spellings are listed.
pub static POS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(QB|RB|WR|TE|K|DST|D/ST)\b").expect("Failed to compile POS_RE")
});

pub static TEAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z]{2,3})\b").expect("Failed to compile TEAM_RE")
});

pub static BYE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Bye|BYE)\s*(\d{1,2})\b").expect("Failed to compile BYE_RE")
});

/// Canonicalizes a team token: strips trailing periods, uppercases, and
/// resolves known aliases. Unknown tokens pass through unchanged (assumed
/// already canonical). Pure and total — never fails.
pub fn normalize_team(token: &str) -> String {
    let tok = token.trim().trim_end_matches('.').to_uppercase();
    match TEAM_ALIASES.get(tok.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => tok,
    }
}

/// Whether `code` is one of the 32 canonical franchise codes. Callers must
/// pass an already-normalized token.
pub fn is_canonical_team(code: &str) -> bool {
    CANONICAL_TEAMS.contains(code)
}

/// Whether a raw token refers to a team at all, alias spellings included.
pub fn is_team_token(token: &str) -> bool {
    is_canonical_team(&normalize_team(token))
}

/// Maps a raw position token to the enum; "D/ST" folds into DST.
pub fn normalize_position(token: &str) -> Option<Position> {
    Position::from_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_codes() {
        assert_eq!(normalize_team("JAX"), "JAC");
        assert_eq!(normalize_team("WSH"), "WAS");
        assert_eq!(normalize_team("LA"), "LAR");
    }

    #[test]
    fn trailing_periods_and_case_are_cleaned() {
        assert_eq!(normalize_team("JAX."), "JAC");
        assert_eq!(normalize_team("jax"), "JAC");
        assert_eq!(normalize_team("gb."), "GB");
    }

    #[test]
    fn unknown_tokens_pass_through() {
        assert_eq!(normalize_team("DAL"), "DAL");
        assert_eq!(normalize_team("XYZ"), "XYZ");
    }

    #[test]
    fn normalization_is_idempotent() {
        for alias in ["JAX", "WSH", "LA", "DAL", "SF", "XYZ"] {
            let once = normalize_team(alias);
            assert_eq!(normalize_team(&once), once);
        }
    }

    #[test]
    fn canonical_set_covers_all_32_franchises() {
        assert!(is_canonical_team("JAC"));
        assert!(is_canonical_team("LV"));
        assert!(!is_canonical_team("JAX"));
        assert!(!is_canonical_team("XYZ"));
    }

    #[test]
    fn team_tokens_include_aliases() {
        assert!(is_team_token("JAX"));
        assert!(is_team_token("CIN"));
        assert!(!is_team_token("Chase"));
    }

    #[test]
    fn dst_spellings_normalize() {
        assert_eq!(normalize_position("D/ST"), Some(Position::DST));
        assert_eq!(normalize_position("DST"), Some(Position::DST));
        assert_eq!(normalize_position("QB"), Some(Position::QB));
        assert_eq!(normalize_position("FLEX"), None);
    }

    #[test]
    fn position_regex_anchors_on_word_boundaries() {
        assert!(POS_RE.is_match("Bijan Robinson | ATL | RB"));
        assert!(POS_RE.is_match("Bears D/ST"));
        // Substrings of longer words are not positions.
        assert!(!POS_RE.is_match("WRIGHT"));
        assert!(!POS_RE.is_match("workbook"));
    }

    #[test]
    fn bye_regex_accepts_both_spellings() {
        assert_eq!(BYE_RE.captures("Bye 5").unwrap()[1].to_string(), "5");
        assert_eq!(BYE_RE.captures("BYE12").unwrap()[1].to_string(), "12");
        assert!(BYE_RE.captures("Goodbye 5").is_none());
    }
}
