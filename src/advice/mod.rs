// src/advice/mod.rs
pub mod draft;
pub mod lineup;
pub mod trade;
pub mod waiver;

use std::cmp::Ordering;

/// Recommendation lists are capped to a shortlist the user can actually scan.
pub const SHORTLIST: usize = 50;

// Missing values sort last in both directions.
pub(crate) fn cmp_opt_asc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn cmp_opt_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
