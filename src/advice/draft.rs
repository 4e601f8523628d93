// src/advice/draft.rs

// --- Imports ---
use std::collections::HashSet;

use crate::advice::{cmp_opt_asc, cmp_opt_desc, SHORTLIST};
use crate::league::projections::Projection;
use crate::models::Position;

/// Best available players: everyone not yet drafted, optionally filtered by
/// position, ordered by ECR when the table carries one and by projected
/// points otherwise.
pub fn best_available(
    projections: &[Projection],
    drafted: &[String],
    position_filter: Option<Position>,
) -> Vec<Projection> {
    let drafted: HashSet<&str> = drafted.iter().map(String::as_str).collect();
    let mut pool: Vec<Projection> = projections
        .iter()
        .filter(|p| !drafted.contains(p.player.as_str()))
        .filter(|p| position_filter.map_or(true, |pos| p.pos == pos))
        .cloned()
        .collect();

    if pool.iter().any(|p| p.ecr.is_some()) {
        pool.sort_by(|a, b| cmp_opt_asc(a.ecr, b.ecr));
    } else {
        pool.sort_by(|a, b| cmp_opt_desc(a.proj_points, b.proj_points));
    }
    pool.truncate(SHORTLIST);
    pool
}
