// src/advice/waiver.rs

// --- Imports ---
use std::collections::{HashMap, HashSet};

use crate::advice::{cmp_opt_desc, SHORTLIST};
use crate::league::projections::Projection;
use crate::models::Position;

/// A waiver candidate with its matchup score attached.
#[derive(Debug, Clone)]
pub struct WaiverCandidate {
    pub projection: Projection,
    pub matchup_score: f64,
}

/// Simple bye matrix for a roster, ordered by (bye, pos, player).
pub fn bye_conflicts(roster: &[Projection]) -> Vec<Projection> {
    let mut rows: Vec<Projection> = roster.to_vec();
    rows.sort_by(|a, b| {
        let ab = a.bye_week.map(u32::from);
        let bb = b.bye_week.map(u32::from);
        // Missing byes last.
        match (ab, bb) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a.pos.cmp(&b.pos))
        .then_with(|| a.player.cmp(&b.player))
    });
    rows
}

/// Free agents worth a claim: everyone not on the roster, optionally filtered
/// to one week, scored by opponent matchup when a defense-vs-position table
/// is supplied, ordered by projected points then matchup score.
pub fn waiver_candidates(
    projections: &[Projection],
    roster: &[Projection],
    dvp: Option<&HashMap<(String, Position), f64>>,
    week: Option<u32>,
) -> Vec<WaiverCandidate> {
    let on_team: HashSet<&str> = roster
        .iter()
        .filter(|p| p.is_on_team())
        .map(|p| p.player.as_str())
        .collect();

    let median = dvp.map(median_dvp).unwrap_or(0.0);
    let mut candidates: Vec<WaiverCandidate> = projections
        .iter()
        .filter(|p| !on_team.contains(p.player.as_str()))
        .filter(|p| week.map_or(true, |w| p.week == Some(w)))
        .map(|p| {
            let matchup_score = match (dvp, &p.opp) {
                // Unknown opponents get the table's median, not zero.
                (Some(table), Some(opp)) => *table.get(&(opp.clone(), p.pos)).unwrap_or(&median),
                (Some(_), None) => median,
                (None, _) => 0.0,
            };
            WaiverCandidate {
                projection: p.clone(),
                matchup_score,
            }
        })
        .collect();

    candidates.sort_by(|a, b| {
        cmp_opt_desc(a.projection.proj_points, b.projection.proj_points)
            .then_with(|| b.matchup_score.total_cmp(&a.matchup_score))
    });
    candidates.truncate(SHORTLIST);
    candidates
}

fn median_dvp(table: &HashMap<(String, Position), f64>) -> f64 {
    if table.is_empty() {
        return 0.0;
    }
    let mut values: Vec<f64> = table.values().copied().collect();
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proj(player: &str, pos: Position, opp: Option<&str>, week: Option<u32>, points: Option<f64>) -> Projection {
        Projection {
            player: player.to_string(),
            team: None,
            pos,
            opp: opp.map(|o| o.to_string()),
            week,
            proj_points: points,
            ecr: None,
            adp: None,
            bye_week: None,
            ros_points: None,
            on_team: None,
        }
    }

    #[test]
    fn rostered_players_are_excluded() {
        let projections = vec![
            proj("Mine", Position::WR, None, None, Some(15.0)),
            proj("Free", Position::WR, None, None, Some(10.0)),
        ];
        let roster = vec![proj("Mine", Position::WR, None, None, None)];
        let candidates = waiver_candidates(&projections, &roster, None, None);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].projection.player, "Free");
    }

    #[test]
    fn week_filter_applies_when_given() {
        let projections = vec![
            proj("W3", Position::WR, None, Some(3), Some(10.0)),
            proj("W4", Position::WR, None, Some(4), Some(20.0)),
        ];
        let candidates = waiver_candidates(&projections, &[], None, Some(3));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].projection.player, "W3");
    }

    #[test]
    fn matchup_score_comes_from_dvp_with_median_fill() {
        let projections = vec![
            proj("Soft", Position::WR, Some("DAL"), None, Some(10.0)),
            proj("Unknown", Position::WR, Some("ZZZ"), None, Some(10.0)),
        ];
        let dvp = HashMap::from([
            (("DAL".to_string(), Position::WR), 6.0),
            (("PHI".to_string(), Position::WR), 2.0),
        ]);
        let candidates = waiver_candidates(&projections, &[], Some(&dvp), None);
        // Equal projections, so the better matchup leads.
        assert_eq!(candidates[0].projection.player, "Soft");
        assert_eq!(candidates[0].matchup_score, 6.0);
        assert_eq!(candidates[1].matchup_score, 4.0); // median of 2 and 6
    }

    #[test]
    fn ordered_by_projection_first() {
        let projections = vec![
            proj("Low", Position::WR, None, None, Some(5.0)),
            proj("High", Position::WR, None, None, Some(18.0)),
        ];
        let candidates = waiver_candidates(&projections, &[], None, None);
        assert_eq!(candidates[0].projection.player, "High");
    }

    #[test]
    fn bye_matrix_sorts_by_bye_then_pos_then_name() {
        let mut a = proj("Zed", Position::WR, None, None, None);
        a.bye_week = Some(5);
        let mut b = proj("Abe", Position::QB, None, None, None);
        b.bye_week = Some(5);
        let c = proj("NoBye", Position::RB, None, None, None);
        let rows = bye_conflicts(&[a, b, c]);
        assert_eq!(rows[0].player, "Abe"); // QB sorts before WR
        assert_eq!(rows[1].player, "Zed");
        assert_eq!(rows[2].player, "NoBye");
    }
}
