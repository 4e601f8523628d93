// src/advice/lineup.rs

// --- Imports ---
use std::collections::{BTreeMap, HashSet};

use crate::advice::cmp_opt_desc;
use crate::league::projections::Projection;
use crate::league::rules::LeagueRules;
use crate::models::Position;

/// One starting-lineup slot and the player assigned to it.
#[derive(Debug, Clone)]
pub struct SlotAssignment {
    pub slot: String,
    pub projection: Projection,
}

/// Greedy slot fill: fixed positions first by projected points, then FLEX
/// from the flex-eligible positions; each player used at most once. BENCH is
/// never filled.
pub fn fill_slots(
    pool: &[Projection],
    slots: &BTreeMap<String, u32>,
    flex_eligible: &[Position],
) -> Vec<SlotAssignment> {
    let mut assignments = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    let mut ranked: Vec<&Projection> = pool.iter().collect();
    ranked.sort_by(|a, b| cmp_opt_desc(a.proj_points, b.proj_points));

    for (slot, count) in slots {
        if slot == "FLEX" || slot == "BENCH" {
            continue;
        }
        let Some(pos) = Position::from_token(slot) else {
            tracing::warn!("Ignoring unknown roster slot '{}'", slot);
            continue;
        };
        for _ in 0..*count {
            let pick = ranked
                .iter()
                .find(|p| p.pos == pos && !used.contains(&p.player));
            if let Some(p) = pick {
                used.insert(p.player.clone());
                assignments.push(SlotAssignment {
                    slot: slot.clone(),
                    projection: (*p).clone(),
                });
            }
        }
    }

    let flex_count = slots.get("FLEX").copied().unwrap_or(0);
    for _ in 0..flex_count {
        let pick = ranked
            .iter()
            .find(|p| flex_eligible.contains(&p.pos) && !used.contains(&p.player));
        if let Some(p) = pick {
            used.insert(p.player.clone());
            assignments.push(SlotAssignment {
                slot: "FLEX".to_string(),
                projection: (*p).clone(),
            });
        }
    }
    assignments
}

/// Builds the best starting lineup from the roster's projection rows.
pub fn optimize_lineup(
    roster: &[Projection],
    projections: &[Projection],
    rules: &LeagueRules,
) -> Vec<SlotAssignment> {
    let on_team: HashSet<&str> = roster
        .iter()
        .filter(|p| p.is_on_team())
        .map(|p| p.player.as_str())
        .collect();
    let pool: Vec<Projection> = projections
        .iter()
        .filter(|p| on_team.contains(p.player.as_str()))
        .cloned()
        .collect();
    fill_slots(&pool, &rules.roster_slots, &rules.flex_eligible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proj(player: &str, pos: Position, points: f64) -> Projection {
        Projection {
            player: player.to_string(),
            team: None,
            pos,
            opp: None,
            week: None,
            proj_points: Some(points),
            ecr: None,
            adp: None,
            bye_week: None,
            ros_points: None,
            on_team: None,
        }
    }

    fn slots(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn fixed_slots_take_best_by_points() {
        let pool = vec![
            proj("QB1", Position::QB, 22.0),
            proj("QB2", Position::QB, 18.0),
            proj("RB1", Position::RB, 16.0),
        ];
        let picks = fill_slots(&pool, &slots(&[("QB", 1), ("RB", 1)]), &[]);
        assert_eq!(picks.len(), 2);
        assert!(picks
            .iter()
            .any(|a| a.slot == "QB" && a.projection.player == "QB1"));
        assert!(picks
            .iter()
            .any(|a| a.slot == "RB" && a.projection.player == "RB1"));
    }

    #[test]
    fn flex_takes_best_remaining_eligible() {
        let pool = vec![
            proj("RB1", Position::RB, 16.0),
            proj("RB2", Position::RB, 14.0),
            proj("WR1", Position::WR, 15.0),
            proj("TE1", Position::TE, 9.0),
        ];
        let picks = fill_slots(
            &pool,
            &slots(&[("RB", 1), ("WR", 1), ("FLEX", 1)]),
            &[Position::RB, Position::WR, Position::TE],
        );
        let flex = picks.iter().find(|a| a.slot == "FLEX").unwrap();
        // RB1 and WR1 are taken by fixed slots; RB2 beats TE1.
        assert_eq!(flex.projection.player, "RB2");
    }

    #[test]
    fn players_are_used_at_most_once() {
        let pool = vec![proj("RB1", Position::RB, 16.0)];
        let picks = fill_slots(
            &pool,
            &slots(&[("RB", 2), ("FLEX", 1)]),
            &[Position::RB],
        );
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn bench_and_unknown_slots_are_ignored() {
        let pool = vec![proj("RB1", Position::RB, 16.0)];
        let picks = fill_slots(&pool, &slots(&[("RB", 1), ("BENCH", 6), ("IR", 2)]), &[]);
        assert_eq!(picks.len(), 1);
    }

    #[test]
    fn lineup_only_considers_rostered_players() {
        let roster = vec![proj("Mine", Position::QB, 0.0)];
        let projections = vec![
            proj("Mine", Position::QB, 17.0),
            proj("NotMine", Position::QB, 25.0),
        ];
        let rules = LeagueRules::default();
        let picks = optimize_lineup(&roster, &projections, &rules);
        let qb = picks.iter().find(|a| a.slot == "QB").unwrap();
        assert_eq!(qb.projection.player, "Mine");
    }
}
