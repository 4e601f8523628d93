// src/advice/trade.rs

// --- Imports ---
use serde::Serialize;
use std::collections::HashMap;

use crate::advice::{cmp_opt_asc, cmp_opt_desc};
use crate::league::projections::Projection;
use crate::league::rules::LeagueRules;
use crate::models::Position;

/// A trade is called fair inside this VORP band.
const FAIR_BAND: f64 = 10.0;

/// A player's value over the positional replacement level.
#[derive(Debug, Clone)]
pub struct VorpScore {
    pub player: String,
    pub pos: Position,
    pub ros_points: f64,
    pub replacement: f64,
    pub vorp: f64,
}

/// The verdict on a proposed two-sided trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeVerdict {
    pub a_vorp: f64,
    pub b_vorp: f64,
    pub difference: f64,
    pub verdict: String,
}

/// Naive per-position replacement level: the rest-of-season points of the
/// player ranked at `starters per team × team count`. FLEX is ignored for the
/// baseline, which keeps the level conservative.
pub fn replacement_levels(ros: &[Projection], rules: &LeagueRules) -> HashMap<Position, f64> {
    let mut levels = HashMap::new();
    for (slot, count) in &rules.roster_slots {
        if slot == "FLEX" || slot == "BENCH" {
            continue;
        }
        let Some(pos) = Position::from_token(slot) else {
            continue;
        };
        let cap = (count * rules.num_teams) as usize;

        let mut pool: Vec<&Projection> = ros.iter().filter(|p| p.pos == pos).collect();
        if pool.is_empty() || cap == 0 {
            levels.insert(pos, 0.0);
            continue;
        }
        if pool.iter().any(|p| p.ecr.is_some()) {
            pool.sort_by(|a, b| cmp_opt_asc(a.ecr, b.ecr));
        } else {
            pool.sort_by(|a, b| cmp_opt_desc(a.ros_points, b.ros_points));
        }
        let idx = if pool.len() >= cap { cap - 1 } else { pool.len() - 1 };
        levels.insert(pos, pool[idx].ros_points.unwrap_or(0.0));
    }
    levels
}

/// Scores every player against the replacement level of their position.
pub fn vorp_scores(ros: &[Projection], rules: &LeagueRules) -> Vec<VorpScore> {
    let levels = replacement_levels(ros, rules);
    ros.iter()
        .map(|p| {
            let replacement = levels.get(&p.pos).copied().unwrap_or(0.0);
            let ros_points = p.ros_points.unwrap_or(0.0);
            VorpScore {
                player: p.player.clone(),
                pos: p.pos,
                ros_points,
                replacement,
                vorp: ros_points - replacement,
            }
        })
        .collect()
}

/// Sums VORP on each side and calls the trade. Names missing from the
/// rest-of-season table contribute nothing and are logged.
pub fn evaluate_trade(
    side_a: &[String],
    side_b: &[String],
    ros: &[Projection],
    rules: &LeagueRules,
) -> TradeVerdict {
    let scores = vorp_scores(ros, rules);
    let by_player: HashMap<&str, f64> = scores.iter().map(|s| (s.player.as_str(), s.vorp)).collect();

    let sum_side = |side: &[String]| -> f64 {
        side.iter()
            .map(|name| match by_player.get(name.as_str()) {
                Some(v) => *v,
                None => {
                    tracing::warn!("No rest-of-season row for '{}', counting 0", name);
                    0.0
                }
            })
            .sum()
    };

    let a_vorp = round1(sum_side(side_a));
    let b_vorp = round1(sum_side(side_b));
    let difference = round1(a_vorp - b_vorp);
    let verdict = if difference > FAIR_BAND {
        "Advantage A"
    } else if difference < -FAIR_BAND {
        "Advantage B"
    } else {
        "Fair"
    };

    TradeVerdict {
        a_vorp,
        b_vorp,
        difference,
        verdict: verdict.to_string(),
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proj(player: &str, pos: Position, ros: f64) -> Projection {
        Projection {
            player: player.to_string(),
            team: None,
            pos,
            opp: None,
            week: None,
            proj_points: None,
            ecr: None,
            adp: None,
            bye_week: None,
            ros_points: Some(ros),
            on_team: None,
        }
    }

    fn tiny_rules() -> LeagueRules {
        LeagueRules {
            num_teams: 2,
            roster_slots: std::collections::BTreeMap::from([
                ("QB".to_string(), 1),
                ("BENCH".to_string(), 2),
            ]),
            ..LeagueRules::default()
        }
    }

    #[test]
    fn replacement_is_points_of_last_startable_player() {
        // Two teams starting one QB each: replacement is QB2's points.
        let ros = vec![
            proj("QB1", Position::QB, 300.0),
            proj("QB2", Position::QB, 250.0),
            proj("QB3", Position::QB, 200.0),
        ];
        let levels = replacement_levels(&ros, &tiny_rules());
        assert_eq!(levels[&Position::QB], 250.0);
    }

    #[test]
    fn shallow_pool_uses_its_worst_player() {
        let ros = vec![proj("OnlyQB", Position::QB, 280.0)];
        let levels = replacement_levels(&ros, &tiny_rules());
        assert_eq!(levels[&Position::QB], 280.0);
    }

    #[test]
    fn vorp_is_points_over_replacement() {
        let ros = vec![
            proj("QB1", Position::QB, 300.0),
            proj("QB2", Position::QB, 250.0),
        ];
        let scores = vorp_scores(&ros, &tiny_rules());
        let qb1 = scores.iter().find(|s| s.player == "QB1").unwrap();
        assert_eq!(qb1.vorp, 50.0);
    }

    #[test]
    fn lopsided_trade_gets_called() {
        let ros = vec![
            proj("Stud", Position::QB, 300.0),
            proj("Scrub", Position::QB, 210.0),
            proj("Baseline", Position::QB, 200.0),
        ];
        let verdict = evaluate_trade(
            &["Stud".to_string()],
            &["Scrub".to_string()],
            &ros,
            &tiny_rules(),
        );
        assert_eq!(verdict.verdict, "Advantage A");
        assert_eq!(verdict.a_vorp, 90.0);
        assert_eq!(verdict.b_vorp, 0.0);
        assert_eq!(verdict.difference, 90.0);
    }

    #[test]
    fn close_trade_is_fair() {
        let ros = vec![
            proj("A1", Position::QB, 260.0),
            proj("B1", Position::QB, 255.0),
            proj("Baseline", Position::QB, 250.0),
        ];
        let verdict = evaluate_trade(
            &["A1".to_string()],
            &["B1".to_string()],
            &ros,
            &tiny_rules(),
        );
        assert_eq!(verdict.verdict, "Fair");
    }

    #[test]
    fn unknown_names_count_zero() {
        let ros = vec![proj("QB1", Position::QB, 300.0)];
        let verdict = evaluate_trade(&["Ghost".to_string()], &[], &ros, &tiny_rules());
        assert_eq!(verdict.a_vorp, 0.0);
        assert_eq!(verdict.verdict, "Fair");
    }
}
