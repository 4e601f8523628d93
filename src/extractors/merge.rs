// src/extractors/merge.rs

// --- Imports ---
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::models::{MasterRecord, PlayerRecord, Position};

// --- Source Labels ---
// The primary sheet is the higher-confidence source; on conflicting fields
// its row wins.
pub const PRIMARY_LABEL: &str = "Top300";
pub const SECONDARY_LABEL: &str = "Beginner";

struct Tagged {
    record: PlayerRecord,
    label: &'static str,
    // 0 = primary, 1 = secondary; decides the base row within a group.
    priority: u8,
}

/// Merges two independently parsed player lists into one master list.
///
/// Identity across sheets is `(name, position)`. Within each identity group
/// the primary row is the base; missing fields are filled from the remaining
/// group members in priority order. The flat result is then ordered by rank
/// ascending (missing last), value descending, name ascending, and each row
/// gets a dense 1-based `overall_rank`.
pub fn merge(primary: Vec<PlayerRecord>, secondary: Vec<PlayerRecord>) -> Vec<MasterRecord> {
    let mut group_order: Vec<(String, Position)> = Vec::new();
    let mut groups: HashMap<(String, Position), Vec<Tagged>> = HashMap::new();

    let tagged = primary
        .into_iter()
        .map(|r| (r, PRIMARY_LABEL, 0u8))
        .chain(secondary.into_iter().map(|r| (r, SECONDARY_LABEL, 1u8)));
    for (record, label, priority) in tagged {
        let key = (record.name.clone(), record.position);
        let members = groups.entry(key.clone()).or_insert_with(|| {
            group_order.push(key);
            Vec::new()
        });
        members.push(Tagged {
            record,
            label,
            priority,
        });
    }

    let mut merged: Vec<MasterRecord> = group_order
        .iter()
        .map(|key| {
            let mut members = groups.remove(key).unwrap_or_default();
            members.sort_by_key(|t| t.priority);
            reduce_group(members)
        })
        .collect();

    merged.sort_by(final_order);
    for (i, row) in merged.iter_mut().enumerate() {
        row.overall_rank = (i + 1) as u32;
    }
    merged
}

/// Folds one identity group into a single row: the highest-priority member is
/// the base, and each still-missing field takes the first non-missing value
/// found among the remaining members.
fn reduce_group(members: Vec<Tagged>) -> MasterRecord {
    let source = members
        .iter()
        .map(|t| t.label)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(",");

    let mut iter = members.into_iter();
    let base = iter.next().expect("group is never empty").record;
    let rest: Vec<PlayerRecord> = iter.map(|t| t.record).collect();

    let team = base
        .team
        .or_else(|| rest.iter().find_map(|r| r.team.clone()));
    let bye_week = base.bye_week.or_else(|| rest.iter().find_map(|r| r.bye_week));
    let value = base.value.or_else(|| rest.iter().find_map(|r| r.value));
    let rank = base.rank.or_else(|| rest.iter().find_map(|r| r.rank));

    MasterRecord {
        overall_rank: 0, // assigned after the final sort
        rank,
        name: base.name,
        team,
        position: base.position,
        bye_week,
        value,
        source,
    }
}

// Rank is the strongest sheet-assigned priority signal; value is the next
// proxy; name guarantees a deterministic final tie-break.
fn final_order(a: &MasterRecord, b: &MasterRecord) -> Ordering {
    cmp_rank(a.rank, b.rank)
        .then_with(|| cmp_value_desc(a.value, b.value))
        .then_with(|| a.name.cmp(&b.name))
}

fn cmp_rank(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_value_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
