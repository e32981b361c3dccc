use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Sparse cross-domain mapping entry: a normalized key in one domain feeds a
/// weighted contribution into another domain's key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossMapEntry {
    pub from_key: String,
    pub to_key: String,
    pub weight: f64,
}

/// Rescale every value linearly so the maximum entry maps to `target_max`.
///
/// Empty input yields empty output; the maximum is treated as at least 1 to
/// guard the division.
pub fn normalize_totals(map: &BTreeMap<String, f64>, target_max: f64) -> BTreeMap<String, f64> {
    if map.is_empty() {
        return BTreeMap::new();
    }

    let max = map
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1.0);

    map.iter()
        .map(|(key, value)| (key.clone(), value / max * target_max))
        .collect()
}

/// Project normalized values through the sparse cross matrix.
///
/// Entries with non-positive weight are skipped; outputs are rounded then
/// clamped into `0..=100`.
pub fn cross_map(
    normalized: &BTreeMap<String, f64>,
    entries: &[CrossMapEntry],
) -> BTreeMap<String, i64> {
    let mut accumulated: BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        if entry.weight <= 0.0 {
            continue;
        }
        if let Some(value) = normalized.get(&entry.from_key) {
            *accumulated.entry(entry.to_key.clone()).or_insert(0.0) += value * entry.weight;
        }
    }

    accumulated
        .into_iter()
        .map(|(key, value)| (key, value.round().clamp(0.0, 100.0) as i64))
        .collect()
}

/// Blend two score maps over the union of their keys.
///
/// Weights are clamped to `[0, 1]` independently; they are not required to
/// sum to 1. Each blended value is clamped into `0..=100` then rounded.
pub fn weighted_blend(
    base: &BTreeMap<String, f64>,
    overlay: &BTreeMap<String, f64>,
    w_base: f64,
    w_overlay: f64,
) -> BTreeMap<String, i64> {
    let w_base = w_base.clamp(0.0, 1.0);
    let w_overlay = w_overlay.clamp(0.0, 1.0);

    let mut keys: BTreeSet<&String> = base.keys().collect();
    keys.extend(overlay.keys());

    keys.into_iter()
        .map(|key| {
            let value = base.get(key).copied().unwrap_or(0.0) * w_base
                + overlay.get(key).copied().unwrap_or(0.0) * w_overlay;
            (key.clone(), value.clamp(0.0, 100.0).round() as i64)
        })
        .collect()
}

/// Top `n` entries by descending score.
///
/// The sort is stable, so ties keep the map's key iteration order, which for
/// a `BTreeMap` is lexicographic and therefore deterministic.
pub fn top_n<V>(map: &BTreeMap<String, V>, n: usize) -> Vec<(String, V)>
where
    V: Copy + PartialOrd,
{
    let mut entries: Vec<(String, V)> = map.iter().map(|(key, value)| (key.clone(), *value)).collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    entries.truncate(n);
    entries
}
