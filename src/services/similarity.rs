use std::collections::HashSet;
use std::hash::Hash;

/// Jaccard index `|A ∩ B| / |A ∪ B|`.
///
/// Returns 0.0 when either set is empty; an empty (or private) collection has
/// nothing to compare against.
pub fn similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let common = a.intersection(b).count();
    let total = a.len() + b.len() - common;

    common as f64 / total as f64
}

/// Rounds a score to two decimals for display, halves to even like `{:.2}`
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}
