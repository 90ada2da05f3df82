//! Ordering and truncation of ranked results.
//!
//! Results are ordered by score (descending), then by their index in the
//! input (ascending). Indices are unique within one call, so the order is
//! total and repeated calls produce the same sequence.

use std::cmp::Ordering;

use crate::rank::MatchResult;

/// Two-level comparator for ranked results.
///
/// 1. **Higher score wins.** Scores are compared with [`f64::total_cmp`],
///    so even NaN produced by unvalidated weights orders consistently.
/// 2. **Earlier input wins.** Equal scores keep the caller's order.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use tasksift::{MatchResult, compare_results};
///
/// let items = ["alpha", "beta"];
/// let a = MatchResult { item: &items[0], index: 0, score: 2.0, key_index: 0, matched_value: "alpha", positions: vec![] };
/// let b = MatchResult { item: &items[1], index: 1, score: 3.0, key_index: 0, matched_value: "beta", positions: vec![] };
///
/// // `b` scores higher, so it sorts first.
/// assert_eq!(compare_results(&a, &b), Ordering::Greater);
/// ```
pub fn compare_results<T>(a: &MatchResult<'_, T>, b: &MatchResult<'_, T>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

/// Order `results` with [`compare_results`] and keep at most `limit`.
///
/// When a limit cuts the list, the best `limit` results are selected over
/// the whole list first and only those are sorted.
pub(crate) fn order_results<T>(results: &mut Vec<MatchResult<'_, T>>, limit: Option<usize>) {
    if let Some(limit) = limit {
        if limit == 0 {
            results.clear();
            return;
        }
        if limit < results.len() {
            results.select_nth_unstable_by(limit - 1, compare_results);
            results.truncate(limit);
        }
    }
    results.sort_by(compare_results);
}
