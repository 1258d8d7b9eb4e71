//! Ranking score for fuzzy dictionary hits.
//!
//! A hit is scored against the index key it actually matched, with the
//! accumulated per-word edit distance as a penalty. A distance of zero is
//! never weighted below zero, so exact phrase matches always outrank fuzzy
//! ones of the same key length.

/// Weight a matched index key against the query phrase.
///
/// `edit_distance` is the total number of edits across all words of the
/// phrase. The result lies in `[0.0, 1.0]`; higher is better.
pub fn weigh(query: &str, matched_key: &str, edit_distance: usize) -> f64 {
    let span = query.chars().count().max(matched_key.chars().count());
    if span == 0 {
        return 0.0;
    }
    let penalty = edit_distance as f64 / span as f64;
    (1.0 - penalty).max(0.0)
}
