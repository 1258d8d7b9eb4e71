//! Levenshtein distance with early cut-off, used by the fuzzy backend.

use std::cmp::min;

/// Levenshtein distance bounded by a threshold: the minimum number of
/// single-character insertions, deletions, or substitutions required to
/// turn one string into the other, if it does not exceed `threshold`.
///
/// Returns `None` as soon as the distance provably exceeds `threshold`,
/// which keeps vocabulary scans cheap when the bound is small.
pub fn distance_within(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.len().abs_diff(b.len()) > threshold {
        return None;
    }
    if a.is_empty() {
        return (b.len() <= threshold).then_some(b.len());
    }
    if b.is_empty() {
        return (a.len() <= threshold).then_some(a.len());
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            min_in_row = min(min_in_row, curr_row[j + 1]);
        }
        if min_in_row > threshold {
            return None;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let d = prev_row[b.len()];
    (d <= threshold).then_some(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_within_threshold() {
        assert_eq!(distance_within("gates", "gates", 1), Some(0));
        assert_eq!(distance_within("gates", "gate", 1), Some(1));
        assert_eq!(distance_within("obama", "osama", 1), Some(1));
        assert_eq!(distance_within("gates", "ga", 1), None);
        assert_eq!(distance_within("birthplace", "birthplaces", 1), Some(1));
    }

    #[test]
    fn test_distance_within_empty_operands() {
        assert_eq!(distance_within("", "", 1), Some(0));
        assert_eq!(distance_within("", "a", 1), Some(1));
        assert_eq!(distance_within("", "abc", 1), None);
        assert_eq!(distance_within("abc", "", 3), Some(3));
    }

    #[test]
    fn test_distance_within_unicode() {
        assert_eq!(distance_within("münchen", "munchen", 1), Some(1));
    }
}
