//! Alias similarity scoring

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Similarity of two aliases in [0, 1].
///
/// Identical strings score 1.0. With `match_first_letter`, aliases starting
/// with different characters score 0.0. Otherwise the normalized InDel
/// similarity `1 - indel / (len(a) + len(b))` is computed with periods
/// removed, so `"J. Smith"` and `"J Smith"` count as the same spelling.
pub fn alias_similarity(left: &str, right: &str, match_first_letter: bool) -> f64 {
    if match_first_letter && left.chars().next() != right.chars().next() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }

    let left = left.replace('.', "");
    let right = right.replace('.', "");
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    indel::normalized_similarity(left.chars(), right.chars())
}

/// Best [`alias_similarity`] over all cross pairs of two alias sets.
///
/// Empty sets score 0.0.
pub fn similarity_ratio(
    left: &BTreeSet<String>,
    right: &BTreeSet<String>,
    match_first_letter: bool,
) -> f64 {
    let mut best: f64 = 0.0;
    for a in left {
        for b in right {
            let score = alias_similarity(a, b, match_first_letter);
            if score >= 1.0 {
                return 1.0;
            }
            best = best.max(score);
        }
    }
    best
}
