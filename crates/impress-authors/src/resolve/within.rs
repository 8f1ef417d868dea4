//! Stage B: registry authors absorb their free-text aliases

use std::collections::BTreeSet;

use tracing::debug;

use super::groups::{collapse_groups, match_edge, merge_groups, MatchEdge};
use super::ResolutionState;
use crate::report::MergeStatistics;

/// For every registry author of a publication, pair it with the most similar
/// free-text author of the same publication.
///
/// Ties keep the smallest id. When the registry author is itself among the
/// free-text authors (an already resolved state) it wins with 1.0 and no
/// edge is recorded.
pub fn within_publication_edges(state: &ResolutionState, threshold: f64) -> BTreeSet<MatchEdge> {
    let mut edges = BTreeSet::new();

    for entry in state.publications.values() {
        for processed_id in entry.processed.keys() {
            let Some(author) = state.authors.get(processed_id) else {
                continue;
            };

            let mut best: Option<(&str, f64)> = None;
            for raw_id in &entry.raw {
                let Some(candidate) = state.authors.get(raw_id) else {
                    continue;
                };
                let score = author.similarity_ratio(candidate, false);
                if best.map_or(true, |(_, best_score)| score > best_score) {
                    best = Some((raw_id.as_str(), score));
                }
            }

            if let Some((raw_id, score)) = best {
                if score > threshold && raw_id != processed_id {
                    edges.insert(match_edge(processed_id, raw_id));
                }
            }
        }
    }

    edges
}

/// Run Stage B and return the next state
pub fn merge_within_publications(
    state: &ResolutionState,
    threshold: f64,
    stats: &mut MergeStatistics,
) -> ResolutionState {
    let edges = within_publication_edges(state, threshold);
    let groups = merge_groups(&edges);
    let (next, outcome) = collapse_groups(state, &groups);

    stats.merged_within_publication += outcome.merged;
    stats.refused_within_publication += outcome.refused;
    debug!(
        edges = edges.len(),
        groups = groups.len(),
        merged = outcome.merged,
        refused = outcome.refused,
        "Within-publication merge"
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::author::Author;
    use crate::resolve::PublicationAuthors;

    fn state(authors: Vec<Author>, processed: &[&str], raw: &[&str]) -> ResolutionState {
        let mut state = ResolutionState::default();
        for author in authors {
            state.authors.insert(author.id.clone(), author);
        }
        let entry = PublicationAuthors {
            processed: processed.iter().map(|id| (id.to_string(), None)).collect(),
            raw: raw.iter().map(|id| id.to_string()).collect(),
        };
        state.publications.insert("p1".to_string(), entry);
        state
    }

    #[test]
    fn test_best_alias_above_threshold() {
        let state = state(
            vec![
                Author::from_registry("A1", "John Smith"),
                Author::from_alias("s1", "J. Smith"),
                Author::from_alias("s2", "Jane Doe"),
            ],
            &["A1"],
            &["s1", "s2"],
        );
        let edges = within_publication_edges(&state, 0.6);
        assert_eq!(edges, BTreeSet::from([match_edge("A1", "s1")]));
    }

    #[test]
    fn test_below_threshold_no_edge() {
        let state = state(
            vec![
                Author::from_registry("A1", "John Smith"),
                Author::from_alias("s1", "Mari Tamm"),
            ],
            &["A1"],
            &["s1"],
        );
        assert!(within_publication_edges(&state, 0.6).is_empty());
    }

    #[test]
    fn test_self_candidate_blocks_edge() {
        let state = state(
            vec![
                Author::from_registry("A1", "John Smith"),
                Author::from_alias("s1", "Jon Smith"),
            ],
            &["A1"],
            &["A1", "s1"],
        );
        assert!(within_publication_edges(&state, 0.6).is_empty());
    }

    #[test]
    fn test_merge_within_updates_stats() {
        let state = state(
            vec![
                Author::from_registry("A1", "John Smith"),
                Author::from_alias("s1", "J. Smith"),
            ],
            &["A1"],
            &["s1"],
        );
        let mut stats = MergeStatistics::default();
        let next = merge_within_publications(&state, 0.6, &mut stats);

        assert_eq!(stats.merged_within_publication, 1);
        assert_eq!(next.authors.len(), 1);
        assert_eq!(next.publications["p1"].raw, BTreeSet::from(["A1".to_string()]));
    }
}
