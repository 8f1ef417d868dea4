//! Stage C: cross-publication merging corroborated by coauthors
//!
//! Two authors with similar aliases are merged only if each has a coauthor
//! whose aliases are similar to some coauthor of the other. Passes repeat
//! until one finds nothing to merge.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use super::groups::{collapse_groups, match_edge, merge_groups, MatchEdge};
use super::ResolutionState;
use crate::author::Author;
use crate::config::ResolverConfig;
use crate::report::{MergeStatistics, PassStatistics};

/// Every author id mapped to the ids it shares a publication with
pub fn coauthor_map(state: &ResolutionState) -> BTreeMap<&str, BTreeSet<&str>> {
    let mut coauthors: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for entry in state.publications.values() {
        let ids = entry.author_ids();
        for &id in &ids {
            let others = coauthors.entry(id).or_default();
            others.extend(ids.iter().filter(|&&other| other != id));
        }
    }
    coauthors
}

struct PairScan<'a> {
    authors: &'a BTreeMap<String, Author>,
    coauthors: BTreeMap<&'a str, BTreeSet<&'a str>>,
    threshold: f64,
    match_first_letter: bool,
}

impl PairScan<'_> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        match (self.authors.get(a), self.authors.get(b)) {
            (Some(a), Some(b)) => a.similarity_ratio(b, self.match_first_letter),
            _ => 0.0,
        }
    }

    /// Some pair of coauthors, one from each side, is similar enough
    fn corroborated(&self, a: &str, b: &str) -> bool {
        let (Some(left), Some(right)) = (self.coauthors.get(a), self.coauthors.get(b)) else {
            return false;
        };
        left.iter()
            .any(|x| right.iter().any(|y| self.similarity(x, y) > self.threshold))
    }

    fn edge(&self, a: &Author, b: &Author) -> Option<MatchEdge> {
        if a.similarity_ratio(b, self.match_first_letter) < self.threshold {
            return None;
        }
        if !self.corroborated(&a.id, &b.id) {
            return None;
        }
        Some(match_edge(&a.id, &b.id))
    }
}

/// Match edges of one cross-publication pass over every unordered pair of
/// live authors
pub fn cross_publication_edges(
    state: &ResolutionState,
    config: &ResolverConfig,
) -> BTreeSet<MatchEdge> {
    let scan = PairScan {
        authors: &state.authors,
        coauthors: coauthor_map(state),
        threshold: config.alias_threshold,
        match_first_letter: config.match_first_letter,
    };
    let authors: Vec<&Author> = state.authors.values().collect();

    #[cfg(feature = "parallel")]
    let edges = (0..authors.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let scan = &scan;
            let authors = &authors;
            (i + 1..authors.len()).filter_map(move |j| scan.edge(authors[i], authors[j]))
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let edges = (0..authors.len())
        .flat_map(|i| {
            let scan = &scan;
            let authors = &authors;
            (i + 1..authors.len()).filter_map(move |j| scan.edge(authors[i], authors[j]))
        })
        .collect();

    edges
}

/// Run Stage C passes until a pass finds no edge or merges nothing
pub fn merge_across_publications(
    mut state: ResolutionState,
    config: &ResolverConfig,
    stats: &mut MergeStatistics,
) -> ResolutionState {
    let mut pass = 0;
    loop {
        pass += 1;
        let started = Instant::now();
        let live_before = state.authors.len();

        let edges = cross_publication_edges(&state, config);
        let groups = merge_groups(&edges);
        let (next, outcome) = collapse_groups(&state, &groups);
        state = next;

        let elapsed = started.elapsed();
        info!(
            pass,
            live_before,
            edges = edges.len(),
            merged = outcome.merged,
            refused = outcome.refused,
            elapsed_ms = elapsed.as_millis() as u64,
            "Cross-publication merge pass"
        );
        stats.passes.push(PassStatistics {
            pass,
            live_before,
            merged: outcome.merged,
            refused: outcome.refused,
            elapsed,
        });

        if outcome.merged == 0 {
            debug!(pass, "Cross-publication merging converged");
            return state;
        }
    }
}
