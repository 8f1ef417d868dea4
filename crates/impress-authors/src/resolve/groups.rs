//! Merge groups and their collapse
//!
//! Match edges form an undirected graph over author ids; each connected
//! component is a merge group. Collapsing folds the members of a group, in
//! id order, into one surviving author via [`Author::merge`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::graph::{Graph, NodeIndex};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use petgraph::Undirected;

use super::ResolutionState;
use crate::author::{Author, MergeOutcome};

/// Unordered pair of author ids, smaller id first
pub type MatchEdge = (String, String);

/// Normalize a pair of ids into a [`MatchEdge`]
pub fn match_edge(a: &str, b: &str) -> MatchEdge {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Counts from collapsing a set of merge groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollapseOutcome {
    /// Authors absorbed into a survivor
    pub merged: usize,
    /// Members left live because their registry names differ
    pub refused: usize,
}

/// Connected components with at least two members, each sorted by id and
/// ordered by their smallest id
pub fn merge_groups(edges: &BTreeSet<MatchEdge>) -> Vec<BTreeSet<String>> {
    let mut graph: Graph<&str, (), Undirected> = Graph::new_undirected();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

    for (a, b) in edges {
        let ia = *nodes.entry(a.as_str()).or_insert_with(|| graph.add_node(a.as_str()));
        let ib = *nodes.entry(b.as_str()).or_insert_with(|| graph.add_node(b.as_str()));
        if ia != ib {
            graph.update_edge(ia, ib, ());
        }
    }

    let mut components = UnionFind::new(graph.node_count());
    for edge in graph.edge_references() {
        components.union(edge.source().index(), edge.target().index());
    }

    let mut by_root: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
    for node in graph.node_indices() {
        by_root
            .entry(components.find(node.index()))
            .or_default()
            .insert(graph[node].to_string());
    }

    let mut groups: Vec<BTreeSet<String>> = by_root
        .into_values()
        .filter(|group| group.len() > 1)
        .collect();
    groups.sort();
    groups
}

/// Collapse every group into its survivor.
///
/// Works on a copy of the registry and returns the next state, with every
/// publication's credits rewritten to survivor ids.
pub fn collapse_groups(
    state: &ResolutionState,
    groups: &[BTreeSet<String>],
) -> (ResolutionState, CollapseOutcome) {
    let mut authors = state.authors.clone();
    let mut remap: HashMap<String, String> = HashMap::new();
    let mut outcome = CollapseOutcome::default();

    for group in groups {
        let mut members = group.iter().filter_map(|id| authors.remove(id));
        let Some(mut survivor) = members.next() else {
            continue;
        };

        let mut absorbed = vec![survivor.id.clone()];
        let mut kept: Vec<Author> = Vec::new();
        for member in members {
            match survivor.merge(&member) {
                MergeOutcome::Merged => {
                    survivor.publications.extend(member.publications);
                    absorbed.push(member.id);
                    outcome.merged += 1;
                }
                MergeOutcome::Refused => {
                    outcome.refused += 1;
                    kept.push(member);
                }
            }
        }

        for id in absorbed {
            if id != survivor.id {
                remap.insert(id, survivor.id.clone());
            }
        }
        for author in kept {
            authors.insert(author.id.clone(), author);
        }
        authors.insert(survivor.id.clone(), survivor);
    }

    let publications = state
        .publications
        .iter()
        .map(|(id, entry)| (id.clone(), entry.remapped(&remap)))
        .collect();

    (
        ResolutionState {
            authors,
            publications,
        },
        outcome,
    )
}
