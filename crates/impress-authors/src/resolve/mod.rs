//! Author identity resolution
//!
//! Three stages turn publication records into one author registry:
//! 1. **Seed** ([`seed`]): registry authors and free-text aliases become
//!    [`Author`]s, every alias under its own surrogate id
//! 2. **Within-publication merge** ([`within`]): each registry author absorbs
//!    its closest free-text alias from the same publication
//! 3. **Cross-publication merge** ([`across`]): similarly named authors with
//!    similarly named coauthors are merged, repeated until nothing changes
//!
//! Merging happens per connected component of a match graph ([`groups`]).
//! Every merge step builds a fresh [`ResolutionState`] rather than mutating
//! the one being read.

pub mod across;
pub mod groups;
pub mod seed;
pub mod within;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::author::Author;
use crate::config::{ResolveConfig, ResolverConfig};
use crate::error::{ConfigError, Result};
use crate::record::PublicationRecord;
use crate::report::Diagnostics;
use crate::text::AliasPipeline;

/// Authors credited on one publication
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationAuthors {
    /// Authors from the registry list, with their role
    pub processed: BTreeMap<String, Option<String>>,
    /// Authors parsed from the free-text authors string
    pub raw: BTreeSet<String>,
}

impl PublicationAuthors {
    /// Every author id credited on the publication, from either list
    pub fn author_ids(&self) -> BTreeSet<&str> {
        self.processed
            .keys()
            .chain(self.raw.iter())
            .map(String::as_str)
            .collect()
    }

    /// Copy with merged-away ids replaced by their survivors. When two
    /// registry entries collapse into one, the first known role is kept.
    pub fn remapped(&self, remap: &HashMap<String, String>) -> Self {
        let survivor = |id: &String| remap.get(id).unwrap_or(id).clone();

        let mut processed: BTreeMap<String, Option<String>> = BTreeMap::new();
        for (id, role) in &self.processed {
            let slot = processed.entry(survivor(id)).or_insert(None);
            if slot.is_none() {
                slot.clone_from(role);
            }
        }

        Self {
            processed,
            raw: self.raw.iter().map(survivor).collect(),
        }
    }
}

/// Author registry and per-publication credits at one point of resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionState {
    pub authors: BTreeMap<String, Author>,
    pub publications: BTreeMap<String, PublicationAuthors>,
}

/// Where a publication credit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorOrigin {
    Registry,
    FreeText,
}

/// Flat view of a resolved author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub publications: Vec<String>,
}

impl From<&Author> for AuthorRecord {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id.clone(),
            name: author.name.clone(),
            aliases: author.aliases.iter().cloned().collect(),
            publications: author.publications.iter().cloned().collect(),
        }
    }
}

/// One author credited on one publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub author_id: String,
    pub publication_id: String,
    pub role: Option<String>,
    pub origin: AuthorOrigin,
}

/// Result of a resolution run
#[derive(Debug, Clone)]
pub struct Resolution {
    pub authors: BTreeMap<String, Author>,
    pub publications: BTreeMap<String, PublicationAuthors>,
    pub diagnostics: Diagnostics,
}

impl Resolution {
    pub fn author_records(&self) -> Vec<AuthorRecord> {
        self.authors.values().map(AuthorRecord::from).collect()
    }

    /// Publication credits; an author credited by the registry is listed once
    /// with the registry role even when the free text credits it too
    pub fn memberships(&self) -> Vec<Membership> {
        let mut memberships = Vec::new();
        for (publication_id, entry) in &self.publications {
            for (author_id, role) in &entry.processed {
                memberships.push(Membership {
                    author_id: author_id.clone(),
                    publication_id: publication_id.clone(),
                    role: role.clone(),
                    origin: AuthorOrigin::Registry,
                });
            }
            for author_id in entry.raw.iter().filter(|id| !entry.processed.contains_key(*id)) {
                memberships.push(Membership {
                    author_id: author_id.clone(),
                    publication_id: publication_id.clone(),
                    role: None,
                    origin: AuthorOrigin::FreeText,
                });
            }
        }
        memberships
    }

    /// Drop the diagnostics and keep the state, e.g. to resolve it again
    pub fn into_state(self) -> ResolutionState {
        ResolutionState {
            authors: self.authors,
            publications: self.publications,
        }
    }
}

/// Runs the three resolution stages with one configuration
#[derive(Debug, Clone)]
pub struct Resolver {
    config: ResolverConfig,
    pipeline: AliasPipeline,
}

impl Resolver {
    /// Validate the configuration and compile its patterns
    pub fn new(config: ResolveConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let pipeline = AliasPipeline::from_config(&config.normalizer)?;
        Ok(Self {
            config: config.resolver,
            pipeline,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a corpus of publication records from scratch
    pub fn resolve(&self, records: &[PublicationRecord]) -> Result<Resolution> {
        info!(publications = records.len(), "Resolving author identities");
        let mut diagnostics = Diagnostics::new();
        let state = seed::seed(records, &self.pipeline, &self.config, &mut diagnostics)?;
        Ok(self.run_merges(state, diagnostics))
    }

    /// Run the merge stages on an existing state, e.g. a previous result.
    /// Resolving an already resolved state changes nothing.
    pub fn resolve_state(&self, state: ResolutionState) -> Resolution {
        let mut diagnostics = Diagnostics::new();
        diagnostics.publications_seen = state.publications.len();
        diagnostics.merges.initial_aliases = state.authors.len();
        self.run_merges(state, diagnostics)
    }

    fn run_merges(&self, state: ResolutionState, mut diagnostics: Diagnostics) -> Resolution {
        let state = within::merge_within_publications(
            &state,
            self.config.within_publication_threshold,
            &mut diagnostics.merges,
        );
        let state = across::merge_across_publications(state, &self.config, &mut diagnostics.merges);

        info!(
            authors = state.authors.len(),
            merged = diagnostics.merges.total_merged(),
            "Resolution finished"
        );

        Resolution {
            authors: state.authors,
            publications: state.publications,
            diagnostics,
        }
    }
}
