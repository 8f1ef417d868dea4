//! Author entity
//!
//! An [`Author`] is one real person as far as the resolver can tell: an id,
//! the registry name when one is known, and every surface form seen for the
//! person. Identity is the id alone.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::similarity::similarity_ratio;

/// Result of [`Author::merge`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The other author was absorbed
    Merged,
    /// Both authors carry different registry names; nothing changed
    Refused,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    /// Registry id, or a surrogate id for authors only seen in free text
    pub id: String,
    /// Display name from the registry; empty for surrogate authors
    pub name: String,
    pub aliases: BTreeSet<String>,
    pub publications: BTreeSet<String>,
}

impl Author {
    /// Author known only by one free-text alias
    pub fn from_alias(id: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            aliases: BTreeSet::from([alias.into()]),
            publications: BTreeSet::new(),
        }
    }

    /// Author with a registry display name, which is also its first alias
    pub fn from_registry(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            aliases: BTreeSet::from([name.clone()]),
            name,
            publications: BTreeSet::new(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        if !alias.is_empty() {
            self.aliases.insert(alias);
        }
    }

    pub fn add_publication(&mut self, publication_id: impl Into<String>) {
        self.publications.insert(publication_id.into());
    }

    /// Best alias-to-alias similarity with another author
    pub fn similarity_ratio(&self, other: &Author, match_first_letter: bool) -> f64 {
        similarity_ratio(&self.aliases, &other.aliases, match_first_letter)
    }

    /// Absorb `other` into `self`.
    ///
    /// Refused when both carry registry names and the names differ. Otherwise
    /// the named side's id and name survive; with no name (or the same name)
    /// on both sides the smaller id survives. Aliases are unioned;
    /// publications are left to the caller.
    #[must_use]
    pub fn merge(&mut self, other: &Author) -> MergeOutcome {
        if self.has_name() && other.has_name() && self.name != other.name {
            return MergeOutcome::Refused;
        }

        if !self.has_name() && other.has_name() {
            self.id = other.id.clone();
            self.name = other.name.clone();
        } else if other.id < self.id {
            self.id = other.id.clone();
        }

        self.aliases.extend(other.aliases.iter().cloned());
        MergeOutcome::Merged
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_name() {
            let aliases: Vec<&str> = self.aliases.iter().map(String::as_str).collect();
            return write!(f, "{}", aliases.join("; "));
        }

        let others: Vec<&str> = self
            .aliases
            .iter()
            .filter(|alias| **alias != self.name)
            .map(String::as_str)
            .collect();
        write!(f, "{} ({})", self.name, others.join("; "))
    }
}
