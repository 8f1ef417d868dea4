//! impress-authors: author identity resolution for bibliographic corpora
//!
//! Publications arrive with two unreliable author lists: the structured list
//! supplied by a source registry and a free-text authors string typed by a
//! human. This crate turns both into one canonical author registry:
//!
//! - Text cleaning and Cyrillic transliteration of authors strings
//! - Grammar-based name parsing with recovery from dropped delimiters
//! - Name standardization to `First Last` / `F. Last`
//! - Edit-distance alias similarity
//! - Within-publication alias matching and cross-publication merging
//!   corroborated by shared coauthors
//! - Diagnostics tables for operator review
//!
//! ```
//! use impress_authors::{PublicationRecord, RegistryAuthor, ResolveConfig, Resolver};
//!
//! let records = vec![PublicationRecord::new(
//!     "pub-1",
//!     vec![RegistryAuthor::new("A1", "John Smith", "Author")],
//!     "Smith, John",
//! )];
//! let resolver = Resolver::new(ResolveConfig::default()).unwrap();
//! let resolution = resolver.resolve(&records).unwrap();
//! assert_eq!(resolution.authors.len(), 1);
//! assert!(resolution.authors.contains_key("A1"));
//! ```

pub mod author;
pub mod config;
pub mod error;
pub mod record;
pub mod report;
pub mod resolve;
pub mod similarity;
pub mod text;

pub use author::{Author, MergeOutcome};
pub use config::{NormalizerConfig, ResolveConfig, ResolverConfig};
pub use error::{ConfigError, CorpusError, ResolveError};
pub use record::{load_corpus, parse_corpus, PublicationRecord, RegistryAuthor};
pub use report::{
    DegenerateInput, Diagnostics, MergeStatistics, ParseFailure, PassStatistics,
    TransliterationEvent,
};
pub use resolve::{
    AuthorOrigin, AuthorRecord, Membership, PublicationAuthors, Resolution, ResolutionState,
    Resolver,
};
pub use similarity::similarity_ratio;
pub use text::{
    AliasPipeline, GrammarParser, NameParser, NameStandardizer, Normalized, Normalizer,
    ParsedAuthors, PublicationAliases, Standardizer, TextNormalizer, Transliteration,
};

/// Returns the version of impress-authors
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
