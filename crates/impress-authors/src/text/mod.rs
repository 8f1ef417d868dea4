//! Authors string processing
//!
//! Turns a free-text authors string into standardized alias candidates:
//! - [`normalizer`]: delimiter unification, noise removal, transliteration
//! - [`parser`]: grammar-based splitting into individual names
//! - [`standardizer`]: `First Last` / `F. Last` formatting
//! - [`pipeline`]: the three stages chained per publication

pub mod grammar;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod standardizer;
pub mod transliteration;

pub use grammar::NameShape;
pub use normalizer::{Normalized, Normalizer, TextNormalizer, Transliteration};
pub use parser::{GrammarParser, NameParser, ParsedAuthors};
pub use pipeline::{AliasPipeline, PublicationAliases};
pub use standardizer::{NameStandardizer, Standardizer};
pub use transliteration::{contains_cyrillic, latinize};
