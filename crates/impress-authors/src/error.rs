//! Error types for impress-authors
//!
//! Only configuration problems and unreadable input are errors. Unparsable
//! authors strings, refused merges and empty input are reported through
//! [`crate::report::Diagnostics`] instead.

use thiserror::Error;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Main error type for a resolution run
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A registry id lives in the id-space reserved for surrogate ids
    #[error("Registry author id {id:?} starts with the reserved surrogate prefix {prefix:?}")]
    SurrogatePrefixCollision { id: String, prefix: String },
}

/// Configuration validation error
///
/// Raised before any publication is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Threshold is NaN, infinite or outside [0, 1]
    #[error("Threshold {name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    /// Delimiter cannot separate names
    #[error("Invalid delimiter {0:?}: must be a single non-whitespace, non-alphanumeric character")]
    InvalidDelimiter(char),

    /// Unwanted-substring pattern failed to compile
    #[error("Invalid unwanted-substring pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Surrogate prefix is empty, too long or not a hex string
    #[error("Invalid surrogate prefix {0:?}: expected 1-8 lowercase hex characters")]
    InvalidSurrogatePrefix(String),

    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// Config document could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors when loading a corpus of publication records
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Corpus file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus is not valid JSON for publication records
    #[error("Invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}
