//! Authors string to alias candidates
//!
//! Chains a [`Normalizer`], a [`NameParser`] and a [`Standardizer`]. Each
//! stage is a trait so alternative implementations can be swapped in.

use super::normalizer::{Normalizer, TextNormalizer, Transliteration};
use super::parser::{GrammarParser, NameParser};
use super::standardizer::{NameStandardizer, Standardizer};
use crate::config::NormalizerConfig;
use crate::error::ConfigError;

/// Alias candidates extracted from one publication's authors string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationAliases {
    /// Standardized names in order of appearance, without repeats
    pub aliases: Vec<String>,
    /// The authors string after cleaning
    pub cleaned: String,
    /// Delimiter-separated segments of the cleaned string
    pub segments: Vec<String>,
    /// Segments no name could be parsed from
    pub failed: Vec<String>,
    pub transliteration: Option<Transliteration>,
}

impl PublicationAliases {
    /// True when the cleaned string was non-empty but yielded no alias
    pub fn is_parse_failure(&self) -> bool {
        self.aliases.is_empty() && !self.segments.is_empty()
    }
}

/// Normalizer, parser and standardizer run back to back
#[derive(Debug, Clone)]
pub struct AliasPipeline<N = TextNormalizer, P = GrammarParser, S = NameStandardizer> {
    normalizer: N,
    parser: P,
    standardizer: S,
}

impl AliasPipeline {
    /// Build the regex-based pipeline from configuration
    pub fn from_config(config: &NormalizerConfig) -> Result<Self, ConfigError> {
        let normalizer = TextNormalizer::new(config)?;
        let parser = GrammarParser::new(normalizer.delimiter());
        Ok(Self::new(normalizer, parser, NameStandardizer))
    }
}

impl<N, P, S> AliasPipeline<N, P, S>
where
    N: Normalizer,
    P: NameParser,
    S: Standardizer,
{
    pub fn new(normalizer: N, parser: P, standardizer: S) -> Self {
        Self {
            normalizer,
            parser,
            standardizer,
        }
    }

    /// Extract alias candidates from one raw authors string
    pub fn process(&self, raw: &str) -> PublicationAliases {
        let normalized = self.normalizer.normalize(raw);
        let parsed = self.parser.parse(&normalized.text);

        let mut aliases: Vec<String> = Vec::with_capacity(parsed.names.len());
        for name in &parsed.names {
            let alias = self.standardizer.standardize(name);
            if !alias.is_empty() && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }

        PublicationAliases {
            aliases,
            cleaned: normalized.text,
            segments: parsed.segments,
            failed: parsed.failed,
            transliteration: normalized.transliteration,
        }
    }
}
