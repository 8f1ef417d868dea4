//! Configuration for impress-authors
//!
//! Centralized configuration for the text normalizer and the identity
//! resolver. Defaults carry the thresholds and the noise patterns tuned on
//! the ETIS publication corpus.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResolveConfig {
    /// Authors string cleaning settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    /// Alias matching settings
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Authors string cleaning configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Primary delimiter between names
    pub delimiter: char,
    /// Case-insensitive patterns removed from every name segment
    pub unwanted_substrings: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            unwanted_substrings: default_unwanted_substrings(),
        }
    }
}

/// Role words, list truncation markers and institutional boilerplate seen in
/// authors strings (English, Estonian and Russian).
fn default_unwanted_substrings() -> Vec<String> {
    [
        r"\s*appendix\s*",
        r",*\s*и\s+др\.?",
        r"\s*\bteksti\sautor\b\s*",
        r"\s*\bautor\b\s*",
        r",*\s*juhendaja",
        r",*\s*koostaja\s*",
        r",*\s*koostanud\s*",
        r",*\s*toimet(\.|aja|anud)\s*",
        r",*\s+et\s+al\.?",
        r",*\s*\beditors?\b\.?",
        r",*\s*\bsupervisor\b",
        r",*\s*\btranslator\b",
        r"\s*DIRECT\s*",
        r"\s*Programme\s*",
        r"\s*Study\s*",
        r"\s*Group\s*",
        r"\s*\bküsitl\.?\s*",
        r"\s*tõlkija\s*",
        r"\s*tõlge\s.+?\skeelest\s*",
        r"\s*\bkoost\.\s*",
        r"\s*surname\s*",
        r"\s*firstname\s*",
        r"\s*\bjne\b\.?",
        r"\s*\bjt\b\.?",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Alias matching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// A registry author absorbs its best free-text alias in the same
    /// publication when the similarity exceeds this value
    pub within_publication_threshold: f64,
    /// Alias-vs-alias threshold for cross-publication matching, applied to
    /// both the candidate pair and their coauthors
    pub alias_threshold: f64,
    /// Score pairs with different first letters as 0.0 in cross-publication
    /// matching
    pub match_first_letter: bool,
    /// Reserved prefix of surrogate ids; must sort after every registry id
    pub surrogate_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            within_publication_threshold: 0.6,
            alias_threshold: 0.8,
            match_first_letter: true,
            surrogate_prefix: "ffffffff".to_string(),
        }
    }
}

impl ResolveConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values, including the regex patterns
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold(
            "within_publication_threshold",
            self.resolver.within_publication_threshold,
        )?;
        check_threshold("alias_threshold", self.resolver.alias_threshold)?;

        let delimiter = self.normalizer.delimiter;
        if delimiter.is_whitespace() || delimiter.is_alphanumeric() {
            return Err(ConfigError::InvalidDelimiter(delimiter));
        }

        let prefix = &self.resolver.surrogate_prefix;
        let is_hex = prefix
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if prefix.is_empty() || prefix.len() > 8 || !is_hex {
            return Err(ConfigError::InvalidSurrogatePrefix(prefix.clone()));
        }

        self.normalizer.compile_unwanted()?;
        Ok(())
    }
}

impl NormalizerConfig {
    /// Compile the unwanted-substring patterns into one case-insensitive
    /// alternation. Returns `None` when no patterns are configured.
    pub fn compile_unwanted(&self) -> Result<Option<Regex>, ConfigError> {
        for pattern in &self.unwanted_substrings {
            Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        }

        if self.unwanted_substrings.is_empty() {
            return Ok(None);
        }

        let combined = self
            .unwanted_substrings
            .iter()
            .map(|p| format!("(?:{})", p))
            .collect::<Vec<_>>()
            .join("|");

        RegexBuilder::new(&combined)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: combined,
                message: e.to_string(),
            })
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ThresholdOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResolveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resolver.within_publication_threshold, 0.6);
        assert_eq!(config.resolver.alias_threshold, 0.8);
        assert_eq!(config.normalizer.delimiter, ';');
    }

    #[test]
    fn test_json_serialization() {
        let config = ResolveConfig::default();
        let json = config.to_json().unwrap();
        let parsed = ResolveConfig::from_json(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ResolveConfig::from_toml(
            r#"
            [resolver]
            alias_threshold = 0.85
            "#,
        )
        .unwrap();
        assert_eq!(config.resolver.alias_threshold, 0.85);
        assert_eq!(config.resolver.within_publication_threshold, 0.6);
        assert_eq!(config.normalizer, NormalizerConfig::default());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = ResolveConfig::default();
        config.resolver.alias_threshold = 1.5;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange {
                name: "alias_threshold",
                value: 1.5
            })
        );
    }

    #[test]
    fn test_nan_threshold() {
        let mut config = ResolveConfig::default();
        config.resolver.within_publication_threshold = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange { .. })
        ));
    }

    #[test]
    fn test_bad_pattern() {
        let mut config = ResolveConfig::default();
        config.normalizer.unwanted_substrings.push("(unclosed".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPattern { pattern, .. }) if pattern == "(unclosed"
        ));
    }

    #[test]
    fn test_bad_delimiter() {
        let mut config = ResolveConfig::default();
        config.normalizer.delimiter = ' ';
        assert_eq!(config.validate(), Err(ConfigError::InvalidDelimiter(' ')));
    }

    #[test]
    fn test_bad_surrogate_prefix() {
        let mut config = ResolveConfig::default();
        config.resolver.surrogate_prefix = "zz".to_string();
        assert!(config.validate().is_err());
        config.resolver.surrogate_prefix = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unwanted_patterns_case_insensitive() {
        let regex = NormalizerConfig::default().compile_unwanted().unwrap().unwrap();
        assert!(regex.is_match("Smith, J. (EDITOR)"));
        assert!(regex.is_match("Tamm, Mari juhendaja"));
        assert!(regex.is_match("Smith, J. et al."));
    }
}
