//! Authors string cleaning
//!
//! Turns a raw, human-typed authors string into a delimiter-consistent,
//! Latin-script string:
//! 0. Unicode NFC composition, so combining marks join their letters
//! 1. Delimiter unification (line breaks, `&`, "and"/"with"/"ja", ellipses)
//! 2. Noise removal (asides in parentheses/brackets, numbers, period runs,
//!    configured unwanted substrings)
//! 3. Whitespace and punctuation canonicalization
//! 4. Cyrillic transliteration
//!
//! The sequence is repeated until the string stops changing, so cleaning an
//! already cleaned string is a no-op.

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use super::transliteration::{contains_cyrillic, latinize};
use crate::config::NormalizerConfig;
use crate::error::ConfigError;

/// Upper bound on clean-up repetitions before the result is accepted as is
const MAX_PASSES: usize = 16;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\n|\r").unwrap();
    static ref AMPERSAND: Regex = Regex::new(r"\s*&\s*").unwrap();
    static ref CONJUNCTION: Regex = Regex::new(r"\s+(?:and|with|ja)\s+").unwrap();
    /// "Thomas, D.. ..." marks a truncated list: "Thomas, D. ;"
    static ref ELLIPSIS: Regex = Regex::new(r"\.+\s+\.{3,}").unwrap();

    static ref PARENTHESES: Regex =
        Regex::new(r"\s*\(.*?\)\s*|^[^(]*\)\s*|\s*\([^)]*$").unwrap();
    static ref BRACKETS: Regex = Regex::new(r"\s*\[.*?\]\s*").unwrap();
    static ref NUMBERS: Regex = Regex::new(r"\s*\d+\.*\s*").unwrap();
    static ref PERIOD_RUN: Regex = Regex::new(r"\s*\.{2,}\s*").unwrap();

    static ref INITIAL_GAP: Regex = Regex::new(r"(\p{Lu}\.)\s+(-?\p{Lu}\b\.?)").unwrap();
    static ref SPACE_BEFORE_COMMA: Regex = Regex::new(r"\s+,\s").unwrap();
    static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();
    static ref MULTI_COMMA: Regex = Regex::new(r",{2,}").unwrap();
    static ref QUOTES: Regex = Regex::new(r#"["“”„«»]"#).unwrap();
    static ref EDGE_PUNCTUATION: Regex = Regex::new(r"^[\s,.]+|[\s,.]+$").unwrap();
}

/// A transliteration performed while cleaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transliteration {
    pub original: String,
    pub latinized: String,
}

/// Cleaned authors string with the transliteration that produced it, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub transliteration: Option<Transliteration>,
}

/// Cleans raw authors strings into delimiter-separated names
pub trait Normalizer {
    /// Primary delimiter used in the cleaned output
    fn delimiter(&self) -> char;

    /// Clean one raw authors string
    fn normalize(&self, raw: &str) -> Normalized;
}

/// Regex-based [`Normalizer`]
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    delimiter: char,
    unwanted: Option<Regex>,
}

impl TextNormalizer {
    /// Build a normalizer, compiling the configured unwanted substrings
    pub fn new(config: &NormalizerConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            delimiter: config.delimiter,
            unwanted: config.compile_unwanted()?,
        })
    }

    /// Rewrite every name separator to the primary delimiter
    pub fn unify_delimiters(&self, s: &str) -> String {
        let delimiter = self.delimiter.to_string();
        let spaced = format!("{} ", self.delimiter);
        let ellipsis = format!(". {}", self.delimiter);

        let s = LINE_BREAK.replace_all(s, NoExpand(&delimiter));
        let s = AMPERSAND.replace_all(&s, NoExpand(&spaced));
        let s = CONJUNCTION.replace_all(&s, NoExpand(&spaced));
        ELLIPSIS.replace_all(&s, NoExpand(&ellipsis)).into_owned()
    }

    /// Remove asides, numbers, period runs and unwanted substrings from one
    /// name segment
    pub fn remove_noise(&self, segment: &str) -> String {
        let s = PARENTHESES.replace_all(segment, " ");
        let s = BRACKETS.replace_all(&s, " ");
        let s = NUMBERS.replace_all(&s, " ");
        let s = PERIOD_RUN.replace_all(&s, " ");
        match &self.unwanted {
            Some(unwanted) => unwanted.replace_all(&s, " ").into_owned(),
            None => s.into_owned(),
        }
    }

    /// Canonicalize whitespace and punctuation of one name segment
    pub fn canonicalize(&self, segment: &str) -> String {
        let mut s = segment.to_string();
        loop {
            let joined = INITIAL_GAP.replace_all(&s, "$1$2").into_owned();
            if joined == s {
                break;
            }
            s = joined;
        }

        let s = SPACE_BEFORE_COMMA.replace_all(&s, ", ");
        let s = MULTI_SPACE.replace_all(&s, " ");
        let s = MULTI_COMMA.replace_all(&s, ",");
        let s = QUOTES.replace_all(&s, "");
        EDGE_PUNCTUATION.replace_all(&s, "").trim().to_string()
    }

    fn normalize_once(&self, raw: &str) -> Normalized {
        let composed: String = raw.nfc().collect();
        let unified = self.unify_delimiters(&composed);
        let separator = format!("{} ", self.delimiter);

        let text = unified
            .split(self.delimiter)
            .map(|segment| self.canonicalize(&self.remove_noise(segment)))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(&separator);

        if !contains_cyrillic(&text) {
            return Normalized {
                text,
                transliteration: None,
            };
        }

        let latinized = latinize(&text);
        if latinized == text {
            return Normalized {
                text,
                transliteration: None,
            };
        }

        Normalized {
            text: latinized.clone(),
            transliteration: Some(Transliteration {
                original: text,
                latinized,
            }),
        }
    }
}

impl Normalizer for TextNormalizer {
    fn delimiter(&self) -> char {
        self.delimiter
    }

    fn normalize(&self, raw: &str) -> Normalized {
        let mut current = self.normalize_once(raw);
        for _ in 0..MAX_PASSES {
            let next = self.normalize_once(&current.text);
            if next.text == current.text {
                break;
            }
            current.text = next.text;
            if current.transliteration.is_none() {
                current.transliteration = next.transliteration;
            }
        }
        current
    }
}
