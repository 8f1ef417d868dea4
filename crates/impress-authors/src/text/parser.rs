//! Splitting cleaned authors strings into names

use lazy_static::lazy_static;
use regex::Regex;

use super::grammar::{self, RECOVERY};

lazy_static! {
    static ref LEADING_SECONDARY_DELIMITER: Regex = Regex::new(r"^[\s,]").unwrap();
    static ref RESIDUE_CHARS: Regex = Regex::new(r"[.,\s]").unwrap();
}

/// Result of parsing one cleaned authors string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAuthors {
    /// Accepted names, in order of appearance
    pub names: Vec<String>,
    /// Non-empty delimiter-separated segments of the input
    pub segments: Vec<String>,
    /// Segments that matched no name shape and could not be recovered
    pub failed: Vec<String>,
}

impl ParsedAuthors {
    /// True when there was something to parse but no name came out of it
    pub fn is_failure(&self) -> bool {
        self.names.is_empty() && !self.segments.is_empty()
    }
}

/// Splits a cleaned authors string into individual names
pub trait NameParser {
    fn parse(&self, text: &str) -> ParsedAuthors;
}

/// [`NameParser`] driven by the name grammar in [`grammar`]
#[derive(Debug, Clone)]
pub struct GrammarParser {
    delimiter: char,
}

impl GrammarParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// True if the whole segment is a single name
    pub fn is_exact_match(&self, segment: &str) -> bool {
        grammar::shape_of(segment).is_some()
    }

    /// Split a segment holding several names whose delimiter went missing,
    /// e.g. `"Smith, J. Doe, A."`
    pub fn recover(&self, segment: &str) -> Option<Vec<String>> {
        RECOVERY
            .iter()
            .filter(|matcher| matcher.detect.is_match(segment))
            .find_map(|matcher| extract_all(&matcher.extract, segment))
    }

    fn parse_segment(&self, segment: &str) -> Option<Vec<String>> {
        if self.is_exact_match(segment) {
            return Some(vec![segment.to_string()]);
        }
        self.recover(segment)
    }
}

impl Default for GrammarParser {
    fn default() -> Self {
        Self::new(';')
    }
}

impl NameParser for GrammarParser {
    fn parse(&self, text: &str) -> ParsedAuthors {
        let mut parsed = ParsedAuthors::default();

        for segment in text.split(self.delimiter).map(str::trim) {
            if segment.is_empty() {
                continue;
            }
            parsed.segments.push(segment.to_string());
            match self.parse_segment(segment) {
                Some(names) => parsed.names.extend(names),
                None => parsed.failed.push(segment.to_string()),
            }
        }

        parsed
    }
}

/// Repeatedly take the leading match of `extract`, dropping one secondary
/// delimiter after each. Fails if anything but periods, commas and
/// whitespace is left over, or if nothing was extracted.
fn extract_all(extract: &Regex, segment: &str) -> Option<Vec<String>> {
    let mut names = Vec::new();
    let mut rest = segment.trim();

    while let Some(found) = extract.find(rest) {
        names.push(found.as_str().to_string());
        let remaining = &rest[found.end()..];
        rest = match LEADING_SECONDARY_DELIMITER.find(remaining) {
            Some(delimiter) => remaining[delimiter.end()..].trim(),
            None => remaining.trim(),
        };
    }

    if names.is_empty() || !RESIDUE_CHARS.replace_all(rest, "").is_empty() {
        return None;
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ParsedAuthors {
        GrammarParser::default().parse(text)
    }

    #[test]
    fn test_split_on_delimiter() {
        let parsed = parse("Smith, J.; Doe, A.B.");
        assert_eq!(parsed.names, vec!["Smith, J.", "Doe, A.B."]);
        assert_eq!(parsed.segments, vec!["Smith, J.", "Doe, A.B."]);
        assert!(parsed.failed.is_empty());
    }

    #[test]
    fn test_recover_missing_delimiter() {
        let parsed = parse("Smith, J. Doe, A.B.");
        assert_eq!(parsed.names, vec!["Smith, J.", "Doe, A.B."]);
        assert!(!parsed.is_failure());
    }

    #[test]
    fn test_recover_comma_separated_full_names() {
        let parsed = parse("Tiiu Kuurme, Gertrud Kasemaa, Elo-Maria Roots");
        assert_eq!(
            parsed.names,
            vec!["Tiiu Kuurme", "Gertrud Kasemaa", "Elo-Maria Roots"]
        );
    }

    #[test]
    fn test_recover_initial_name_list() {
        let parsed = parse("J. Smith, A.B. Doe");
        assert_eq!(parsed.names, vec!["J. Smith", "A.B. Doe"]);
    }

    #[test]
    fn test_recover_last_first_list() {
        let parsed = parse("Chapajev, Vassili, Pustota, Pjotr");
        assert_eq!(parsed.names, vec!["Chapajev, Vassili", "Pustota, Pjotr"]);
    }

    #[test]
    fn test_reject_trailing_junk() {
        let parsed = parse("Smith, J. and some random unparseable trailing junk!!");
        assert!(parsed.names.is_empty());
        assert_eq!(
            parsed.failed,
            vec!["Smith, J. and some random unparseable trailing junk!!"]
        );
        assert!(parsed.is_failure());
    }

    #[test]
    fn test_partial_failure_keeps_good_segments() {
        let parsed = parse("Smith, J.; ???");
        assert_eq!(parsed.names, vec!["Smith, J."]);
        assert_eq!(parsed.failed, vec!["???"]);
        assert!(!parsed.is_failure());
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse("");
        assert!(parsed.names.is_empty());
        assert!(parsed.segments.is_empty());
        assert!(!parsed.is_failure());
    }

    #[test]
    fn test_custom_delimiter() {
        let parsed = GrammarParser::new('|').parse("Smith, J.| Doe, A.");
        assert_eq!(parsed.names, vec!["Smith, J.", "Doe, A."]);
    }
}
