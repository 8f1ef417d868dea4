//! Name standardization to `First Last` / `F. Last`

use lazy_static::lazy_static;
use regex::Regex;

use super::grammar::{INITIAL, INITIALS_ONLY, NAME, PARTICLE};

lazy_static! {
    static ref STANDARDIZE: [Regex; 3] = [
        // Dickus, B.
        Regex::new(&format!(
            r"^(?P<last>{PARTICLE}?\s?{NAME})[,\s]\s*(?P<first>{INITIAL})$"
        ))
        .unwrap(),
        // F.G. Superman
        Regex::new(&format!(
            r"^(?P<first>{INITIAL})[,\s]*\s*(?P<last>{PARTICLE}?\s?{NAME})$"
        ))
        .unwrap(),
        // Nudge, Arthur Bertram
        Regex::new(&format!(
            r"^(?P<last>{PARTICLE}?\s?{NAME}),\s*(?P<first>{NAME}(?:\s*{NAME})?)$"
        ))
        .unwrap(),
    ];
    static ref INITIAL_NOISE: Regex = Regex::new(r"[\s.]").unwrap();
    static ref ADJACENT_CAPITALS: Regex = Regex::new(r"(\p{Lu})(\p{Lu})").unwrap();
}

/// Brings a parsed name into a single canonical layout
pub trait Standardizer {
    fn standardize(&self, name: &str) -> String;
}

/// Rewrites `Last, First` and `Last, I.` names to `First Last` and
/// `I. Last`. Names in other shapes pass through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameStandardizer;

impl NameStandardizer {
    pub fn new() -> Self {
        Self
    }
}

impl Standardizer for NameStandardizer {
    fn standardize(&self, name: &str) -> String {
        for pattern in STANDARDIZE.iter() {
            let Some(captures) = pattern.captures(name) else {
                continue;
            };
            let first = &captures["first"];
            let last = &captures["last"];
            if INITIALS_ONLY.is_match(first) {
                return format!("{} {}", format_initials(first), last.trim());
            }
            return format!("{} {}", first, last.trim());
        }
        name.to_string()
    }
}

/// `"JR"` → `"J. R."`, `"J.-P."` → `"J-P."`
fn format_initials(initials: &str) -> String {
    let compact = INITIAL_NOISE.replace_all(initials, "");
    let spaced = ADJACENT_CAPITALS.replace_all(&compact, "$1. $2");
    format!("{}.", spaced)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standardize(name: &str) -> String {
        NameStandardizer.standardize(name)
    }

    #[test]
    fn test_last_first() {
        assert_eq!(standardize("Smith, John"), "John Smith");
        assert_eq!(standardize("Nudge, Arthur Bertram"), "Arthur Bertram Nudge");
    }

    #[test]
    fn test_last_initials() {
        assert_eq!(standardize("Smith, J."), "J. Smith");
        assert_eq!(standardize("Smith, JR"), "J. R. Smith");
        assert_eq!(standardize("Doe, A.B."), "A. B. Doe");
        assert_eq!(standardize("Smith J"), "J. Smith");
    }

    #[test]
    fn test_initials_first() {
        assert_eq!(standardize("J.R. Smith"), "J. R. Smith");
        assert_eq!(standardize("F.G. Superman"), "F. G. Superman");
    }

    #[test]
    fn test_hyphenated_initials() {
        assert_eq!(standardize("Sartre, J.-P."), "J-P. Sartre");
        assert_eq!(standardize("J.-P. Sartre"), "J-P. Sartre");
    }

    #[test]
    fn test_particle_kept_with_last_name() {
        assert_eq!(standardize("van der Berg, J."), "J. van der Berg");
        assert_eq!(standardize("de Gaulle, Charles"), "Charles de Gaulle");
    }

    #[test]
    fn test_full_name_unchanged() {
        assert_eq!(standardize("John Smith"), "John Smith");
        assert_eq!(standardize("David Thomas Shore"), "David Thomas Shore");
    }

    #[test]
    fn test_unparsed_unchanged() {
        assert_eq!(standardize("???"), "???");
    }
}
