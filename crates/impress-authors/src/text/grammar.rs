//! Personal name grammar
//!
//! Names are built from two tokens:
//! - **Name**: a capitalized word, possibly with apostrophes and hyphens,
//!   optionally preceded by a nobiliary particle (`van der`, `van`, `von`,
//!   `la`, `de`)
//! - **Initial**: one or two capitals, each followed by optional periods,
//!   hyphens or em-dashes
//!
//! Every pattern here is unanchored; callers anchor with `^`/`$` as needed.
//! Anchoring both ends is what keeps an Initial from eating the capital of a
//! following Name.

use lazy_static::lazy_static;
use regex::Regex;

pub const PARTICLE: &str = r"(?:[Vv]an\s[Dd]er|[Vv]an|[Vv]on|[Ll]a|[Dd]e)";
pub const NAME: &str = r"\p{Lu}[\p{L}'’—-]+";
pub const INITIAL: &str = r"(?:\p{Lu}\.*-*—*){1,2}";

/// Recognized shapes of a single personal name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameShape {
    /// `Dickus, B.`
    NameInitial,
    /// `F.G. Superman`
    InitialName,
    /// `David Thomas Shore`
    FullName,
    /// `Nudge, Arthur` or `Nudge, Arthur Bertram`
    LastFirst,
    /// `Nudge, Arthur` only; used to detect run-together lists
    LastFirstSingle,
}

impl NameShape {
    /// Shapes a whole segment may match to be accepted as one name
    pub const ACCEPTED: [NameShape; 4] = [
        NameShape::NameInitial,
        NameShape::InitialName,
        NameShape::FullName,
        NameShape::LastFirst,
    ];

    /// (detect, extract) pairs for segments holding several names with the
    /// delimiter missing
    pub const RECOVERY: [(NameShape, NameShape); 4] = [
        (NameShape::NameInitial, NameShape::NameInitial),
        (NameShape::InitialName, NameShape::InitialName),
        (NameShape::FullName, NameShape::FullName),
        (NameShape::LastFirstSingle, NameShape::LastFirst),
    ];

    /// Unanchored pattern source for this shape
    pub fn pattern(self) -> String {
        match self {
            NameShape::NameInitial => format!(r"{PARTICLE}?\s?{NAME}[,\s]\s*{INITIAL}"),
            NameShape::InitialName => format!(r"{INITIAL}[,\s]*\s*{PARTICLE}?\s?{NAME}"),
            NameShape::FullName => format!(r"{NAME}\s+{PARTICLE}?\s?{NAME}(?:\s+{NAME})?"),
            NameShape::LastFirst => format!(r"{PARTICLE}?\s?{NAME},\s*{NAME}(?:\s*{NAME})?"),
            NameShape::LastFirstSingle => format!(r"{PARTICLE}?\s?{NAME},\s*{NAME}"),
        }
    }
}

/// Compiled matchers for one recovery pair
pub struct RecoveryMatcher {
    pub shape: NameShape,
    /// Two names of the detect shape at the start of the segment
    pub detect: Regex,
    /// One name of the extract shape at the start of the segment
    pub extract: Regex,
}

lazy_static! {
    /// Whole-segment matchers for [`NameShape::ACCEPTED`]
    pub static ref EXACT: Vec<Regex> = NameShape::ACCEPTED
        .iter()
        .map(|shape| Regex::new(&format!("^(?:{})$", shape.pattern())).unwrap())
        .collect();

    pub static ref RECOVERY: Vec<RecoveryMatcher> = NameShape::RECOVERY
        .iter()
        .map(|(detect, extract)| {
            let detect_pattern = detect.pattern();
            RecoveryMatcher {
                shape: *extract,
                detect: Regex::new(&format!(
                    r"^(?:{detect_pattern})[\s,]+(?:{detect_pattern})"
                ))
                .unwrap(),
                extract: Regex::new(&format!("^(?:{})", extract.pattern())).unwrap(),
            }
        })
        .collect();

    pub static ref INITIALS_ONLY: Regex = Regex::new(&format!("^(?:{INITIAL})$")).unwrap();
}

/// Shape of a whole segment, if it is a single name
pub fn shape_of(segment: &str) -> Option<NameShape> {
    NameShape::ACCEPTED
        .iter()
        .zip(EXACT.iter())
        .find(|(_, regex)| regex.is_match(segment))
        .map(|(shape, _)| *shape)
}
