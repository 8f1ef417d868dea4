//! Diagnostics collected during a resolution run
//!
//! Nothing here affects the result; it is the operator's view of what the
//! cleaner and the resolver did. [`Diagnostics`] renders fixed-width tables
//! through `Display` and can emit them line by line through `tracing`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Column width of the rendered tables
const COLUMN_WIDTH: usize = 50;

/// An authors string that was transliterated to Latin script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterationEvent {
    pub publication_id: String,
    pub original: String,
    pub latinized: String,
}

/// An authors string no name could be parsed from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    pub publication_id: String,
    /// Raw authors string as supplied
    pub original: String,
    /// Cleaned segments that failed to parse
    pub segments: Vec<String>,
}

/// Input that contributes nothing, or less than it appears to, to the result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegenerateInput {
    /// Registry author entry without a display name
    BlankRegistryName {
        publication_id: String,
        author_id: String,
    },
    /// Publication id already seen earlier in the corpus
    DuplicatePublication { publication_id: String },
    /// Publication with neither registry authors nor an authors string
    NoAuthors { publication_id: String },
}

impl fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateInput::BlankRegistryName {
                publication_id,
                author_id,
            } => write!(
                f,
                "registry author {author_id} in {publication_id} has no display name"
            ),
            DegenerateInput::DuplicatePublication { publication_id } => {
                write!(f, "publication {publication_id} appears more than once")
            }
            DegenerateInput::NoAuthors { publication_id } => {
                write!(f, "publication {publication_id} has no authors")
            }
        }
    }
}

/// One cross-publication merge pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStatistics {
    pub pass: usize,
    /// Live authors when the pass started
    pub live_before: usize,
    /// Authors absorbed into another one during the pass
    pub merged: usize,
    /// Merges declined because registry names differ
    pub refused: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStatistics {
    /// Authors created from registry entries and free-text aliases
    pub initial_aliases: usize,
    /// Authors absorbed by within-publication matching
    pub merged_within_publication: usize,
    /// Merges declined during within-publication matching
    pub refused_within_publication: usize,
    pub passes: Vec<PassStatistics>,
}

impl MergeStatistics {
    /// Authors absorbed over the whole run
    pub fn total_merged(&self) -> usize {
        self.merged_within_publication + self.passes.iter().map(|p| p.merged).sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Publication records seen, duplicates included
    pub publications_seen: usize,
    pub transliterations: Vec<TransliterationEvent>,
    pub parse_failures: Vec<ParseFailure>,
    /// Publications that yielded names but also had segments left unparsed
    pub unparsed_segments: Vec<ParseFailure>,
    pub degenerate: Vec<DegenerateInput>,
    pub merges: MergeStatistics,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the rendered report through `tracing`, one event per line
    pub fn log(&self) {
        for line in self.to_string().lines() {
            info!("{}", line);
        }
    }

    /// Table of transliterated strings, one row per distinct pair
    pub fn transliteration_table(&self) -> Option<String> {
        if self.transliterations.is_empty() {
            return None;
        }

        let rows = unique_rows(self.transliterations.iter().map(|event| {
            row(
                &format!("{:?}", event.original),
                &format!("{:?}", event.latinized),
            )
        }));

        let mut out = String::from("THE FOLLOWING CYRILLIC NAMES WERE TRANSLITERATED TO LATIN:\n");
        out.push_str(&table("original cyrillic", "latinized replacement", &rows));
        Some(out)
    }

    /// Table of unparsable authors strings with their share of the corpus
    pub fn parse_failure_table(&self) -> Option<String> {
        if self.parse_failures.is_empty() {
            return None;
        }

        let rows = unique_rows(self.parse_failures.iter().map(|failure| {
            row(
                &format!("{:?}", failure.original),
                &format!("{:?}", failure.segments),
            )
        }));

        let total = self.publications_seen.max(self.parse_failures.len());
        let percent = (self.parse_failures.len() as f64 / total as f64 * 100.0).round();

        let mut out = String::from("COULD NOT PARSE AUTHORS FROM FOLLOWING ENTRIES\n");
        out.push_str(&format!(
            "({percent} % of {total}. {} unique entries):\n",
            rows.len()
        ));
        out.push_str(&table("raw authors string", "cleaned authors string", &rows));
        Some(out)
    }

    /// Segments dropped from otherwise parsed authors strings
    pub fn unparsed_segment_table(&self) -> Option<String> {
        if self.unparsed_segments.is_empty() {
            return None;
        }

        let rows = unique_rows(self.unparsed_segments.iter().flat_map(|failure| {
            failure
                .segments
                .iter()
                .map(|segment| row(&failure.publication_id, &format!("{segment:?}")))
        }));

        let mut out = format!(
            "SEGMENTS SKIPPED IN PARTLY PARSED ENTRIES ({} unique entries):\n",
            rows.len()
        );
        out.push_str(&table("publication", "skipped segment", &rows));
        Some(out)
    }

    /// Merge counts and per-pass timings
    pub fn merge_summary(&self) -> String {
        let merges = &self.merges;
        let mut out = String::from("AUTHOR MERGE SUMMARY:\n");
        out.push_str(&format!("initial aliases: {}\n", merges.initial_aliases));
        out.push_str(&format!(
            "merged within publications: {} ({} refused)\n",
            merges.merged_within_publication, merges.refused_within_publication
        ));
        for pass in &merges.passes {
            out.push_str(&format!(
                "pass {}: {} live authors, {} merged, {} refused ({:.1?})\n",
                pass.pass, pass.live_before, pass.merged, pass.refused, pass.elapsed
            ));
        }
        out.push_str(&format!("total merged: {}\n", merges.total_merged()));
        out
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = self.transliteration_table() {
            writeln!(f, "{table}")?;
        }
        if let Some(table) = self.parse_failure_table() {
            writeln!(f, "{table}")?;
        }
        if let Some(table) = self.unparsed_segment_table() {
            writeln!(f, "{table}")?;
        }
        if !self.degenerate.is_empty() {
            writeln!(f, "DEGENERATE INPUT ({} entries):", self.degenerate.len())?;
            for entry in &self.degenerate {
                writeln!(f, "- {entry}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.merge_summary())
    }
}

fn row(left: &str, right: &str) -> String {
    let width = COLUMN_WIDTH - 2;
    format!("| {left:<width$} | {right:<width$} |")
}

fn separator() -> String {
    let line = "-".repeat(COLUMN_WIDTH);
    format!("+{line}+{line}+")
}

fn table(left_header: &str, right_header: &str, rows: &[String]) -> String {
    let mut out = String::new();
    out.push_str(&separator());
    out.push('\n');
    out.push_str(&row(left_header, right_header));
    out.push('\n');
    out.push_str(&separator());
    out.push('\n');
    for r in rows {
        out.push_str(r);
        out.push('\n');
    }
    out.push_str(&separator());
    out.push('\n');
    out
}

fn unique_rows(rows: impl Iterator<Item = String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for r in rows {
        if !unique.contains(&r) {
            unique.push(r);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(id: &str, original: &str) -> ParseFailure {
        ParseFailure {
            publication_id: id.to_string(),
            original: original.to_string(),
            segments: vec![original.to_string()],
        }
    }

    #[test]
    fn test_empty_report_has_only_summary() {
        let report = Diagnostics::new().to_string();
        assert!(report.starts_with("AUTHOR MERGE SUMMARY:"));
        assert!(!report.contains("CYRILLIC"));
        assert!(!report.contains("COULD NOT PARSE"));
    }

    #[test]
    fn test_transliteration_rows_deduplicated() {
        let event = TransliterationEvent {
            publication_id: "p1".to_string(),
            original: "Смирнов, А".to_string(),
            latinized: "Smirnov, A".to_string(),
        };
        let diagnostics = Diagnostics {
            transliterations: vec![
                event.clone(),
                TransliterationEvent {
                    publication_id: "p2".to_string(),
                    ..event
                },
            ],
            ..Diagnostics::default()
        };
        let table = diagnostics.transliteration_table().unwrap();
        assert_eq!(table.matches("Smirnov, A").count(), 1);
        assert!(table.contains("| original cyrillic"));
    }

    #[test]
    fn test_rows_are_fixed_width() {
        let r = row("\"a\"", "\"b\"");
        assert_eq!(r.chars().count(), 2 * COLUMN_WIDTH + 3);
        assert_eq!(separator().chars().count(), 2 * COLUMN_WIDTH + 3);
    }

    #[test]
    fn test_parse_failure_percentage() {
        let diagnostics = Diagnostics {
            publications_seen: 4,
            parse_failures: vec![failure("p1", "???"), failure("p2", "???")],
            ..Diagnostics::default()
        };
        let table = diagnostics.parse_failure_table().unwrap();
        assert!(table.contains("(50 % of 4. 1 unique entries):"));
    }

    #[test]
    fn test_unparsed_segments_rendered() {
        let diagnostics = Diagnostics {
            unparsed_segments: vec![ParseFailure {
                publication_id: "p1".to_string(),
                original: "Smith, J.; ???".to_string(),
                segments: vec!["???".to_string()],
            }],
            ..Diagnostics::default()
        };
        let table = diagnostics.unparsed_segment_table().unwrap();
        assert!(table.contains("(1 unique entries)"));
        assert!(table.contains("\"???\""));
        assert!(diagnostics.to_string().contains("SEGMENTS SKIPPED"));
        assert!(Diagnostics::new().unparsed_segment_table().is_none());
    }

    #[test]
    fn test_merge_summary_counts() {
        let diagnostics = Diagnostics {
            merges: MergeStatistics {
                initial_aliases: 10,
                merged_within_publication: 3,
                refused_within_publication: 1,
                passes: vec![PassStatistics {
                    pass: 1,
                    live_before: 7,
                    merged: 2,
                    refused: 0,
                    elapsed: Duration::from_millis(5),
                }],
            },
            ..Diagnostics::default()
        };
        let summary = diagnostics.merge_summary();
        assert!(summary.contains("initial aliases: 10"));
        assert!(summary.contains("pass 1: 7 live authors, 2 merged"));
        assert!(summary.contains("total merged: 5"));
    }

    #[test]
    fn test_degenerate_input_rendered() {
        let diagnostics = Diagnostics {
            degenerate: vec![DegenerateInput::DuplicatePublication {
                publication_id: "p1".to_string(),
            }],
            ..Diagnostics::default()
        };
        assert!(diagnostics
            .to_string()
            .contains("- publication p1 appears more than once"));
    }
}
