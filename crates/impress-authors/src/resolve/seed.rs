//! Stage A: authors from registry entries and free-text aliases

use std::collections::HashSet;

use tracing::{debug, warn};
use uuid::Uuid;

use super::{PublicationAuthors, ResolutionState};
use crate::author::Author;
use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::record::PublicationRecord;
use crate::report::{DegenerateInput, Diagnostics, ParseFailure, TransliterationEvent};
use crate::text::{AliasPipeline, NameParser, Normalizer, Standardizer};

/// Namespace for name-based surrogate UUIDs
const SURROGATE_NAMESPACE: Uuid = Uuid::from_u128(0x6a1c_2f4e_9b3d_4c8a_a7e5_0d91_3b6f_8c24);

/// Surrogate id for the `index`-th alias of a publication.
///
/// The id is `prefix` followed by the rest of a v5 UUID of the publication id
/// and the alias position, so seeding the same corpus twice yields the same
/// ids.
pub fn surrogate_id(prefix: &str, publication_id: &str, index: usize) -> String {
    let name = format!("{publication_id}\u{1f}{index}");
    let uuid = Uuid::new_v5(&SURROGATE_NAMESPACE, name.as_bytes()).to_string();
    format!("{prefix}{}", &uuid[prefix.len()..])
}

/// Fail if any registry id lives in the surrogate id-space
fn check_registry_ids(records: &[PublicationRecord], prefix: &str) -> Result<()> {
    let collision = records
        .iter()
        .flat_map(|record| record.registry_authors.iter())
        .find(|author| author.id.starts_with(prefix));

    match collision {
        Some(author) => Err(ResolveError::SurrogatePrefixCollision {
            id: author.id.clone(),
            prefix: prefix.to_string(),
        }),
        None => Ok(()),
    }
}

/// Build the initial state: one author per registry id and one surrogate
/// author per free-text alias of each publication.
pub(crate) fn seed<N, P, S>(
    records: &[PublicationRecord],
    pipeline: &AliasPipeline<N, P, S>,
    config: &ResolverConfig,
    diagnostics: &mut Diagnostics,
) -> Result<ResolutionState>
where
    N: Normalizer,
    P: NameParser,
    S: Standardizer,
{
    let prefix = config.surrogate_prefix.as_str();
    check_registry_ids(records, prefix)?;

    let mut state = ResolutionState::default();
    let mut seen: HashSet<&str> = HashSet::new();

    for record in records {
        diagnostics.publications_seen += 1;
        if !seen.insert(record.id.as_str()) {
            warn!(publication = %record.id, "Duplicate publication id, keeping the first record");
            diagnostics.degenerate.push(DegenerateInput::DuplicatePublication {
                publication_id: record.id.clone(),
            });
            continue;
        }

        let mut entry = PublicationAuthors::default();

        for registry_author in &record.registry_authors {
            let name = registry_author.display_name.trim();
            if name.is_empty() {
                warn!(
                    publication = %record.id,
                    author = %registry_author.id,
                    "Registry author without display name"
                );
                diagnostics.degenerate.push(DegenerateInput::BlankRegistryName {
                    publication_id: record.id.clone(),
                    author_id: registry_author.id.clone(),
                });
                continue;
            }

            let author = state
                .authors
                .entry(registry_author.id.clone())
                .or_insert_with(|| Author::from_registry(&registry_author.id, name));
            if author.name != name {
                debug!(
                    author = %registry_author.id,
                    known = %author.name,
                    other = %name,
                    "Registry author listed under another name"
                );
                author.add_alias(name);
            }
            author.add_publication(&record.id);

            let role = entry
                .processed
                .entry(registry_author.id.clone())
                .or_insert(None);
            if role.is_none() {
                role.clone_from(&registry_author.role);
            }
        }

        if record.authors_text.trim().is_empty() {
            if entry.processed.is_empty() {
                warn!(publication = %record.id, "Publication without authors");
                diagnostics.degenerate.push(DegenerateInput::NoAuthors {
                    publication_id: record.id.clone(),
                });
            }
            state.publications.insert(record.id.clone(), entry);
            continue;
        }

        let extracted = pipeline.process(&record.authors_text);
        if let Some(transliteration) = extracted.transliteration.clone() {
            diagnostics.transliterations.push(TransliterationEvent {
                publication_id: record.id.clone(),
                original: transliteration.original,
                latinized: transliteration.latinized,
            });
        }
        for segment in &extracted.failed {
            debug!(publication = %record.id, segment = %segment, "Segment matches no name shape");
        }
        if !extracted.failed.is_empty() {
            let failure = ParseFailure {
                publication_id: record.id.clone(),
                original: record.authors_text.clone(),
                segments: extracted.failed.clone(),
            };
            if extracted.is_parse_failure() {
                debug!(publication = %record.id, text = %record.authors_text, "No names parsed");
                diagnostics.parse_failures.push(failure);
            } else {
                diagnostics.unparsed_segments.push(failure);
            }
        }

        for (index, alias) in extracted.aliases.iter().enumerate() {
            let id = surrogate_id(prefix, &record.id, index);
            let mut author = Author::from_alias(id.clone(), alias.clone());
            author.add_publication(&record.id);
            state.authors.insert(id.clone(), author);
            entry.raw.insert(id);
        }

        state.publications.insert(record.id.clone(), entry);
    }

    diagnostics.merges.initial_aliases = state.authors.len();
    debug!(
        authors = state.authors.len(),
        publications = state.publications.len(),
        "Seeded authors"
    );
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;
    use crate::record::RegistryAuthor;

    fn run(records: &[PublicationRecord]) -> (Result<ResolutionState>, Diagnostics) {
        let pipeline = AliasPipeline::from_config(&NormalizerConfig::default()).unwrap();
        let mut diagnostics = Diagnostics::new();
        let state = seed(
            records,
            &pipeline,
            &ResolverConfig::default(),
            &mut diagnostics,
        );
        (state, diagnostics)
    }

    #[test]
    fn test_surrogate_id_deterministic() {
        let a = surrogate_id("ffffffff", "p1", 0);
        assert_eq!(a, surrogate_id("ffffffff", "p1", 0));
        assert_ne!(a, surrogate_id("ffffffff", "p1", 1));
        assert_ne!(a, surrogate_id("ffffffff", "p2", 0));
        assert!(a.starts_with("ffffffff-"));
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_short_prefix() {
        let id = surrogate_id("ff", "p1", 0);
        assert!(id.starts_with("ff"));
        assert_eq!(id.len(), 36);
    }

    #[test]
    fn test_seed_registry_and_aliases() {
        let records = vec![PublicationRecord::new(
            "p1",
            vec![RegistryAuthor::new("A1", "John Smith", "Author")],
            "Smith, J.; Doe, Jane",
        )];
        let (state, diagnostics) = run(&records);
        let state = state.unwrap();

        assert_eq!(state.authors.len(), 3);
        assert_eq!(state.authors["A1"].name, "John Smith");
        let entry = &state.publications["p1"];
        assert_eq!(entry.processed["A1"].as_deref(), Some("Author"));
        assert_eq!(entry.raw.len(), 2);
        assert_eq!(diagnostics.merges.initial_aliases, 3);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let records = vec![PublicationRecord::new("p1", vec![], "Smith, J.; Doe, Jane")];
        let (first, _) = run(&records);
        let (second, _) = run(&records);
        let first: Vec<String> = first.unwrap().authors.into_keys().collect();
        let second: Vec<String> = second.unwrap().authors.into_keys().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prefix_collision() {
        let records = vec![PublicationRecord::new(
            "p1",
            vec![RegistryAuthor::new("ffffffff-0000", "John Smith", "")],
            "",
        )];
        let (state, _) = run(&records);
        assert!(matches!(
            state,
            Err(ResolveError::SurrogatePrefixCollision { id, .. }) if id == "ffffffff-0000"
        ));
    }

    #[test]
    fn test_duplicate_publication_skipped() {
        let records = vec![
            PublicationRecord::new("p1", vec![], "Smith, J."),
            PublicationRecord::new("p1", vec![], "Doe, A."),
        ];
        let (state, diagnostics) = run(&records);
        let state = state.unwrap();

        assert_eq!(state.authors.len(), 1);
        assert_eq!(diagnostics.publications_seen, 2);
        assert_eq!(
            diagnostics.degenerate,
            vec![DegenerateInput::DuplicatePublication {
                publication_id: "p1".to_string()
            }]
        );
    }

    #[test]
    fn test_blank_registry_name_skipped() {
        let records = vec![PublicationRecord::new(
            "p1",
            vec![RegistryAuthor::new("A1", "  ", "")],
            "",
        )];
        let (state, diagnostics) = run(&records);
        let state = state.unwrap();

        assert!(state.authors.is_empty());
        assert!(state.publications["p1"].processed.is_empty());
        assert_eq!(diagnostics.degenerate.len(), 2);
    }

    #[test]
    fn test_registry_name_variant_becomes_alias() {
        let records = vec![
            PublicationRecord::new("p1", vec![RegistryAuthor::new("A1", "Mari Tamm", "")], ""),
            PublicationRecord::new("p2", vec![RegistryAuthor::new("A1", "M. Tamm", "")], ""),
        ];
        let (state, _) = run(&records);
        let author = &state.unwrap().authors["A1"];

        assert_eq!(author.name, "Mari Tamm");
        assert!(author.aliases.contains("M. Tamm"));
        assert_eq!(author.publications.len(), 2);
    }

    #[test]
    fn test_parse_failure_recorded() {
        let records = vec![PublicationRecord::new("p1", vec![], "???")];
        let (state, diagnostics) = run(&records);

        assert!(state.unwrap().authors.is_empty());
        assert_eq!(diagnostics.parse_failures.len(), 1);
        assert_eq!(diagnostics.parse_failures[0].original, "???");
    }

    #[test]
    fn test_unparsed_segment_of_parsed_string_recorded() {
        let records = vec![PublicationRecord::new("p1", vec![], "Smith, J.; ???")];
        let (state, diagnostics) = run(&records);

        assert_eq!(state.unwrap().authors.len(), 1);
        assert!(diagnostics.parse_failures.is_empty());
        assert_eq!(diagnostics.unparsed_segments.len(), 1);
        assert_eq!(diagnostics.unparsed_segments[0].publication_id, "p1");
        assert_eq!(diagnostics.unparsed_segments[0].segments, vec!["???"]);
    }

    #[test]
    fn test_transliteration_recorded() {
        let records = vec![PublicationRecord::new("p1", vec![], "Смирнов, А.")];
        let (state, diagnostics) = run(&records);

        let state = state.unwrap();
        let author = state.authors.values().next().unwrap();
        assert!(author.aliases.contains("A. Smirnov"));
        assert_eq!(diagnostics.transliterations.len(), 1);
        assert_eq!(diagnostics.transliterations[0].publication_id, "p1");
    }
}
