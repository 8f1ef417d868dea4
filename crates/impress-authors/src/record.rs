//! Publication records as supplied by the source registry
//!
//! Records are immutable input to the resolver. They deserialize from the
//! crate's own field names as well as from the registry export columns
//! (`Guid`, `Authors`, `AuthorsText`, `Name`, `RoleNameEng`). The registry
//! stores the structured author list as a JSON string, so `registry_authors`
//! accepts either an array or a string holding an array.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CorpusError;

/// An author entry from the source registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAuthor {
    #[serde(alias = "Guid")]
    pub id: String,
    #[serde(alias = "Name", alias = "name")]
    pub display_name: String,
    #[serde(alias = "RoleNameEng", default)]
    pub role: Option<String>,
}

impl RegistryAuthor {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let role = role.into();
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role: if role.is_empty() { None } else { Some(role) },
        }
    }
}

/// One publication with both author lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    #[serde(alias = "Guid")]
    pub id: String,
    #[serde(
        alias = "Authors",
        alias = "authors_processed",
        default,
        deserialize_with = "deserialize_registry_authors"
    )]
    pub registry_authors: Vec<RegistryAuthor>,
    #[serde(alias = "AuthorsText", default)]
    pub authors_text: String,
}

impl PublicationRecord {
    pub fn new(
        id: impl Into<String>,
        registry_authors: Vec<RegistryAuthor>,
        authors_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            registry_authors,
            authors_text: authors_text.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RegistryAuthorsField {
    List(Vec<RegistryAuthor>),
    Encoded(String),
    Missing(()),
}

fn deserialize_registry_authors<'de, D>(deserializer: D) -> Result<Vec<RegistryAuthor>, D::Error>
where
    D: Deserializer<'de>,
{
    match RegistryAuthorsField::deserialize(deserializer)? {
        RegistryAuthorsField::List(authors) => Ok(authors),
        RegistryAuthorsField::Encoded(text) if text.trim().is_empty() => Ok(Vec::new()),
        RegistryAuthorsField::Encoded(text) => {
            serde_json::from_str(&text).map_err(serde::de::Error::custom)
        }
        RegistryAuthorsField::Missing(()) => Ok(Vec::new()),
    }
}

/// Parse a JSON array of publication records
pub fn parse_corpus(json: &str) -> Result<Vec<PublicationRecord>, CorpusError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON array of publication records from disk
pub fn load_corpus(path: &Path) -> Result<Vec<PublicationRecord>, CorpusError> {
    let content = std::fs::read_to_string(path)?;
    parse_corpus(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_native_fields() {
        let json = r#"[{
            "id": "p1",
            "registry_authors": [{"id": "A1", "display_name": "John Smith", "role": "Author"}],
            "authors_text": "Smith, John"
        }]"#;
        let records = parse_corpus(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].registry_authors,
            vec![RegistryAuthor::new("A1", "John Smith", "Author")]
        );
        assert_eq!(records[0].authors_text, "Smith, John");
    }

    #[test]
    fn test_parse_registry_export_columns() {
        let json = r#"[{
            "Guid": "p1",
            "Authors": "[{\"Guid\": \"A1\", \"Name\": \"Mari Tamm\", \"RoleNameEng\": \"Supervisor\"}]",
            "AuthorsText": "Tamm, M."
        }]"#;
        let records = parse_corpus(json).unwrap();
        assert_eq!(records[0].id, "p1");
        assert_eq!(records[0].registry_authors[0].display_name, "Mari Tamm");
        assert_eq!(
            records[0].registry_authors[0].role.as_deref(),
            Some("Supervisor")
        );
    }

    #[test]
    fn test_missing_and_null_author_fields() {
        let json = r#"[{"id": "p1"}, {"id": "p2", "registry_authors": null, "authors_text": ""}]"#;
        let records = parse_corpus(json).unwrap();
        assert!(records.iter().all(|r| r.registry_authors.is_empty()));
        assert!(records.iter().all(|r| r.authors_text.is_empty()));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_corpus("{not json"), Err(CorpusError::Json(_))));
    }

    #[test]
    fn test_empty_role_is_none() {
        assert_eq!(RegistryAuthor::new("A1", "John Smith", "").role, None);
    }
}
