//! Entry data model: one citation record

use serde::{Deserialize, Serialize};

use crate::author::Author;

/// Bibliographic block, APA7-flavored field names.
///
/// Optional string fields hold `""` when unset and are omitted from the
/// serialized document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Apa7 {
    #[serde(
        default,
        deserialize_with = "crate::author::deserialize_authors",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub authors: Vec<Author>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub container_title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub edition: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub publisher_location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub journal: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub volume: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub issue: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pages: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doi: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub isbn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bibtex_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub accessed: String,
}

/// Annotation block: the reader's summary and keyword set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One citation record: the unit of storage.
///
/// Decoding is tolerant (absent fields default), so a structurally valid
/// YAML document always loads; `validate` enforces the hard invariants
/// before anything is written back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub entry_type: String,
    #[serde(default)]
    pub apa7: Apa7,
    #[serde(default)]
    pub annotation: Annotation,
}

impl Entry {
    /// Create an entry with the given type and title; everything else blank.
    pub fn new(entry_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            entry_type: entry_type.into(),
            apa7: Apa7 {
                title: title.into(),
                ..Apa7::default()
            },
            annotation: Annotation::default(),
        }
    }

    /// First listed author, if any.
    pub fn first_author(&self) -> Option<&Author> {
        self.apa7.authors.first()
    }

    /// Four-digit year: the explicit field, else a numeric `date` prefix.
    pub fn year_hint(&self) -> Option<i64> {
        if let Some(year) = self.apa7.year {
            return Some(year);
        }
        let prefix = self.apa7.date.get(..4)?;
        if prefix.bytes().all(|b| b.is_ascii_digit()) {
            prefix.parse().ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_document() {
        let yaml = r#"
id: 6f1b24c8-33a1-4f59-9b1d-9a4c2b7f0e11
type: book
apa7:
  authors:
    - family: Doe
      given: Jane
  year: 2021
  title: Systems Thinking
  publisher: Acme Press
  isbn: "978-3-16-148410-0"
annotation:
  summary: A tour of feedback loops.
  keywords: [systems, feedback]
"#;
        let entry: Entry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.entry_type, "book");
        assert_eq!(entry.apa7.authors.len(), 1);
        assert_eq!(entry.apa7.year, Some(2021));
        assert_eq!(entry.annotation.keywords, vec!["systems", "feedback"]);
        assert_eq!(entry.apa7.journal, "");
    }

    #[test]
    fn test_empty_optionals_are_omitted() {
        let mut entry = Entry::new("website", "Example");
        entry.id = "0c7e0d2e-6c3f-4d41-8f2a-0b6f6f3b5a10".to_string();
        entry.annotation.summary = "An example".to_string();
        entry.annotation.keywords = vec!["example".to_string()];

        let yaml = serde_yaml::to_string(&entry).unwrap();
        assert!(yaml.contains("title: Example"));
        assert!(!yaml.contains("journal"));
        assert!(!yaml.contains("isbn"));
        assert!(!yaml.contains("authors"));
    }

    #[test]
    fn test_year_hint_prefers_explicit_year() {
        let mut entry = Entry::new("article", "T");
        entry.apa7.year = Some(1999);
        entry.apa7.date = "2024-05-01".to_string();
        assert_eq!(entry.year_hint(), Some(1999));
    }

    #[test]
    fn test_year_hint_from_date_prefix() {
        let mut entry = Entry::new("article", "T");
        entry.apa7.date = "2024-05-01".to_string();
        assert_eq!(entry.year_hint(), Some(2024));

        entry.apa7.date = "May 2024".to_string();
        assert_eq!(entry.year_hint(), None);

        entry.apa7.date = String::new();
        assert_eq!(entry.year_hint(), None);
    }
}
