//! Mirror record representation

use std::collections::BTreeMap;

/// Record kind the mirror emits. Everything that is not an article or a
/// book mirrors as `@misc`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Article,
    Book,
    Misc,
}

impl RecordKind {
    /// Parse a record kind (case-insensitive); unknown kinds collapse to misc.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "article" => Self::Article,
            "book" => Self::Book,
            _ => Self::Misc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Misc => "misc",
        }
    }
}

/// One record of the consolidated mirror: a kind, a cite key, and an
/// unordered field map.
///
/// Records written by this crate always carry the provenance fields `_id`
/// and `_type`, which make the mapping back to an Entry lossless. Extra
/// `_`-prefixed fields (e.g. `_source`) ride through upserts untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BibRecord {
    pub kind: RecordKind,
    pub key: String,
    pub fields: BTreeMap<String, String>,
}

impl BibRecord {
    pub fn new(kind: RecordKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Field value by name, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Set a field, dropping blank values.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.insert(name.to_string(), value);
        }
    }

    /// The `_id` provenance field.
    pub fn id(&self) -> Option<&str> {
        self.get("_id")
    }

    /// Total order the mirror file is kept in: kind, lowercase title, key.
    pub fn sort_key(&self) -> (RecordKind, String, String) {
        let title = self.get("title").unwrap_or("").to_lowercase();
        (self.kind, title, self.key.clone())
    }
}
