//! Author representation and the polymorphic shapes it decodes from

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// One author of an entry, normalized to family/given halves.
///
/// Corporate authors carry the whole name in `family` with an empty
/// `given`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub family: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub given: String,
}

impl Author {
    /// Create an author from its two halves.
    pub fn new(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            given: given.into(),
        }
    }

    /// Format as `"Family, Given"` for BibTeX, or whichever half is present.
    pub fn bibtex_name(&self) -> String {
        match (self.family.is_empty(), self.given.is_empty()) {
            (false, false) => format!("{}, {}", self.family, self.given),
            (false, true) => self.family.clone(),
            (true, false) => self.given.clone(),
            (true, true) => String::new(),
        }
    }

    /// True when both halves are blank.
    pub fn is_empty(&self) -> bool {
        self.family.trim().is_empty() && self.given.trim().is_empty()
    }
}

/// Parse a single name string.
///
/// `"Family, Given"` splits at the first comma; a name without a comma is
/// kept whole in `family` (covers corporate authors).
pub fn parse_name(raw: &str) -> Author {
    let trimmed = raw.trim();
    match trimmed.find(',') {
        Some(pos) => Author::new(trimmed[..pos].trim(), trimmed[pos + 1..].trim()),
        None => Author::new(trimmed, ""),
    }
}

/// Mapping keys accepted for the family half, in lookup order.
const FAMILY_KEYS: [&str; 6] = ["family", "last", "literal", "corporate", "organization", "name"];

/// Mapping keys accepted for the given half, in lookup order.
const GIVEN_KEYS: [&str; 2] = ["given", "first"];

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lookup(map: &serde_yaml::Mapping, keys: &[&str]) -> String {
    for key in keys {
        if let Some(value) = map.get(*key) {
            if let Some(s) = scalar_to_string(value) {
                if !s.trim().is_empty() {
                    return s.trim().to_string();
                }
            }
        }
    }
    String::new()
}

fn from_mapping(map: &serde_yaml::Mapping) -> Author {
    Author::new(lookup(map, &FAMILY_KEYS), lookup(map, &GIVEN_KEYS))
}

fn from_shape(value: &Value) -> Option<Author> {
    let author = match value {
        Value::String(s) => parse_name(s),
        Value::Mapping(m) => from_mapping(m),
        _ => return None,
    };
    if author.is_empty() {
        None
    } else {
        Some(author)
    }
}

/// Normalize any of the accepted author shapes into the canonical list.
///
/// Accepted: bare string, sequence of strings, single mapping, sequence of
/// mappings (the shapes may mix inside one sequence). Anything else decodes
/// to an empty list rather than an error.
pub(crate) fn authors_from_value(value: &Value) -> Vec<Author> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(from_shape).collect(),
        other => from_shape(other).into_iter().collect(),
    }
}

pub(crate) fn deserialize_authors<'de, D>(de: D) -> Result<Vec<Author>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(de)?;
    Ok(authors_from_value(&value))
}
