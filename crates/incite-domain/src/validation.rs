//! Entry validation: the hard invariants enforced before any write

use crate::entry::Entry;
use crate::entry_type::EntryType;
use crate::id::is_canonical_id;

/// A violation that blocks a write. Never downgraded or coerced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid id {0:?}: expected canonical UUIDv4")]
    BadId(String),

    #[error("unknown entry type {0:?}")]
    UnknownType(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("keywords must contain at least one entry")]
    EmptyKeywords,

    #[error("url is set but accessed is empty")]
    UrlWithoutAccessed,
}

/// Check every storage invariant on `entry`, failing on the first violation.
pub fn validate(entry: &Entry) -> Result<(), ValidationError> {
    if !is_canonical_id(&entry.id) {
        return Err(ValidationError::BadId(entry.id.clone()));
    }
    if EntryType::from_str(&entry.entry_type).is_none() {
        return Err(ValidationError::UnknownType(entry.entry_type.clone()));
    }
    if entry.apa7.title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    if entry.annotation.summary.trim().is_empty() {
        return Err(ValidationError::MissingField("summary"));
    }
    if entry.annotation.keywords.is_empty() {
        return Err(ValidationError::EmptyKeywords);
    }
    if !entry.apa7.url.trim().is_empty() && entry.apa7.accessed.trim().is_empty() {
        return Err(ValidationError::UrlWithoutAccessed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::new_id;

    fn valid_entry() -> Entry {
        let mut entry = Entry::new("book", "Systems Thinking");
        entry.id = new_id();
        entry.annotation.summary = "A tour of feedback loops.".to_string();
        entry.annotation.keywords = vec!["systems".to_string()];
        entry
    }

    #[test]
    fn test_valid_entry_passes() {
        assert_eq!(validate(&valid_entry()), Ok(()));
    }

    #[test]
    fn test_blank_id_rejected() {
        let mut entry = valid_entry();
        entry.id = String::new();
        assert!(matches!(validate(&entry), Err(ValidationError::BadId(_))));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut entry = valid_entry();
        entry.entry_type = "webpage".to_string();
        assert_eq!(
            validate(&entry),
            Err(ValidationError::UnknownType("webpage".to_string()))
        );
    }

    #[test]
    fn test_blank_title_rejected() {
        let mut entry = valid_entry();
        entry.apa7.title = "   ".to_string();
        assert_eq!(
            validate(&entry),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_blank_summary_rejected() {
        let mut entry = valid_entry();
        entry.annotation.summary = String::new();
        assert_eq!(
            validate(&entry),
            Err(ValidationError::MissingField("summary"))
        );
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let mut entry = valid_entry();
        entry.annotation.keywords.clear();
        assert_eq!(validate(&entry), Err(ValidationError::EmptyKeywords));
    }

    #[test]
    fn test_url_requires_accessed() {
        let mut entry = valid_entry();
        entry.apa7.url = "https://example.com".to_string();
        assert_eq!(validate(&entry), Err(ValidationError::UrlWithoutAccessed));

        entry.apa7.accessed = "2026-08-25".to_string();
        assert_eq!(validate(&entry), Ok(()));
    }
}
