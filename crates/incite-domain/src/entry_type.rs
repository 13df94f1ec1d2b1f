//! The closed set of entry types and their directory segments

/// Entry type accepted by the store.
///
/// The set is closed: validation rejects anything outside it. Entries keep
/// the raw string on disk, so parsing is case-insensitive here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryType {
    Website,
    Book,
    Movie,
    Video,
    Song,
    Article,
    Patent,
    Report,
    Dataset,
    Software,
    Rfc,
}

impl EntryType {
    /// Every member of the closed set, in declaration order.
    pub const ALL: [EntryType; 11] = [
        Self::Website,
        Self::Book,
        Self::Movie,
        Self::Video,
        Self::Song,
        Self::Article,
        Self::Patent,
        Self::Report,
        Self::Dataset,
        Self::Software,
        Self::Rfc,
    ];

    /// Parse a type from a string (case-insensitive); `None` outside the set.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "website" => Some(Self::Website),
            "book" => Some(Self::Book),
            "movie" => Some(Self::Movie),
            "video" => Some(Self::Video),
            "song" => Some(Self::Song),
            "article" => Some(Self::Article),
            "patent" => Some(Self::Patent),
            "report" => Some(Self::Report),
            "dataset" => Some(Self::Dataset),
            "software" => Some(Self::Software),
            "rfc" => Some(Self::Rfc),
            _ => None,
        }
    }

    /// Canonical lowercase string for the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Book => "book",
            Self::Movie => "movie",
            Self::Video => "video",
            Self::Song => "song",
            Self::Article => "article",
            Self::Patent => "patent",
            Self::Report => "report",
            Self::Dataset => "dataset",
            Self::Software => "software",
            Self::Rfc => "rfc",
        }
    }

    /// Directory segment this type's YAML files live under.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Website => "site",
            Self::Book => "books",
            Self::Article => "article",
            Self::Movie => "movie",
            Self::Video => "video",
            Self::Song => "song",
            Self::Patent => "patent",
            Self::Rfc => "rfc",
            Self::Report | Self::Dataset | Self::Software => "citation",
        }
    }
}

/// Segment for a raw type string; anything outside the set falls into the
/// shared `citation` pool.
pub fn segment_for(type_str: &str) -> &'static str {
    EntryType::from_str(type_str)
        .map(|t| t.segment())
        .unwrap_or("citation")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(EntryType::from_str("book"), Some(EntryType::Book));
        assert_eq!(EntryType::from_str("Book"), Some(EntryType::Book));
        assert_eq!(EntryType::from_str("RFC"), Some(EntryType::Rfc));
        assert_eq!(EntryType::from_str("webpage"), None);
    }

    #[test]
    fn test_round_trip_all() {
        for t in EntryType::ALL {
            assert_eq!(EntryType::from_str(t.as_str()), Some(t));
        }
    }

    #[test]
    fn test_segments() {
        assert_eq!(segment_for("website"), "site");
        assert_eq!(segment_for("book"), "books");
        assert_eq!(segment_for("article"), "article");
        assert_eq!(segment_for("report"), "citation");
        assert_eq!(segment_for("dataset"), "citation");
        assert_eq!(segment_for("software"), "citation");
        assert_eq!(segment_for("not-a-type"), "citation");
    }
}
