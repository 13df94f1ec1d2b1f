//! Mapping between entries and mirror records
//!
//! `record_from_entry` is the live write path. The inverse direction is a
//! migration/testing aid only; the YAML store stays the read path of
//! record.

use std::collections::BTreeSet;

use incite_domain::{parse_name, slugify, Author, Entry};

use crate::record::{BibRecord, RecordKind};

/// Build the mirror record for one entry.
///
/// The cite key is the id lowercased with hyphens stripped, or a
/// title+year slug while no id has been assigned yet. `_id` and `_type`
/// always ride along so the mapping stays invertible.
pub fn record_from_entry(entry: &Entry) -> BibRecord {
    let kind = RecordKind::from_str(&entry.entry_type);
    let mut record = BibRecord::new(kind, cite_key(entry));

    let authors: Vec<String> = entry
        .apa7
        .authors
        .iter()
        .map(Author::bibtex_name)
        .filter(|name| !name.is_empty())
        .collect();
    record.set("author", authors.join(" and "));
    record.set("title", &entry.apa7.title);

    // bibtex_url, when set, overrides url in the mirror
    let link = if entry.apa7.bibtex_url.trim().is_empty() {
        &entry.apa7.url
    } else {
        &entry.apa7.bibtex_url
    };

    match kind {
        RecordKind::Article => {
            let journal = if entry.apa7.journal.is_empty() {
                &entry.apa7.container_title
            } else {
                &entry.apa7.journal
            };
            record.set("journal", journal);
            record.set("volume", &entry.apa7.volume);
            record.set("number", &entry.apa7.issue);
            record.set("pages", &entry.apa7.pages);
            record.set("doi", &entry.apa7.doi);
            record.set("url", link);
        }
        RecordKind::Book => {
            record.set("publisher", &entry.apa7.publisher);
            record.set("address", &entry.apa7.publisher_location);
            record.set("edition", &entry.apa7.edition);
            record.set("isbn", &entry.apa7.isbn);
            record.set("doi", &entry.apa7.doi);
            record.set("url", link);
        }
        RecordKind::Misc => {
            // fallback chain: the link fields collapse into howpublished
            let howpublished = if link.trim().is_empty() {
                &entry.apa7.doi
            } else {
                link
            };
            record.set("howpublished", howpublished);
        }
    }

    if let Some(year) = entry.apa7.year {
        record.set("year", year.to_string());
    }
    record.set("date", &entry.apa7.date);
    record.set("abstract", &entry.annotation.summary);
    record.set("keywords", entry.annotation.keywords.join(", "));
    record.set("_id", &entry.id);
    record.set("_type", &entry.entry_type);
    record
}

fn cite_key(entry: &Entry) -> String {
    if entry.id.trim().is_empty() {
        slugify(&entry.apa7.title, entry.year_hint())
    } else {
        entry.id.to_lowercase().replace('-', "")
    }
}

/// Rebuild an entry from a mirror record.
///
/// Without a `_type` field the record kind decides: misc records restore
/// as websites, since "misc" is not a storable entry type.
pub fn entry_from_record(record: &BibRecord) -> Entry {
    let entry_type = match record.get("_type") {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => match record.kind {
            RecordKind::Article => "article".to_string(),
            RecordKind::Book => "book".to_string(),
            RecordKind::Misc => "website".to_string(),
        },
    };
    let mut entry = Entry::new(entry_type, record.get("title").unwrap_or(""));
    entry.id = field(record, "_id");

    if let Some(names) = record.get("author") {
        entry.apa7.authors = names
            .split(" and ")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(parse_name)
            .collect();
    }

    entry.apa7.journal = field(record, "journal");
    entry.apa7.volume = field(record, "volume");
    entry.apa7.issue = field(record, "number");
    entry.apa7.pages = field(record, "pages");
    entry.apa7.publisher = field(record, "publisher");
    entry.apa7.publisher_location = field(record, "address");
    entry.apa7.edition = field(record, "edition");
    entry.apa7.isbn = field(record, "isbn");
    entry.apa7.doi = field(record, "doi");
    entry.apa7.url = field(record, "url");
    entry.apa7.date = field(record, "date");
    entry.apa7.year = record.get("year").and_then(|y| y.trim().parse().ok());

    // a misc record keeps its link in howpublished
    if entry.apa7.url.is_empty() {
        let howpublished = field(record, "howpublished");
        if howpublished.starts_with("http://") || howpublished.starts_with("https://") {
            entry.apa7.url = howpublished;
        } else if entry.apa7.doi.is_empty() {
            entry.apa7.doi = howpublished;
        }
    }

    entry.annotation.summary = field(record, "abstract");
    if let Some(keywords) = record.get("keywords") {
        let unique: BTreeSet<String> = keywords
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        entry.annotation.keywords = unique.into_iter().collect();
    }
    entry
}

/// Rebuild entries from a whole record set, in record order.
pub fn entries_from_records(records: &[BibRecord]) -> Vec<Entry> {
    records.iter().map(entry_from_record).collect()
}

fn field(record: &BibRecord, name: &str) -> String {
    record.get(name).unwrap_or("").to_string()
}
