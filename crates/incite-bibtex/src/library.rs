//! The consolidated mirror file
//!
//! One record per entry, kept in a stable total order so rewrites produce
//! deterministic diffs. Every write re-renders the whole file in a single
//! call; there is no in-place patching.

use std::fs;
use std::path::{Path, PathBuf};

use incite_domain::Entry;
use tracing::debug;

use crate::convert::record_from_entry;
use crate::error::BibtexError;
use crate::parser::parse;
use crate::record::BibRecord;
use crate::render::render_library;

pub struct Library {
    path: PathBuf,
}

impl Library {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the mirror. A missing or empty file is an empty
    /// library; a corrupt file fails the whole call.
    pub fn load(&self) -> Result<Vec<BibRecord>, BibtexError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        parse(&text)
    }

    /// Replace the record whose `_id` matches (case-insensitively), or
    /// append when none does, then rewrite the sorted file.
    ///
    /// A record without an `_id` can never match and is always appended.
    pub fn upsert(&self, record: BibRecord) -> Result<(), BibtexError> {
        let mut records = self.load()?;
        let id = record.id().unwrap_or("");
        let existing = if id.is_empty() {
            None
        } else {
            records
                .iter()
                .position(|r| r.id().is_some_and(|other| other.eq_ignore_ascii_case(id)))
        };
        match existing {
            Some(i) => records[i] = record,
            None => records.push(record),
        }
        self.write(records)
    }

    /// Mirror one entry.
    pub fn update(&self, entry: &Entry) -> Result<(), BibtexError> {
        self.upsert(record_from_entry(entry))
    }

    /// Mirror one entry, stamping the data source it came from.
    pub fn update_from(&self, entry: &Entry, source: &str) -> Result<(), BibtexError> {
        let mut record = record_from_entry(entry);
        record.set("_source", source);
        self.upsert(record)
    }

    /// Throw the current mirror away and re-derive it from the given
    /// entries. Mirror-only fields such as `_source` do not survive this.
    pub fn rebuild(&self, entries: &[Entry]) -> Result<(), BibtexError> {
        self.write(entries.iter().map(record_from_entry).collect())
    }

    fn write(&self, mut records: Vec<BibRecord>) -> Result<(), BibtexError> {
        records.sort_by_key(BibRecord::sort_key);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!(path = %self.path.display(), records = records.len(), "rewriting mirror");
        fs::write(&self.path, render_library(&records))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(id: &str, title: &str) -> Entry {
        let mut entry = Entry::new("website", title);
        entry.id = id.to_string();
        entry.apa7.url = format!("https://example.com/{id}");
        entry
    }

    fn library(dir: &TempDir) -> Library {
        Library::new(dir.path().join("library.bib"))
    }

    const ID_A: &str = "0c7e0d2e-6c3f-4d41-8f2a-0b6f6f3b5a10";
    const ID_B: &str = "6f1b24c8-33a1-4f59-9b1d-9a4c2b7f0e11";

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(library(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn test_update_appends_then_replaces() {
        let dir = TempDir::new().unwrap();
        let lib = library(&dir);

        lib.update(&entry(ID_A, "First Title")).unwrap();
        lib.update(&entry(ID_B, "Another")).unwrap();
        assert_eq!(lib.load().unwrap().len(), 2);

        // same id again: replaced, not duplicated
        lib.update(&entry(ID_A, "Second Title")).unwrap();
        let records = lib.load().unwrap();
        assert_eq!(records.len(), 2);
        let replaced = records
            .iter()
            .find(|r| r.id() == Some(ID_A))
            .unwrap();
        assert_eq!(replaced.get("title"), Some("Second Title"));
    }

    #[test]
    fn test_upsert_matches_id_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let lib = library(&dir);
        lib.update(&entry(ID_A, "Lower")).unwrap();

        let shouty = entry(&ID_A.to_uppercase(), "Upper");
        lib.update(&shouty).unwrap();
        assert_eq!(lib.load().unwrap().len(), 1);
    }

    #[test]
    fn test_mirror_is_sorted_and_stable() {
        let dir = TempDir::new().unwrap();
        let lib = library(&dir);
        let mut book = Entry::new("book", "Aardvark Grooming");
        book.id = ID_B.to_string();
        lib.update(&book).unwrap();
        lib.update(&entry(ID_A, "Zebra Site")).unwrap();

        let text = fs::read_to_string(lib.path()).unwrap();
        // books sort before misc regardless of insertion or title order
        let book_at = text.find("@book").unwrap();
        let misc_at = text.find("@misc").unwrap();
        assert!(book_at < misc_at);

        lib.update(&entry(ID_A, "Zebra Site")).unwrap();
        assert_eq!(fs::read_to_string(lib.path()).unwrap(), text);
    }

    #[test]
    fn test_update_from_stamps_source() {
        let dir = TempDir::new().unwrap();
        let lib = library(&dir);
        lib.update_from(&entry(ID_A, "T"), "doi").unwrap();
        let records = lib.load().unwrap();
        assert_eq!(records[0].get("_source"), Some("doi"));
    }

    #[test]
    fn test_rebuild_drops_mirror_only_fields() {
        let dir = TempDir::new().unwrap();
        let lib = library(&dir);
        lib.update_from(&entry(ID_A, "T"), "doi").unwrap();
        lib.rebuild(&[entry(ID_A, "T")]).unwrap();
        let records = lib.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("_source"), None);
    }

    #[test]
    fn test_corrupt_mirror_fails_update() {
        let dir = TempDir::new().unwrap();
        let lib = library(&dir);
        fs::write(lib.path(), "@misc{bad, title = {unterminated").unwrap();
        assert!(lib.update(&entry(ID_A, "T")).is_err());
    }
}
