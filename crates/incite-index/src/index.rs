//! The five index builders and the JSON writer

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use incite_domain::{Entry, EntryType};
use serde::Serialize;
use tracing::debug;

use crate::error::IndexError;
use crate::tokens::{tokenize, url_host};

type Corpus = [(PathBuf, Entry)];

/// keyword/token -> entry files. The broadest index: explicit keywords,
/// summary and title words, publisher and journal (whole phrase plus
/// words), the year, the URL host (with and without `www.`), and the
/// entry type itself.
pub fn keyword_index(corpus: &Corpus) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (path, entry) in corpus {
        let file = path.display().to_string();
        let mut add = |token: String| {
            if token.chars().count() >= 2 {
                index.entry(token).or_default().insert(file.clone());
            }
        };

        for keyword in &entry.annotation.keywords {
            add(keyword.trim().to_lowercase());
        }
        for token in tokenize(&entry.annotation.summary) {
            add(token);
        }
        for token in tokenize(&entry.apa7.title) {
            add(token);
        }
        for phrase in [
            &entry.apa7.publisher,
            &entry.apa7.journal,
            &entry.apa7.container_title,
        ] {
            add(phrase.trim().to_lowercase());
            for token in tokenize(phrase) {
                add(token);
            }
        }
        if let Some(year) = entry.year_hint() {
            add(year.to_string());
        }
        if let Some(host) = url_host(&entry.apa7.url) {
            if let Some(bare) = host.strip_prefix("www.") {
                add(bare.to_string());
            }
            add(host);
        }
        add(entry.entry_type.to_lowercase());
    }
    finish(index)
}

/// `"Family, Given"` -> entry files.
pub fn author_index(corpus: &Corpus) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (path, entry) in corpus {
        let file = path.display().to_string();
        for author in &entry.apa7.authors {
            let name = author.bibtex_name();
            if !name.is_empty() {
                index.entry(name).or_default().insert(file.clone());
            }
        }
    }
    finish(index)
}

/// title word -> entry files.
pub fn title_index(corpus: &Corpus) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (path, entry) in corpus {
        let file = path.display().to_string();
        for token in tokenize(&entry.apa7.title) {
            index.entry(token).or_default().insert(file.clone());
        }
    }
    finish(index)
}

/// entry file -> ISBN, books only. The type string is matched the way the
/// store does, so `Book` and `book` both count.
pub fn isbn_index(corpus: &Corpus) -> BTreeMap<String, String> {
    corpus
        .iter()
        .filter(|(_, entry)| {
            EntryType::from_str(&entry.entry_type) == Some(EntryType::Book)
                && !entry.apa7.isbn.trim().is_empty()
        })
        .map(|(path, entry)| (path.display().to_string(), entry.apa7.isbn.clone()))
        .collect()
}

/// entry file -> DOI, any entry type.
pub fn doi_index(corpus: &Corpus) -> BTreeMap<String, String> {
    corpus
        .iter()
        .filter(|(_, entry)| !entry.apa7.doi.trim().is_empty())
        .map(|(path, entry)| (path.display().to_string(), entry.apa7.doi.clone()))
        .collect()
}

/// Build all five indices and write them under `dir` (usually the store's
/// `metadata/` directory), replacing whatever was there.
pub fn write_indices(dir: &Path, corpus: &Corpus) -> Result<(), IndexError> {
    fs::create_dir_all(dir)?;
    write_json(&dir.join("keywords.json"), &keyword_index(corpus))?;
    write_json(&dir.join("authors.json"), &author_index(corpus))?;
    write_json(&dir.join("titles.json"), &title_index(corpus))?;
    write_json(&dir.join("isbn.json"), &isbn_index(corpus))?;
    write_json(&dir.join("doi.json"), &doi_index(corpus))?;
    debug!(dir = %dir.display(), entries = corpus.len(), "indices rebuilt");
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), IndexError> {
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn finish(index: BTreeMap<String, BTreeSet<String>>) -> BTreeMap<String, Vec<String>> {
    index
        .into_iter()
        .map(|(key, files)| (key, files.into_iter().collect()))
        .collect()
}
