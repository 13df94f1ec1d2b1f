//! Read/write access to the YAML entry tree

use std::fs;
use std::path::{Path, PathBuf};

use incite_bibtex::Library;
use incite_domain::{new_id, segment_for, validate, Entry};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::StoreError;

/// Handle on one data root.
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn citations_dir(&self) -> PathBuf {
        self.root.join("citations")
    }

    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join("metadata")
    }

    /// The BibTeX mirror that shadows this store.
    pub fn library(&self) -> Library {
        Library::new(self.root.join("library.bib"))
    }

    /// Where an entry lives, given its current type and id.
    pub fn entry_path(&self, entry: &Entry) -> PathBuf {
        self.citations_dir()
            .join(segment_for(&entry.entry_type))
            .join(format!("{}.yaml", entry.id))
    }

    /// Validate and persist one entry, then refresh its mirror record.
    ///
    /// A blank id is assigned here. Returns the file the entry landed at.
    /// The mirror refresh is a second, separate file operation; if it
    /// fails the YAML tree is ahead of the mirror until the next write or
    /// a rebuild.
    pub fn write(&self, entry: &mut Entry) -> Result<PathBuf, StoreError> {
        self.write_inner(entry, None)
    }

    /// Like `write`, additionally stamping the mirror record with the data
    /// source the entry came from (doi, openlibrary, manual, ...).
    pub fn write_from(&self, entry: &mut Entry, source: &str) -> Result<PathBuf, StoreError> {
        self.write_inner(entry, Some(source))
    }

    fn write_inner(&self, entry: &mut Entry, source: Option<&str>) -> Result<PathBuf, StoreError> {
        if entry.id.trim().is_empty() {
            entry.id = new_id();
        }
        validate(entry)?;

        let path = self.entry_path(entry);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, serde_yaml::to_string(entry)?)?;
        debug!(id = %entry.id, path = %path.display(), "entry written");

        let library = self.library();
        match source {
            Some(source) => library.update_from(entry, source)?,
            None => library.update(entry)?,
        }
        Ok(path)
    }

    /// Every entry in the store.
    ///
    /// The first unparsable or invalid file fails the whole call: callers
    /// always see a fully valid corpus or none at all.
    pub fn read_all(&self) -> Result<Vec<Entry>, StoreError> {
        Ok(self
            .read_all_with_paths()?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }

    /// Every entry paired with the file it was read from, in stable
    /// (path-sorted) order.
    pub fn read_all_with_paths(&self) -> Result<Vec<(PathBuf, Entry)>, StoreError> {
        let citations = self.citations_dir();
        if !citations.exists() {
            return Ok(Vec::new());
        }
        let mut corpus = Vec::new();
        for file in WalkDir::new(&citations).sort_by_file_name() {
            let file = file.map_err(std::io::Error::from)?;
            if !file.file_type().is_file() {
                continue;
            }
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let text = fs::read_to_string(path)?;
            let entry: Entry =
                serde_yaml::from_str(&text).map_err(|err| StoreError::Corrupt {
                    path: path.to_path_buf(),
                    detail: err.to_string(),
                })?;
            validate(&entry).map_err(|source| StoreError::Invalid {
                path: path.to_path_buf(),
                source,
            })?;
            corpus.push((path.to_path_buf(), entry));
        }
        Ok(corpus)
    }

    /// Find the file for an id without knowing its segment.
    ///
    /// Tries `citations/*/<id>.yaml`, then `citations/<id>.yaml`, then a
    /// full walk comparing basenames case-insensitively.
    pub fn locate(&self, id: &str) -> Result<PathBuf, StoreError> {
        let citations = self.citations_dir();

        let pattern = citations.join("*").join(format!("{id}.yaml"));
        if let Ok(matches) = glob::glob(&pattern.to_string_lossy()) {
            if let Some(path) = matches.flatten().find(|p| p.is_file()) {
                return Ok(path);
            }
        }

        let flat = citations.join(format!("{id}.yaml"));
        if flat.is_file() {
            return Ok(flat);
        }

        let wanted = format!("{id}.yaml");
        if citations.exists() {
            for file in WalkDir::new(&citations).sort_by_file_name() {
                let file = file.map_err(std::io::Error::from)?;
                if file.file_type().is_file()
                    && file.file_name().to_string_lossy().eq_ignore_ascii_case(&wanted)
                {
                    return Ok(file.into_path());
                }
            }
        }
        Err(StoreError::NotFound(id.to_string()))
    }
}
