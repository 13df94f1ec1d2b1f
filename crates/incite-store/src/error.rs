//! Store and editor error type

use std::path::PathBuf;

use incite_bibtex::BibtexError;
use incite_domain::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An on-disk entry that fails validation poisons the whole corpus.
    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },

    /// Unparsable YAML. Aborts the call that hit it; no partial results.
    #[error("{}: {detail}", .path.display())]
    Corrupt { path: PathBuf, detail: String },

    #[error("no entry file found for id '{0}'")]
    NotFound(String),

    /// The id is immutable; edits that touch it are rejected up front.
    #[error("refusing to edit '{0}'")]
    Guard(String),

    #[error("bad assignment path '{0}'")]
    BadPath(String),

    /// A replacement value the entry shape cannot hold. The file is left
    /// as it was.
    #[error("bad assignment value: {0}")]
    BadValue(String),

    #[error(transparent)]
    Bibtex(#[from] BibtexError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
