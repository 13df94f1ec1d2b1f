//! Codec and mirror error type

/// Failure while parsing or rewriting the BibTeX mirror.
///
/// Parse failures are corruption: the whole call aborts, no partial record
/// set is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum BibtexError {
    #[error("bibtex syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    #[error("unexpected end of input at byte {0}")]
    UnexpectedEof(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BibtexError {
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            message: message.into(),
        }
    }
}
