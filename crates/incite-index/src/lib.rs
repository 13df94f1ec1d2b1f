//! Derived lookup indices
//!
//! Five pure projections over the entry corpus, each serialized to one
//! JSON file under `metadata/`. The indices are disposable: never edited
//! by hand, always rebuilt in full from the YAML corpus. Map values are
//! sorted and deduplicated so rebuilds are byte-stable.

mod error;
mod index;
mod tokens;

pub use error::IndexError;
pub use index::{
    author_index, doi_index, isbn_index, keyword_index, title_index, write_indices,
};
