//! Entry store: one YAML document per entry, mirrored into BibTeX
//!
//! The store owns the on-disk layout under one data root:
//!
//! ```text
//! <root>/citations/<segment>/<uuid>.yaml   one entry per file
//! <root>/library.bib                       consolidated mirror
//! <root>/metadata/*.json                   derived indices
//! ```
//!
//! Writes go entry -> validate -> YAML file -> mirror upsert. Reads walk
//! the whole tree and hand back either a fully valid corpus or an error;
//! downstream consumers never see a partial set.

mod editor;
mod error;
mod store;

pub use editor::{edit, EditOutcome};
pub use error::StoreError;
pub use store::Store;
