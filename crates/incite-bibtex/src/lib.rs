//! BibTeX codec and mirror library
//!
//! This crate owns the consolidated `library.bib` mirror of the record
//! store:
//! - a tokenizer with an explicit lexical vocabulary (comment, `@`,
//!   identifier, delimiters, `=`, `,`, delimited string, bare run)
//! - a recursive-descent parser that aborts on the first corrupt record
//! - a deterministic renderer (canonical field order, stable escaping)
//! - the Entry ↔ BibRecord mapping with type-specific field sets
//! - the mirror itself: replace-by-id upsert, full re-sort, rebuild
//!
//! The mirror is derived state. The YAML store is the read path of record;
//! `entries_from_records` exists for migration and tests only.

mod convert;
mod error;
mod library;
mod parser;
mod record;
mod render;
mod scan;

pub use convert::{entries_from_records, entry_from_record, record_from_entry};
pub use error::BibtexError;
pub use library::Library;
pub use parser::parse;
pub use record::{BibRecord, RecordKind};
pub use render::{render_library, render_record};
