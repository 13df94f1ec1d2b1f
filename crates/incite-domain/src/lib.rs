//! Domain types for the incite record store
//!
//! This crate provides the canonical data model shared by the store, the
//! BibTeX codec, the indexer and the query engine:
//! - Entry: one citation record (id, type, APA7 block, annotation block)
//! - Author: normalized family/given name pair with a tolerant decoder
//! - EntryType: the closed set of entry types and their directory segments
//! - validate: the hard invariants every stored entry satisfies
//! - id helpers: UUIDv4 minting, canonical-form checks, title slugs

pub mod author;
pub mod entry;
pub mod entry_type;
pub mod id;
pub mod validation;

pub use author::{parse_name, Author};
pub use entry::{Annotation, Apa7, Entry};
pub use entry_type::{segment_for, EntryType};
pub use id::{is_canonical_id, new_id, slugify};
pub use validation::{validate, ValidationError};
