//! Scored boolean queries over the entry corpus
//!
//! Two front doors share one scoring core: `search` takes a `&&`-joined
//! expression string (`keyword==a,b && year>=2020 && title~=loops`), and
//! `search_flags` takes up to five independent field filters. Every term
//! must pass for an entry to match; passing terms add to its score, and
//! results come back ranked. `render_table` turns a result set into the
//! fixed-width listing the CLI prints.

mod error;
mod search;
mod table;
mod term;

pub use error::QueryError;
pub use search::{search, search_flags, Filters, Match};
pub use table::render_table;
