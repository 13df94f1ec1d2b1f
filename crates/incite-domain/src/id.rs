//! Entry ids and filename slugs

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Canonical lowercase UUIDv4: version nibble 4, variant bits 10xx.
    static ref CANONICAL_ID: Regex = Regex::new(
        "^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$"
    )
    .unwrap();
}

/// Mint a fresh entry id: a random UUIDv4 in canonical hyphenated form.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// True when `id` is a canonical lowercase UUIDv4.
pub fn is_canonical_id(id: &str) -> bool {
    CANONICAL_ID.is_match(id)
}

/// Filename-safe slug from a title and optional year.
///
/// Lowercases, collapses every non-alphanumeric run to a single `-`, trims
/// leading/trailing dashes, and appends `-<year>` when a year is given.
pub fn slugify(title: &str, year: Option<i64>) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut dash_pending = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if dash_pending && !slug.is_empty() {
                slug.push('-');
            }
            dash_pending = false;
            slug.extend(c.to_lowercase());
        } else {
            dash_pending = true;
        }
    }
    if let Some(year) = year {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&year.to_string());
    }
    slug
}
