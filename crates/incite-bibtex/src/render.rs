//! Writer for the consolidated mirror file
//!
//! Output is fully canonical (field order, escaping, spacing) so that two
//! renders of the same records are byte-identical and diffs stay small.

use crate::record::BibRecord;

/// Canonical field order. Fields not listed here follow, lexicographically.
const FIELD_ORDER: [&str; 19] = [
    "author",
    "title",
    "journal",
    "booktitle",
    "howpublished",
    "publisher",
    "address",
    "edition",
    "volume",
    "number",
    "pages",
    "year",
    "doi",
    "isbn",
    "url",
    "abstract",
    "keywords",
    "_id",
    "_type",
];

/// Escape a value for a braced field: literal braces are backslash-escaped
/// and line breaks become single spaces.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' | '\r' => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Render a single record in canonical form.
pub fn render_record(record: &BibRecord) -> String {
    let mut ordered: Vec<(&str, &str)> = Vec::with_capacity(record.fields.len());
    for name in FIELD_ORDER {
        if let Some(value) = record.fields.get(name) {
            ordered.push((name, value));
        }
    }
    for (name, value) in &record.fields {
        if !FIELD_ORDER.contains(&name.as_str()) {
            ordered.push((name, value));
        }
    }

    let mut out = String::new();
    out.push('@');
    out.push_str(record.kind.as_str());
    out.push('{');
    out.push_str(&record.key);
    out.push(',');
    out.push('\n');
    for (i, (name, value)) in ordered.iter().enumerate() {
        out.push_str("  ");
        out.push_str(name);
        out.push_str(" = {");
        out.push_str(&escape_value(value));
        out.push('}');
        if i + 1 < ordered.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// Render a whole record set, one blank line between records, trailing
/// newline at the end. An empty set renders as an empty string.
pub fn render_library(records: &[BibRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_record(record));
        out.push('\n');
    }
    out
}
