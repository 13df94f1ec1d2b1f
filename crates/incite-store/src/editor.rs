//! Structural editor: dot-path patches over the raw YAML tree
//!
//! Edits are applied to the parse tree rather than the typed struct, so
//! every field an assignment does not touch keeps its current value. The
//! patched tree is then decoded, validated, and written back through the
//! store, which relocates the file when the entry's type changed segment.

use std::fs;
use std::path::PathBuf;

use incite_domain::{validate, Entry};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::StoreError;
use crate::store::Store;

/// What an edit call did.
#[derive(Debug)]
pub enum EditOutcome {
    /// No assignments were given: the file's exact bytes, untouched.
    Shown { path: PathBuf, raw: String },
    /// The entry was rewritten. `moved_from` is set when a type change
    /// relocated the file to a different segment.
    Updated {
        path: PathBuf,
        moved_from: Option<PathBuf>,
    },
}

/// Apply dot-path assignments to one entry's YAML document.
///
/// Each assignment maps a path like `apa7.publisher` to a raw replacement
/// string; the string is parsed as YAML where possible (lists, numbers,
/// nested maps) and kept as a plain scalar otherwise. Assignments that
/// touch `id` are rejected before anything is modified, and a replacement
/// value the entry shape cannot hold fails without touching the file.
pub fn edit(
    store: &Store,
    id: &str,
    assignments: &[(String, String)],
) -> Result<EditOutcome, StoreError> {
    let original = store.locate(id)?;
    let raw = fs::read_to_string(&original)?;

    if assignments.is_empty() {
        return Ok(EditOutcome::Shown {
            path: original,
            raw,
        });
    }

    for (path, _) in assignments {
        if path == "id" || path.starts_with("id.") {
            return Err(StoreError::Guard(path.clone()));
        }
    }

    let tree: Value = serde_yaml::from_str(&raw).map_err(|err| StoreError::Corrupt {
        path: original.clone(),
        detail: err.to_string(),
    })?;
    // decode failures after this point are the patch's fault, not the file's
    serde_yaml::from_value::<Entry>(tree.clone()).map_err(|err| StoreError::Corrupt {
        path: original.clone(),
        detail: err.to_string(),
    })?;
    let mut root = match tree {
        Value::Mapping(map) => map,
        _ => Mapping::new(),
    };
    for (path, value) in assignments {
        assign(&mut root, path, value)?;
    }

    let mut entry: Entry = serde_yaml::from_value(Value::Mapping(root))
        .map_err(|err| StoreError::BadValue(err.to_string()))?;
    fill_accessed(&mut entry);
    validate(&entry)?;

    let path = store.write(&mut entry)?;
    if path == original {
        Ok(EditOutcome::Updated {
            path,
            moved_from: None,
        })
    } else {
        debug!(from = %original.display(), to = %path.display(), "entry relocated");
        fs::remove_file(&original)?;
        Ok(EditOutcome::Updated {
            path,
            moved_from: Some(original),
        })
    }
}

/// Set one dotted path in the tree, creating intermediate mappings as
/// needed. An existing non-mapping node at an interior position is
/// overwritten with an empty mapping.
fn assign(root: &mut Mapping, dotted: &str, raw: &str) -> Result<(), StoreError> {
    let segments: Vec<&str> = dotted.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(StoreError::BadPath(dotted.to_string()));
    }
    let mut current = root;
    for segment in &segments[..segments.len() - 1] {
        current = descend(current, segment);
    }
    let leaf = segments[segments.len() - 1];
    current.insert(Value::String(leaf.to_string()), parse_scalar(raw));
    Ok(())
}

fn descend<'a>(map: &'a mut Mapping, key: &str) -> &'a mut Mapping {
    let slot = map
        .entry(Value::String(key.to_string()))
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    if !matches!(slot, Value::Mapping(_)) {
        *slot = Value::Mapping(Mapping::new());
    }
    match slot {
        Value::Mapping(child) => child,
        _ => unreachable!(),
    }
}

/// Parse a replacement value as YAML, falling back to a string scalar.
/// This is what lets `annotation.keywords = [a, b]` build a real list.
fn parse_scalar(raw: &str) -> Value {
    match serde_yaml::from_str(raw) {
        Ok(value) => value,
        Err(_) => Value::String(raw.to_string()),
    }
}

/// An entry that gained a url needs an access date; stamp today's when the
/// field is still blank.
fn fill_accessed(entry: &mut Entry) {
    if !entry.apa7.url.trim().is_empty() && entry.apa7.accessed.trim().is_empty() {
        entry.apa7.accessed = chrono::Local::now().format("%Y-%m-%d").to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
        map.get(key)
    }

    #[test]
    fn test_assign_nested_path() {
        let mut root = Mapping::new();
        assign(&mut root, "apa7.publisher", "Acme Press").unwrap();
        let apa7 = match get(&root, "apa7") {
            Some(Value::Mapping(m)) => m,
            other => panic!("expected mapping, got {other:?}"),
        };
        assert_eq!(
            get(apa7, "publisher"),
            Some(&Value::String("Acme Press".to_string()))
        );
    }

    #[test]
    fn test_assign_parses_yaml_values() {
        let mut root = Mapping::new();
        assign(&mut root, "annotation.keywords", "[a, b]").unwrap();
        assign(&mut root, "apa7.year", "2024").unwrap();
        let annotation = match get(&root, "annotation") {
            Some(Value::Mapping(m)) => m,
            other => panic!("expected mapping, got {other:?}"),
        };
        assert!(matches!(
            get(annotation, "keywords"),
            Some(Value::Sequence(items)) if items.len() == 2
        ));
        let apa7 = match get(&root, "apa7") {
            Some(Value::Mapping(m)) => m,
            other => panic!("expected mapping, got {other:?}"),
        };
        assert_eq!(get(apa7, "year"), Some(&Value::Number(2024.into())));
    }

    #[test]
    fn test_assign_coerces_scalar_intermediate() {
        let mut root = Mapping::new();
        root.insert(
            Value::String("apa7".to_string()),
            Value::String("not a map".to_string()),
        );
        assign(&mut root, "apa7.title", "T").unwrap();
        assert!(matches!(get(&root, "apa7"), Some(Value::Mapping(_))));
    }

    #[test]
    fn test_assign_rejects_empty_segments() {
        let mut root = Mapping::new();
        assert!(matches!(
            assign(&mut root, "apa7..title", "T"),
            Err(StoreError::BadPath(_))
        ));
        assert!(matches!(
            assign(&mut root, ".title", "T"),
            Err(StoreError::BadPath(_))
        ));
    }

    #[test]
    fn test_parse_scalar_falls_back_to_string() {
        assert_eq!(
            parse_scalar("[unclosed"),
            Value::String("[unclosed".to_string())
        );
        assert!(matches!(parse_scalar("true"), Value::Bool(true)));
    }
}
