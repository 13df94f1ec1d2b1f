//! Query evaluation and ranking

use std::path::{Path, PathBuf};

use incite_domain::Entry;

use crate::error::QueryError;
use crate::term::{compile, Term, TextField};

/// One ranked result, borrowing from the corpus it was searched over.
#[derive(Debug)]
pub struct Match<'a> {
    pub score: i64,
    pub path: &'a Path,
    pub entry: &'a Entry,
}

/// Independent field filters, the flag-style front door. Only supplied
/// fields participate; all supplied fields must match.
#[derive(Debug, Default, Clone)]
pub struct Filters {
    /// Comma-separated keywords, all required. Filters without scoring.
    pub keyword: Option<String>,
    /// `*`-wildcard author pattern.
    pub author: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Matched against the whole serialized record.
    pub all: Option<String>,
}

/// Evaluate a `&&`-joined expression against the corpus.
///
/// Every term must pass; an entry's score is the sum over its terms.
/// Results are ordered best-first, ties broken by id so the order is
/// stable across runs.
pub fn search<'a>(
    expression: &str,
    corpus: &'a [(PathBuf, Entry)],
) -> Result<Vec<Match<'a>>, QueryError> {
    let terms = compile(expression)?;
    let mut matches = Vec::new();
    for (path, entry) in corpus {
        if let Some(score) = score_all(&terms, entry) {
            matches.push(Match { score, path, entry });
        }
    }
    rank(&mut matches);
    Ok(matches)
}

/// Evaluate independent field filters against the corpus.
///
/// The keyword filter gates without scoring; when it is the only thing
/// that matched, the score floors to 1 so the match stays visible.
pub fn search_flags<'a>(
    filters: &Filters,
    corpus: &'a [(PathBuf, Entry)],
) -> Result<Vec<Match<'a>>, QueryError> {
    let keyword = match filters.keyword.as_deref() {
        Some(list) => Some(Term::keywords(list)?),
        None => None,
    };
    let mut scored = Vec::new();
    if let Some(pattern) = filters.author.as_deref() {
        scored.push(Term::author(pattern)?);
    }
    if let Some(text) = filters.title.as_deref() {
        scored.push(Term::text(TextField::Title, text)?);
    }
    if let Some(text) = filters.summary.as_deref() {
        scored.push(Term::text(TextField::Summary, text)?);
    }
    if let Some(text) = filters.all.as_deref() {
        scored.push(Term::text(TextField::All, text)?);
    }
    if keyword.is_none() && scored.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for (path, entry) in corpus {
        if let Some(gate) = &keyword {
            if gate.score(entry).is_none() {
                continue;
            }
        }
        let Some(mut score) = score_all(&scored, entry) else {
            continue;
        };
        if score == 0 && keyword.is_some() {
            score = 1;
        }
        matches.push(Match { score, path, entry });
    }
    rank(&mut matches);
    Ok(matches)
}

fn score_all(terms: &[Term], entry: &Entry) -> Option<i64> {
    let mut total = 0;
    for term in terms {
        total += term.score(entry)?;
    }
    Some(total)
}

fn rank(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entry.id.cmp(&b.entry.id))
    });
}
