//! Query terms and the expression compiler

use std::collections::BTreeSet;

use incite_domain::Entry;
use regex::{Regex, RegexBuilder};

use crate::error::QueryError;

/// One compiled term of a query. Every term both filters and scores:
/// `score` returns `None` when the entry is excluded.
pub(crate) enum Term {
    /// All listed keywords must be present; +5 per keyword.
    Keywords(Vec<String>),
    /// Any author matching the anchored pattern; +7.
    Author(Regex),
    /// Numeric compare against the explicit year or the date prefix; +1.
    /// Entries without either are excluded.
    Year { op: Cmp, value: i64 },
    /// Occurrence counts of each query token, weighted by field.
    Text { field: TextField, tokens: Vec<String> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cmp {
    Eq,
    Ge,
    Le,
    Gt,
    Lt,
}

impl Cmp {
    fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Cmp::Eq => lhs == rhs,
            Cmp::Ge => lhs >= rhs,
            Cmp::Le => lhs <= rhs,
            Cmp::Gt => lhs > rhs,
            Cmp::Lt => lhs < rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextField {
    Title,
    Summary,
    All,
}

impl TextField {
    fn weight(self) -> i64 {
        match self {
            TextField::Title => 3,
            TextField::Summary => 2,
            TextField::All => 1,
        }
    }
}

impl Term {
    /// Comma-separated keyword list, all required.
    pub(crate) fn keywords(list: &str) -> Result<Self, QueryError> {
        let keywords: Vec<String> = list
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(QueryError::UnknownTerm(list.to_string()));
        }
        Ok(Term::Keywords(keywords))
    }

    /// `*`-wildcard pattern over `"Family, Given"`, anchored at both ends
    /// and case-insensitive.
    pub(crate) fn author(pattern: &str) -> Result<Self, QueryError> {
        let escaped = regex::escape(pattern.trim()).replace("\\*", ".*");
        let regex = RegexBuilder::new(&format!("^{escaped}$"))
            .case_insensitive(true)
            .build()?;
        Ok(Term::Author(regex))
    }

    /// Whitespace-separated tokens counted in the given field.
    pub(crate) fn text(field: TextField, input: &str) -> Result<Self, QueryError> {
        let tokens: Vec<String> = input.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return Err(QueryError::UnknownTerm(input.to_string()));
        }
        Ok(Term::Text { field, tokens })
    }

    /// `Some(points)` when the entry passes this term, `None` when the
    /// term excludes it.
    pub(crate) fn score(&self, entry: &Entry) -> Option<i64> {
        match self {
            Term::Keywords(required) => {
                let have: BTreeSet<String> = entry
                    .annotation
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .collect();
                if required.iter().all(|k| have.contains(k)) {
                    Some(5 * required.len() as i64)
                } else {
                    None
                }
            }
            Term::Author(regex) => entry
                .apa7
                .authors
                .iter()
                .any(|author| regex.is_match(&author.bibtex_name()))
                .then_some(7),
            Term::Year { op, value } => {
                let year = entry.year_hint()?;
                op.holds(year, *value).then_some(1)
            }
            Term::Text { field, tokens } => {
                let text = match field {
                    TextField::Title => entry.apa7.title.to_lowercase(),
                    TextField::Summary => entry.annotation.summary.to_lowercase(),
                    TextField::All => snapshot(entry).to_lowercase(),
                };
                let hits: usize = tokens
                    .iter()
                    .map(|token| text.matches(token.as_str()).count())
                    .sum();
                (hits > 0).then_some(field.weight() * hits as i64)
            }
        }
    }
}

/// The whole record as searchable text, for `all~=`.
fn snapshot(entry: &Entry) -> String {
    serde_yaml::to_string(entry).unwrap_or_default()
}

/// Split an expression on `&&` and compile each piece.
pub(crate) fn compile(expression: &str) -> Result<Vec<Term>, QueryError> {
    expression.split("&&").map(compile_term).collect()
}

/// Try the term shapes in order: `keyword==`/`author==`/`year==`, then
/// `~=` text matches, then year/date inequalities. Anything left over is a
/// hard error.
fn compile_term(raw: &str) -> Result<Term, QueryError> {
    let term = raw.trim();

    if let Some((lhs, rhs)) = term.split_once("==") {
        match lhs.trim() {
            "keyword" => {
                return Term::keywords(rhs).map_err(|_| QueryError::UnknownTerm(term.to_string()))
            }
            "author" => return Term::author(rhs),
            "year" | "date" => return year_term(term, Cmp::Eq, rhs),
            _ => {}
        }
    }

    if let Some((lhs, rhs)) = term.split_once("~=") {
        let field = match lhs.trim() {
            "title" => Some(TextField::Title),
            "summary" => Some(TextField::Summary),
            "all" => Some(TextField::All),
            _ => None,
        };
        if let Some(field) = field {
            return Term::text(field, rhs).map_err(|_| QueryError::UnknownTerm(term.to_string()));
        }
    }

    for (symbol, op) in [(">=", Cmp::Ge), ("<=", Cmp::Le), (">", Cmp::Gt), ("<", Cmp::Lt)] {
        if let Some((lhs, rhs)) = term.split_once(symbol) {
            if matches!(lhs.trim(), "year" | "date") {
                return year_term(term, op, rhs);
            }
        }
    }

    Err(QueryError::UnknownTerm(term.to_string()))
}

fn year_term(term: &str, op: Cmp, rhs: &str) -> Result<Term, QueryError> {
    match rhs.trim().parse::<i64>() {
        Ok(value) => Ok(Term::Year { op, value }),
        Err(_) => Err(QueryError::UnknownTerm(term.to_string())),
    }
}
