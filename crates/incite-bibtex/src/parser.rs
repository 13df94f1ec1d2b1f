//! Reader for the consolidated mirror file

use std::collections::BTreeMap;

use crate::error::BibtexError;
use crate::record::{BibRecord, RecordKind};
use crate::scan::{unescape, Scanner, Token};

/// Parse every record in `input`.
///
/// A record begins at `@`; tokens between records (stray text, comments)
/// are discarded. Any malformed record aborts the whole parse: a corrupt
/// mirror is surfaced, never silently truncated.
pub fn parse(input: &str) -> Result<Vec<BibRecord>, BibtexError> {
    let mut scanner = Scanner::new(input);
    let mut records = Vec::new();
    while let Some(token) = scanner.token() {
        if token == Token::At {
            records.push(parse_record(&mut scanner)?);
        }
    }
    Ok(records)
}

fn parse_record(scanner: &mut Scanner) -> Result<BibRecord, BibtexError> {
    let kind = match scanner.require()? {
        Token::Ident(name) => RecordKind::from_str(&name),
        _ => {
            return Err(BibtexError::syntax(
                scanner.pos(),
                "expected record kind after '@'",
            ))
        }
    };
    let (closer, closer_char) = match scanner.require()? {
        Token::LBrace => (Token::RBrace, '}'),
        Token::LParen => (Token::RParen, ')'),
        _ => {
            return Err(BibtexError::syntax(
                scanner.pos(),
                "expected '{' or '(' after record kind",
            ))
        }
    };

    // the cite key is optional; a keyless record keeps an empty one
    let mut next = scanner.require()?;
    let key = if let Token::Ident(text) | Token::Bare(text) = next {
        next = scanner.require()?;
        text
    } else {
        String::new()
    };

    let mut fields = BTreeMap::new();
    loop {
        // the key and each field are comma-terminated; repeated and
        // trailing commas are tolerated
        let name = match next {
            token if token == closer => break,
            Token::Comma => {
                next = scanner.require()?;
                continue;
            }
            Token::Ident(name) => name.to_lowercase(),
            _ => return Err(BibtexError::syntax(scanner.pos(), "expected field name")),
        };
        match scanner.require()? {
            Token::Equals => {}
            _ => {
                return Err(BibtexError::syntax(
                    scanner.pos(),
                    format!("expected '=' after field '{name}'"),
                ))
            }
        }
        let raw = match scanner.value(closer_char)? {
            Token::String(raw) | Token::Bare(raw) => raw,
            _ => return Err(BibtexError::syntax(scanner.pos(), "expected field value")),
        };
        fields.insert(name, unescape(&raw).trim().to_string());
        next = scanner.require()?;
    }
    Ok(BibRecord { kind, key, fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_record() {
        let input = "@article{smith2024,\n  author = {Smith, John},\n  title = {A Great Paper},\n  year = {2024}\n}\n";
        let records = parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::Article);
        assert_eq!(records[0].key, "smith2024");
        assert_eq!(records[0].get("author"), Some("Smith, John"));
        assert_eq!(records[0].get("year"), Some("2024"));
    }

    #[test]
    fn test_parse_skips_comments_and_garbage() {
        let input = "% header comment\nstray text\n@misc{a, title = {One}}\nin between\n@misc{b, title = {Two}}\n";
        let records = parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "a");
        assert_eq!(records[1].get("title"), Some("Two"));
    }

    #[test]
    fn test_parse_parenthesized_body() {
        let records = parse("@book(key1, title = {T}, year = 1999)").unwrap();
        assert_eq!(records[0].kind, RecordKind::Book);
        assert_eq!(records[0].get("year"), Some("1999"));
    }

    #[test]
    fn test_parse_value_shapes() {
        let input = "@misc{k, a = {braced {deep}}, b = \"quoted\", c = bare }";
        let records = parse(input).unwrap();
        assert_eq!(records[0].get("a"), Some("braced {deep}"));
        assert_eq!(records[0].get("b"), Some("quoted"));
        assert_eq!(records[0].get("c"), Some("bare"));
    }

    #[test]
    fn test_parse_trailing_comma() {
        let records = parse("@misc{k, title = {T}, }").unwrap();
        assert_eq!(records[0].get("title"), Some("T"));
    }

    #[test]
    fn test_parse_punctuated_cite_key() {
        let records = parse("@misc{doe.2020:x, title = {T}}").unwrap();
        assert_eq!(records[0].key, "doe.2020:x");
    }

    #[test]
    fn test_parse_unescapes_braces() {
        let records = parse(r"@misc{k, title = {set \{x\} only}}").unwrap();
        assert_eq!(records[0].get("title"), Some("set {x} only"));
    }

    #[test]
    fn test_parse_collapses_value_newlines() {
        let records = parse("@misc{k, abstract = {spans\n  two lines}}").unwrap();
        assert_eq!(records[0].get("abstract"), Some("spans two lines"));
    }

    #[test]
    fn test_parse_lowercases_field_names() {
        let records = parse("@misc{k, Title = {T}, _ID = {x}}").unwrap();
        assert_eq!(records[0].get("title"), Some("T"));
        assert_eq!(records[0].get("_id"), Some("x"));
    }

    #[test]
    fn test_parse_unknown_kind_is_misc() {
        let records = parse("@inproceedings{k, title = {T}}").unwrap();
        assert_eq!(records[0].kind, RecordKind::Misc);
    }

    #[test]
    fn test_parse_missing_equals_aborts() {
        let err = parse("@misc{k, title {T}}").unwrap_err();
        assert!(matches!(err, BibtexError::Syntax { .. }));
    }

    #[test]
    fn test_parse_unterminated_record_aborts() {
        let err = parse("@misc{k, title = {T},").unwrap_err();
        assert!(matches!(err, BibtexError::UnexpectedEof(_)));
    }

    #[test]
    fn test_parse_abort_covers_earlier_records() {
        // one good record followed by a corrupt one: nothing is returned
        let input = "@misc{good, title = {Fine}}\n@misc{bad, title = {unclosed";
        assert!(parse(input).is_err());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("% only comments\n").unwrap().is_empty());
    }
}
