//! Lexical layer for the mirror file
//!
//! A flat token vocabulary over the raw text. Values are the one
//! context-sensitive spot (braced values nest, quoted values do not,
//! bare values stop at the record closer), so the parser asks for
//! `value()` explicitly after an `=`; every other shape comes out of
//! `token()`.

use crate::error::BibtexError;

/// One lexical shape of the mirror grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// `%` line comment, text discarded.
    Comment,
    At,
    /// Record kind or field name: ASCII alphanumerics, `_`, `-`.
    Ident(String),
    LBrace,
    RBrace,
    LParen,
    RParen,
    Equals,
    Comma,
    /// Brace- or quote-delimited value, delimiters stripped, escapes kept.
    String(String),
    /// Undelimited run: cite keys, bare values, stray text between records.
    Bare(String),
}

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn comment(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Next token, comments included. `None` once the input is exhausted.
    pub(crate) fn raw_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let token = match self.peek()? {
            '%' => {
                self.comment();
                return Some(Token::Comment);
            }
            '@' => Token::At,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '=' => Token::Equals,
            ',' => Token::Comma,
            _ => return Some(self.run()),
        };
        self.bump();
        Some(token)
    }

    /// Next significant token; comments are trivia everywhere outside
    /// values.
    pub(crate) fn token(&mut self) -> Option<Token> {
        loop {
            let token = self.raw_token()?;
            if token != Token::Comment {
                return Some(token);
            }
        }
    }

    /// Like `token()`, but running out of input is an error.
    pub(crate) fn require(&mut self) -> Result<Token, BibtexError> {
        self.token().ok_or(BibtexError::UnexpectedEof(self.pos))
    }

    // A maximal run up to whitespace or a structural character. Runs made
    // only of identifier characters are IDENT, anything else BARE (cite
    // keys may carry `.` or `:`).
    fn run(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, '%' | '@' | '{' | '}' | '(' | ')' | '=' | ',') {
                break;
            }
            self.bump();
        }
        let text = &self.input[start..self.pos];
        if text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Token::Ident(text.to_string())
        } else {
            Token::Bare(text.to_string())
        }
    }

    /// A field value: `{...}` with nested braces, `"..."`, or bare text up
    /// to the next comma or the record closer. Yields `Token::String` for
    /// delimited values and `Token::Bare` otherwise, without unescaping.
    pub(crate) fn value(&mut self, closer: char) -> Result<Token, BibtexError> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('%') => self.comment(),
                Some('{') => return self.braced().map(Token::String),
                Some('"') => return self.quoted().map(Token::String),
                Some(_) => return Ok(Token::Bare(self.bare(closer))),
                None => return Err(BibtexError::UnexpectedEof(self.pos)),
            }
        }
    }

    // A backslash escapes the following character, so `\{` and `\}` do not
    // change the brace depth.
    fn braced(&mut self) -> Result<String, BibtexError> {
        let open = self.pos;
        self.bump();
        let start = self.pos;
        let mut depth = 1usize;
        loop {
            match self.peek() {
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(BibtexError::UnexpectedEof(open));
                    }
                }
                Some('{') => {
                    depth += 1;
                    self.bump();
                }
                Some('}') => {
                    depth -= 1;
                    let end = self.pos;
                    self.bump();
                    if depth == 0 {
                        return Ok(self.input[start..end].to_string());
                    }
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(BibtexError::UnexpectedEof(open)),
            }
        }
    }

    fn quoted(&mut self) -> Result<String, BibtexError> {
        let open = self.pos;
        self.bump();
        let start = self.pos;
        loop {
            match self.peek() {
                Some('\\') => {
                    self.bump();
                    if self.bump().is_none() {
                        return Err(BibtexError::UnexpectedEof(open));
                    }
                }
                Some('"') => {
                    let end = self.pos;
                    self.bump();
                    return Ok(self.input[start..end].to_string());
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(BibtexError::UnexpectedEof(open)),
            }
        }
    }

    fn bare(&mut self, closer: char) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ',' || c == closer {
                break;
            }
            self.bump();
        }
        self.input[start..self.pos].trim().to_string()
    }
}

/// Reverse the writer's escaping: `\{` and `\}` become literal braces, any
/// other backslash pair is kept verbatim, and embedded line breaks (legal
/// in hand-edited files) collapse to single spaces.
pub(crate) fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(&brace @ ('{' | '}')) = chars.peek() {
                    chars.next();
                    out.push(brace);
                } else {
                    out.push('\\');
                }
            }
            '\n' | '\r' => {
                while matches!(chars.peek(), Some('\n' | '\r' | ' ' | '\t')) {
                    chars.next();
                }
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        while let Some(token) = scanner.token() {
            out.push(token);
        }
        out
    }

    #[test]
    fn test_token_stream_for_record_head() {
        assert_eq!(
            tokens("@article{smith2024,"),
            vec![
                Token::At,
                Token::Ident("article".to_string()),
                Token::LBrace,
                Token::Ident("smith2024".to_string()),
                Token::Comma,
            ]
        );
    }

    #[test]
    fn test_comments_are_raw_tokens_and_skipped() {
        let mut scanner = Scanner::new("% with @ inside\n@");
        assert_eq!(scanner.raw_token(), Some(Token::Comment));
        assert_eq!(scanner.raw_token(), Some(Token::At));

        let mut scanner = Scanner::new("% with @ inside\n@");
        assert_eq!(scanner.token(), Some(Token::At));
        assert_eq!(scanner.token(), None);
    }

    #[test]
    fn test_punctuated_keys_are_bare() {
        assert_eq!(
            tokens("doe.2020:x,"),
            vec![Token::Bare("doe.2020:x".to_string()), Token::Comma]
        );
    }

    #[test]
    fn test_braced_value_tracks_depth() {
        let mut s = Scanner::new("{a {nested {deep}} value}");
        assert_eq!(
            s.value('}').unwrap(),
            Token::String("a {nested {deep}} value".to_string())
        );
    }

    #[test]
    fn test_braced_value_escaped_braces() {
        let mut s = Scanner::new(r"{set \{x\} only}");
        assert_eq!(
            s.value('}').unwrap(),
            Token::String(r"set \{x\} only".to_string())
        );
    }

    #[test]
    fn test_quoted_value() {
        let mut s = Scanner::new("\"say \\\"hi\\\"\" ,");
        assert_eq!(
            s.value('}').unwrap(),
            Token::String("say \\\"hi\\\"".to_string())
        );
        assert_eq!(s.token(), Some(Token::Comma));
    }

    #[test]
    fn test_bare_value_stops_at_comma() {
        let mut s = Scanner::new("2024, next");
        assert_eq!(s.value('}').unwrap(), Token::Bare("2024".to_string()));
        assert_eq!(s.token(), Some(Token::Comma));
    }

    #[test]
    fn test_bare_value_stops_at_paren_closer() {
        let mut s = Scanner::new("1999)");
        assert_eq!(s.value(')').unwrap(), Token::Bare("1999".to_string()));
        assert_eq!(s.token(), Some(Token::RParen));
    }

    #[test]
    fn test_unterminated_value_is_eof() {
        let mut s = Scanner::new("{never closed");
        assert!(matches!(s.value('}'), Err(BibtexError::UnexpectedEof(_))));
    }

    #[test]
    fn test_unescape_braces() {
        assert_eq!(unescape(r"set \{x\} only"), "set {x} only");
        assert_eq!(unescape(r"a \& b"), r"a \& b");
    }

    #[test]
    fn test_unescape_collapses_newlines() {
        assert_eq!(unescape("first\n   second\r\nthird"), "first second third");
    }
}
