//! Tokenization shared by the index builders

/// Lowercased word tokens of at least two characters. Splits on anything
/// that is not alphanumeric, so punctuation never leaks into tokens.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|token| token.chars().count() >= 2)
        .collect()
}

/// The lowercased host of a URL, if it parses as one.
pub(crate) fn url_host(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.host_str().map(str::to_lowercase)
}
