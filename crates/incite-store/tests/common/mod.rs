//! Shared fixtures for store and editor tests

use incite_domain::Entry;

#[allow(dead_code)]
pub fn website(title: &str) -> Entry {
    let mut entry = Entry::new("website", title);
    entry.apa7.url = "https://example.com/page".to_string();
    entry.apa7.accessed = "2026-08-25".to_string();
    entry.annotation.summary = format!("Notes on {title}.");
    entry.annotation.keywords = vec!["web".to_string()];
    entry
}

#[allow(dead_code)]
pub fn book(title: &str) -> Entry {
    let mut entry = Entry::new("book", title);
    entry.apa7.publisher = "Acme Press".to_string();
    entry.apa7.publisher_location = "Berlin".to_string();
    entry.apa7.year = Some(2021);
    entry.annotation.summary = format!("Notes on {title}.");
    entry.annotation.keywords = vec!["print".to_string()];
    entry
}
