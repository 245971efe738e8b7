use regex::Regex;
use std::collections::HashSet;

use super::types::Book;

pub fn tokenize_text(text: &str) -> HashSet<String> {
    let re = Regex::new(r"\b[a-zA-Z]+\b").unwrap();
    re.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.len() > 2)
        .collect()
}

pub fn tokenize_query(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// A book matches when any query token appears among its text tokens.
/// An empty token list (blank or all-short-words query) matches everything.
pub fn matches_query(book: &Book, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }

    let text = tokenize_text(&format!(
        "{} {} {}",
        book.title, book.author, book.description
    ));
    tokens.iter().any(|token| text.contains(token))
}
