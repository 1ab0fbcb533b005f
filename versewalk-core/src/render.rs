//! Cosmetic line rendering
//!
//! Walks produce lowercased tokens. Rendering joins them into display text:
//! punctuation hugs the preceding word, the first word and the pronoun "I"
//! are capitalized, and an optional terminal mark is appended.

use crate::token::is_punctuation;

/// Drop punctuation tokens from the front of a line
pub fn trim_leading_punctuation<S: AsRef<str>>(tokens: &[S]) -> &[S] {
    let start = tokens
        .iter()
        .position(|t| !is_punctuation(t.as_ref()))
        .unwrap_or(tokens.len());
    &tokens[start..]
}

/// Join tokens into a display line
pub fn render_line<S: AsRef<str>>(tokens: &[S], terminal: Option<char>) -> String {
    let tokens = trim_leading_punctuation(tokens);
    let mut line = String::new();

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if is_punctuation(token) {
            line.push_str(token);
            continue;
        }
        if !line.is_empty() {
            line.push(' ');
        }
        if i == 0 || is_first_person(token) {
            line.push_str(&capitalize(token));
        } else {
            line.push_str(token);
        }
    }

    if let Some(mark) = terminal {
        if !line.is_empty() {
            line.push(mark);
        }
    }
    line
}

/// Uppercase the first character of a word
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_first_person(word: &str) -> bool {
    word == "i" || word.starts_with("i'")
}
