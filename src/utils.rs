use base64::{Engine, engine::general_purpose::STANDARD};

/// Builds the value of an HTTP Basic `Authorization` header.
pub fn basic_auth_header(user: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", user, password));
    format!("Basic {}", encoded)
}

/// Number of whitespace-separated tokens in `text`.
pub fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercases `text` and keeps only alphanumeric characters, so that titles
/// differing in punctuation, spacing or curly quotes compare equal.
pub fn comparable_title(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Shortens `text` to at most `max_chars` characters, appending an ellipsis
/// when something was cut off.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
