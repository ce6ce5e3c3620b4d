//! Text helpers shared by logging and input handling.

const SNIPPET_LIMIT: usize = 160;

/// Single-line preview of `text` for log fields.
pub fn summarise(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return "(empty)".to_string();
    }
    let single_line = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = single_line.chars();
    let mut result: String = chars.by_ref().take(SNIPPET_LIMIT).collect();
    if chars.next().is_some() {
        result.push_str("...");
    }
    result
}

/// Cut `text` to at most `limit` characters, respecting char boundaries.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
