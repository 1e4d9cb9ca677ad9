/// Whitespace-delimited, non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Unicode scalar values, whitespace included.
pub fn character_count(text: &str) -> usize {
    text.chars().count()
}
