use super::stats_analyzer::split_sentences;

pub const NO_KEY_POINTS: &str = "• No key points identified.";

const MIN_KEY_POINT_CHARS: usize = 20;
const MAX_KEY_POINTS: usize = 8;
const BULLET: &str = "• ";

/// Canonical layout: one trimmed, capitalised line per paragraph, separated by a blank line.
/// Blank lines are dropped on input, so the output is a fixed point of this function.
pub fn format_content(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Extractive summary: the first third of the sentences longer than twenty characters,
/// capped at eight, rendered as bullets.
pub fn summarize(text: &str) -> String {
    let sentences: Vec<&str> = split_sentences(text)
        .filter(|s| s.chars().count() > MIN_KEY_POINT_CHARS)
        .collect();

    let take = MAX_KEY_POINTS.min(sentences.len().div_ceil(3));
    if take == 0 {
        return NO_KEY_POINTS.to_string();
    }

    sentences
        .into_iter()
        .take(take)
        .map(|sentence| format!("{BULLET}{}.", capitalize_first(sentence)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Number of bullets in a rendered summary.
pub fn key_point_count(summary: &str) -> usize {
    summary
        .lines()
        .filter(|line| line.starts_with(BULLET))
        .count()
}

fn capitalize_first(line: &str) -> String {
    let mut chars = line.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() || first == '_' => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => line.to_string(),
    }
}
