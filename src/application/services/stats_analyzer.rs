use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::{character_count, word_count};

pub const WORDS_PER_MINUTE: usize = 200;

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Readability {
    Easy,
    Medium,
    Complex,
}

impl Readability {
    pub fn from_average(average_words_per_sentence: usize) -> Self {
        match average_words_per_sentence {
            0..=15 => Readability::Easy,
            16..=20 => Readability::Medium,
            _ => Readability::Complex,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Readability::Easy => "Easy",
            Readability::Medium => "Medium",
            Readability::Complex => "Complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub words: usize,
    pub characters: usize,
    pub characters_without_whitespace: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub average_words_per_sentence: usize,
    pub reading_time_minutes: usize,
    pub readability: Readability,
}

/// Recomputes every metric from scratch.
pub fn analyze_text(text: &str) -> DocumentStats {
    let words = word_count(text);
    let sentences = sentence_count(text);
    let average_words_per_sentence = if sentences > 0 {
        (words as f64 / sentences as f64).round() as usize
    } else {
        0
    };

    DocumentStats {
        words,
        characters: character_count(text),
        characters_without_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
        sentences,
        paragraphs: paragraph_count(text),
        average_words_per_sentence,
        reading_time_minutes: words.div_ceil(WORDS_PER_MINUTE),
        readability: Readability::from_average(average_words_per_sentence),
    }
}

/// Trimmed, non-empty fragments between runs of `.`, `!` or `?`.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn sentence_count(text: &str) -> usize {
    split_sentences(text).count()
}

pub fn paragraph_count(text: &str) -> usize {
    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count()
}
