use docflow::application::services::{Readability, analyze_text};

#[test]
fn given_short_plain_text_when_analyzing_then_counts_words_sentences_and_paragraphs() {
    let stats = analyze_text("Hello world. This is great! Short.");

    assert_eq!(stats.words, 6);
    assert_eq!(stats.characters, 34);
    assert_eq!(stats.sentences, 3);
    assert_eq!(stats.paragraphs, 1);
    assert_eq!(stats.average_words_per_sentence, 2);
    assert_eq!(stats.reading_time_minutes, 1);
    assert_eq!(stats.readability, Readability::Easy);
}

#[test]
fn given_empty_text_when_analyzing_then_everything_is_zero() {
    let stats = analyze_text("");

    assert_eq!(stats.words, 0);
    assert_eq!(stats.sentences, 0);
    assert_eq!(stats.paragraphs, 0);
    assert_eq!(stats.average_words_per_sentence, 0);
    assert_eq!(stats.reading_time_minutes, 0);
    assert_eq!(stats.readability, Readability::Easy);
}

#[test]
fn given_whitespace_when_analyzing_then_characters_without_whitespace_excludes_it() {
    let stats = analyze_text("a b\tc\n");

    assert_eq!(stats.characters, 6);
    assert_eq!(stats.characters_without_whitespace, 3);
}

#[test]
fn given_blank_line_separated_blocks_when_analyzing_then_counts_paragraphs() {
    let stats = analyze_text("First block.\n\nSecond block.\n   \nThird block.");

    assert_eq!(stats.paragraphs, 3);
    assert_eq!(stats.sentences, 3);
}

#[test]
fn given_repeated_terminators_when_analyzing_then_counts_one_sentence_each() {
    let stats = analyze_text("Wait... what?! Really.");
    assert_eq!(stats.sentences, 3);
}

#[test]
fn given_201_words_when_analyzing_then_reading_time_rounds_up() {
    let text = vec!["word"; 201].join(" ");
    assert_eq!(analyze_text(&text).reading_time_minutes, 2);
}

#[test]
fn given_average_boundaries_when_bucketing_then_uses_inclusive_upper_bounds() {
    assert_eq!(Readability::from_average(15), Readability::Easy);
    assert_eq!(Readability::from_average(16), Readability::Medium);
    assert_eq!(Readability::from_average(20), Readability::Medium);
    assert_eq!(Readability::from_average(21), Readability::Complex);
}

#[test]
fn given_one_long_sentence_when_analyzing_then_readability_is_complex() {
    let text = format!("{}.", vec!["word"; 25].join(" "));
    let stats = analyze_text(&text);

    assert_eq!(stats.average_words_per_sentence, 25);
    assert_eq!(stats.readability, Readability::Complex);
}
