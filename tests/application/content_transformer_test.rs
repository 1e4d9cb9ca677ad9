use docflow::application::services::content_transformer::NO_KEY_POINTS;
use docflow::application::services::{format_content, key_point_count, summarize};

#[test]
fn given_lowercase_paragraphs_when_formatting_then_capitalises_each_line() {
    assert_eq!(format_content("hello\n\nworld"), "Hello\n\nWorld");
}

#[test]
fn given_ragged_lines_when_formatting_then_trims_and_drops_blank_lines() {
    let input = "  first line  \n\n\n\tsecond line\n   \n3rd line";
    assert_eq!(format_content(input), "First line\n\nSecond line\n\n3rd line");
}

#[test]
fn given_leading_punctuation_when_formatting_then_line_is_left_alone() {
    assert_eq!(format_content("- item\n\"quoted\""), "- item\n\n\"quoted\"");
}

#[test]
fn given_formatted_output_when_formatting_again_then_result_is_unchanged() {
    let once = format_content("alpha\nbeta\n\n\ngamma   \n  delta");
    assert_eq!(format_content(&once), once);
}

#[test]
fn given_empty_text_when_summarizing_then_returns_placeholder() {
    assert_eq!(summarize(""), NO_KEY_POINTS);
}

#[test]
fn given_only_short_sentences_when_summarizing_then_returns_placeholder() {
    assert_eq!(summarize("Short one. Tiny! Also brief?"), NO_KEY_POINTS);
}

#[test]
fn given_six_long_sentences_when_summarizing_then_keeps_first_third() {
    let text = (1..=6)
        .map(|i| format!("this is long sentence number {i} in the text"))
        .collect::<Vec<_>>()
        .join(". ");

    let summary = summarize(&text);

    assert_eq!(
        summary,
        "• This is long sentence number 1 in the text.\n\n• This is long sentence number 2 in the text."
    );
    assert_eq!(key_point_count(&summary), 2);
}

#[test]
fn given_many_long_sentences_when_summarizing_then_caps_at_eight_bullets() {
    let text = (1..=40)
        .map(|i| format!("Sentence {i} carries enough characters to count"))
        .collect::<Vec<_>>()
        .join(". ");

    assert_eq!(key_point_count(&summarize(&text)), 8);
}

#[test]
fn given_mixed_sentence_lengths_when_summarizing_then_short_ones_are_skipped() {
    let text = "Hi. This sentence is definitely long enough. Ok. Another sentence that is long enough.";

    let summary = summarize(text);

    assert_eq!(summary, "• This sentence is definitely long enough.");
}
