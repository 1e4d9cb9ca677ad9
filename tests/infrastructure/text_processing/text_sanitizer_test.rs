use docflow::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_fullwidth_and_no_break_characters_when_sanitizing_then_normalizes_to_plain_forms() {
    let input = "Ｑ３ report:\u{00A0}\u{00A0}draft";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "Q3 report: draft");
}

#[test]
fn given_crlf_lines_within_a_paragraph_when_sanitizing_then_keeps_them_as_single_newlines() {
    let input = "Dear team,\r\nplease find the notes below.\r\n\r\nRegards";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "Dear team,\nplease find the notes below.\n\nRegards");
}

#[test]
fn given_whitespace_only_lines_between_paragraphs_when_sanitizing_then_groups_into_one_break() {
    let input = "Intro\n   \t\n\n \nBody";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "Intro\n\nBody");
}

#[test]
fn given_leading_and_trailing_blank_lines_when_sanitizing_then_trims_them() {
    let input = "\n\n   Title   \n\n\n";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "Title");
}

#[test]
fn given_tabbed_table_row_when_sanitizing_then_collapses_to_single_spaces() {
    let input = "Name\t\tRole | Owner\t";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "Name Role | Owner");
}

#[test]
fn given_hyphen_break_with_crlf_and_indent_when_sanitizing_then_joins_word() {
    let input = "the docu-\r\n    ment was signed";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "the document was signed");
}

#[test]
fn given_hyphen_before_paragraph_break_when_sanitizing_then_keeps_both_paragraphs() {
    let input = "follow-\n\nup items";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "follow-\n\nup items");
}

#[test]
fn given_compound_words_and_list_markers_when_sanitizing_then_hyphens_survive() {
    let input = "A well-known plan:\n- step one\n- step two";
    let result = sanitize_extracted_text(input);
    assert_eq!(result, "A well-known plan:\n- step one\n- step two");
}

#[test]
fn given_blank_input_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text(""), "");
    assert_eq!(sanitize_extracted_text(" \r\n\t\n "), "");
}

#[test]
fn given_already_clean_text_when_sanitizing_twice_then_output_is_stable() {
    let once = sanitize_extracted_text("One  line\n\n\nTwo\r\nThree");
    assert_eq!(sanitize_extracted_text(&once), once);
}
