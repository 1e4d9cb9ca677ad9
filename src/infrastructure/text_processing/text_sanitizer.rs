use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Normalises extractor output: NFKC, words re-joined across soft hyphen breaks, runs of
/// whitespace collapsed within a line. Blank-line paragraph breaks survive as a single
/// blank line.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let joined = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in joined.lines() {
        let line = collapse_whitespace(line);
        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs.join("\n\n")
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}
