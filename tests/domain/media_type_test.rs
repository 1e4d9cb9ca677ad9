use docflow::domain::MediaKind;
use docflow::domain::media_type::{DOCX, MSPOWERPOINT, MSWORD, PDF, PPTX, TEXT_PLAIN};

#[test]
fn given_plain_text_with_charset_when_classifying_then_returns_text() {
    assert_eq!(MediaKind::from_mime("text/plain; charset=utf-8"), MediaKind::Text);
    assert_eq!(MediaKind::from_mime(TEXT_PLAIN), MediaKind::Text);
}

#[test]
fn given_word_processor_types_when_classifying_then_returns_word_processor() {
    assert_eq!(MediaKind::from_mime(MSWORD), MediaKind::WordProcessor);
    assert_eq!(MediaKind::from_mime(DOCX), MediaKind::WordProcessor);
}

#[test]
fn given_presentation_types_when_classifying_then_returns_presentation() {
    assert_eq!(MediaKind::from_mime(MSPOWERPOINT), MediaKind::Presentation);
    assert_eq!(MediaKind::from_mime(PPTX), MediaKind::Presentation);
}

#[test]
fn given_pdf_type_when_classifying_then_returns_pdf() {
    assert_eq!(MediaKind::from_mime(PDF), MediaKind::Pdf);
}

#[test]
fn given_unrecognised_type_when_classifying_then_returns_other() {
    assert_eq!(MediaKind::from_mime("text/markdown"), MediaKind::Other);
    assert_eq!(MediaKind::from_mime("application/json"), MediaKind::Other);
}

#[test]
fn given_empty_declared_type_when_classifying_then_uses_extension() {
    assert_eq!(MediaKind::classify("", "notes.TXT"), MediaKind::Text);
    assert_eq!(MediaKind::classify("", "report.docx"), MediaKind::WordProcessor);
    assert_eq!(MediaKind::classify("", "deck.pptx"), MediaKind::Presentation);
    assert_eq!(MediaKind::classify("", "paper.pdf"), MediaKind::Pdf);
    assert_eq!(MediaKind::classify("", "README"), MediaKind::Other);
}

#[test]
fn given_declared_type_when_classifying_then_extension_is_ignored() {
    assert_eq!(MediaKind::classify(TEXT_PLAIN, "slides.pptx"), MediaKind::Text);
}
