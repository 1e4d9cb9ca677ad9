use docflow::application::ports::{ExtractorError, TextExtractor};
use docflow::domain::UploadFile;
use docflow::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_valid_utf8_bytes_when_extracting_then_returns_string() {
    let adapter = PlainTextAdapter::strict();
    let file = UploadFile::text("readme.txt", "Hello, this is plain text.");

    let result = adapter.extract_text(&file).await.unwrap();

    assert_eq!(result.text, "Hello, this is plain text.");
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_extracting_strictly_then_returns_extraction_failed() {
    let adapter = PlainTextAdapter::strict();
    let file = UploadFile::new("broken.txt", "text/plain", vec![0xFFu8, 0xFE, 0xFD]);

    let result = adapter.extract_text(&file).await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_invalid_utf8_bytes_when_extracting_leniently_then_replaces_and_warns() {
    let adapter = PlainTextAdapter::lenient();
    let file = UploadFile::new("mixed.log", "", vec![b'o', b'k', 0xFF]);

    let result = adapter.extract_text(&file).await.unwrap();

    assert_eq!(result.text, "ok\u{FFFD}");
    assert_eq!(result.warnings.len(), 1);
}

#[tokio::test]
async fn given_byte_order_mark_when_extracting_then_mark_is_dropped() {
    let adapter = PlainTextAdapter::strict();
    let file = UploadFile::new("bom.txt", "text/plain", "\u{feff}Hello".as_bytes().to_vec());

    let result = adapter.extract_text(&file).await.unwrap();

    assert_eq!(result.text, "Hello");
}
