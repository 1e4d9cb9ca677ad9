use std::io::Cursor;

use docflow::application::ports::{ExtractorError, TextExtractor};
use docflow::domain::UploadFile;
use docflow::domain::media_type::DOCX;
use docflow::infrastructure::text_processing::DocxAdapter;
use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

fn pack(docx: Docx) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("pack docx");
    buffer.into_inner()
}

fn paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

#[tokio::test]
async fn given_docx_paragraphs_when_extracting_then_returns_blank_line_separated_text() {
    let bytes = pack(
        Docx::new()
            .add_paragraph(paragraph("First   paragraph."))
            .add_paragraph(paragraph("Second paragraph.")),
    );
    let file = UploadFile::new("report.docx", DOCX, bytes);

    let result = DocxAdapter.extract_text(&file).await.unwrap();

    assert_eq!(result.text, "First paragraph.\n\nSecond paragraph.");
}

#[tokio::test]
async fn given_docx_table_when_extracting_then_cells_are_joined_per_row() {
    let table = Table::new(vec![TableRow::new(vec![
        TableCell::new().add_paragraph(paragraph("Name")),
        TableCell::new().add_paragraph(paragraph("Value")),
    ])]);
    let bytes = pack(Docx::new().add_table(table));
    let file = UploadFile::new("table.docx", DOCX, bytes);

    let result = DocxAdapter.extract_text(&file).await.unwrap();

    assert_eq!(result.text, "Name | Value");
}

#[tokio::test]
async fn given_empty_docx_when_extracting_then_warns_about_missing_text() {
    let bytes = pack(Docx::new());
    let file = UploadFile::new("empty.docx", DOCX, bytes);

    let result = DocxAdapter.extract_text(&file).await.unwrap();

    assert!(result.text.is_empty());
    assert!(result.warnings.iter().any(|w| w.contains("no extractable text")));
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_then_returns_extraction_failed() {
    let file = UploadFile::new("broken.docx", DOCX, b"not a zip archive".to_vec());

    let result = DocxAdapter.extract_text(&file).await;

    assert!(matches!(result, Err(ExtractorError::ExtractionFailed(_))));
}
