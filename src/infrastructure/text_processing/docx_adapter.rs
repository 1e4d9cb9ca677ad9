use async_trait::async_trait;
use docx_rs::{
    DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild,
};

use crate::application::ports::{Extraction, ExtractorError, TextExtractor};
use crate::domain::UploadFile;

use super::sanitize_extracted_text;

/// Extracts the raw text of an Office Open XML word-processing document.
///
/// Paragraphs become blank-line separated blocks; table rows become one line with cells
/// joined by ` | `. Anything else in the body (section properties, structured tags,
/// bookmarks) is skipped and reported as a warning.
pub struct DocxAdapter;

#[async_trait]
impl TextExtractor for DocxAdapter {
    #[tracing::instrument(skip(self, file), fields(filename = %file.name, size_bytes = file.size_bytes()))]
    async fn extract_text(&self, file: &UploadFile) -> Result<Extraction, ExtractorError> {
        let content = file.content.clone();
        let name = file.name.clone();

        tokio::task::spawn_blocking(move || extract_docx(&content, &name))
            .await
            .map_err(|e| ExtractorError::ExtractionFailed(format!("extraction task failed: {e}")))?
    }
}

fn extract_docx(bytes: &[u8], name: &str) -> Result<Extraction, ExtractorError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractorError::ExtractionFailed(format!("could not read {name}: {e}")))?;

    let mut blocks = Vec::new();
    let mut skipped = 0usize;

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(para) => blocks.push(paragraph_text(&para.children)),
            DocumentChild::Table(table) => {
                for row in &table.rows {
                    let TableChild::TableRow(tr) = row;
                    let cells: Vec<String> = tr
                        .cells
                        .iter()
                        .map(|cell| {
                            let TableRowChild::TableCell(tc) = cell;
                            tc.children
                                .iter()
                                .filter_map(|content| match content {
                                    TableCellContent::Paragraph(p) => {
                                        Some(paragraph_text(&p.children))
                                    }
                                    _ => None,
                                })
                                .collect::<Vec<_>>()
                                .join(" ")
                        })
                        .collect();
                    blocks.push(cells.join(" | "));
                }
            }
            _ => skipped += 1,
        }
    }

    let text = sanitize_extracted_text(&blocks.join("\n\n"));

    let mut warnings = Vec::new();
    if skipped > 0 {
        warnings.push(format!("skipped {skipped} non-text element(s) in {name}"));
    }
    if text.is_empty() {
        warnings.push(format!("{name} has no extractable text"));
    }

    tracing::debug!(blocks = blocks.len(), skipped, chars = text.len(), "DOCX parsed");
    Ok(Extraction { text, warnings })
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut out = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(&run.children, &mut out),
            ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let ParagraphChild::Run(run) = inner {
                        push_run_text(&run.children, &mut out);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

fn push_run_text(children: &[RunChild], out: &mut String) {
    for child in children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
