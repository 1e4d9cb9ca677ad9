use async_trait::async_trait;

use crate::application::ports::{Extraction, ExtractorError, TextExtractor};
use crate::domain::UploadFile;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Passes textual payloads through unchanged.
///
/// The strict variant rejects anything that is not valid UTF-8 and backs declared
/// `text/plain` uploads. The lenient variant is the fallback for unrecognised types and
/// replaces invalid sequences, reporting that it did so.
pub struct PlainTextAdapter {
    lossy: bool,
}

impl PlainTextAdapter {
    pub fn strict() -> Self {
        Self { lossy: false }
    }

    pub fn lenient() -> Self {
        Self { lossy: true }
    }
}

#[async_trait]
impl TextExtractor for PlainTextAdapter {
    async fn extract_text(&self, file: &UploadFile) -> Result<Extraction, ExtractorError> {
        let mut extraction = match std::str::from_utf8(&file.content) {
            Ok(text) => Extraction::text(text),
            Err(e) if !self.lossy => {
                return Err(ExtractorError::ExtractionFailed(format!(
                    "{} is not valid UTF-8: {}",
                    file.name, e
                )));
            }
            Err(_) => Extraction {
                text: String::from_utf8_lossy(&file.content).into_owned(),
                warnings: vec![format!(
                    "{} contained invalid UTF-8; replaced undecodable bytes",
                    file.name
                )],
            },
        };

        if let Some(stripped) = extraction.text.strip_prefix(BYTE_ORDER_MARK) {
            extraction.text = stripped.to_string();
        }

        Ok(extraction)
    }
}
