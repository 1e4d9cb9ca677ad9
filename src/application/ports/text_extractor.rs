use async_trait::async_trait;

use crate::domain::UploadFile;

/// Format-specific text extraction. Implementations are all-or-nothing: either the whole
/// payload yields text or the call fails.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file: &UploadFile) -> Result<Extraction, ExtractorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extraction {
    pub text: String,
    /// Non-fatal diagnostics from the extractor.
    pub warnings: Vec<String>,
}

impl Extraction {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            warnings: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
