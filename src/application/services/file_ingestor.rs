use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{ExtractorError, TextExtractor};
use crate::domain::{FailureKind, MediaKind, UploadFile};

/// Turns a raw upload into plain text by dispatching on the declared media type.
pub struct FileIngestor {
    adapters: HashMap<MediaKind, Arc<dyn TextExtractor>>,
}

impl FileIngestor {
    pub fn new(adapters: Vec<(MediaKind, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    #[tracing::instrument(
        skip(self, file),
        fields(filename = %file.name, media_type = %file.media_type, size_bytes = file.size_bytes())
    )]
    pub async fn ingest(&self, file: &UploadFile) -> Result<String, IngestionError> {
        let kind = MediaKind::classify(&file.media_type, &file.name);

        if matches!(kind, MediaKind::Presentation | MediaKind::Pdf) {
            tracing::info!(kind = kind.as_str(), "Text extraction not available for format");
            return Err(IngestionError::UnsupportedFormat(describe(file, kind)));
        }

        let adapter = self
            .adapters
            .get(&kind)
            .ok_or_else(|| IngestionError::UnsupportedFormat(describe(file, kind)))?;

        let extraction = adapter.extract_text(file).await.map_err(|e| match e {
            ExtractorError::UnsupportedMediaType(m) => IngestionError::UnsupportedFormat(m),
            ExtractorError::ExtractionFailed(m) => IngestionError::ExtractionFailure(m),
        })?;

        for warning in &extraction.warnings {
            tracing::warn!(warning = %warning, "Extractor reported a diagnostic");
        }

        tracing::debug!(
            kind = kind.as_str(),
            chars = extraction.text.len(),
            "Ingestion complete"
        );
        Ok(extraction.text)
    }
}

fn describe(file: &UploadFile, kind: MediaKind) -> String {
    if file.media_type.trim().is_empty() {
        format!("{} ({})", file.name, kind.as_str())
    } else {
        file.media_type.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("extraction failure: {0}")]
    ExtractionFailure(String),
}

impl IngestionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            IngestionError::UnsupportedFormat(_) => FailureKind::UnsupportedFormat,
            IngestionError::ExtractionFailure(_) => FailureKind::ExtractionFailure,
        }
    }
}
