use std::sync::Arc;

use crate::application::ports::TextExtractor;
use crate::application::services::FileIngestor;
use crate::domain::MediaKind;

use super::{DocxAdapter, PlainTextAdapter};

pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Wires the built-in extractors. PDF and presentation formats have no adapter and are
    /// rejected by the ingestor.
    pub fn create_ingestor() -> FileIngestor {
        let adapters: Vec<(MediaKind, Arc<dyn TextExtractor>)> = vec![
            (MediaKind::Text, Arc::new(PlainTextAdapter::strict())),
            (MediaKind::WordProcessor, Arc::new(DocxAdapter)),
            (MediaKind::Other, Arc::new(PlainTextAdapter::lenient())),
        ];
        tracing::debug!(adapters = adapters.len(), "Registered text extractors");
        FileIngestor::new(adapters)
    }
}
