pub mod content_transformer;
mod exporter;
mod file_ingestor;
pub mod stats_analyzer;
mod sync_manager;
mod upload_queue;

pub use content_transformer::{format_content, key_point_count, summarize};
pub use exporter::{ExportBlob, ExportFormat, ViewMode, export};
pub use file_ingestor::{FileIngestor, IngestionError};
pub use stats_analyzer::{DocumentStats, Readability, analyze_text};
pub use sync_manager::{ActiveDocument, LibrarySummary, SyncError, SyncEvent, SyncManager};
pub use upload_queue::{
    QueueClosed, UploadError, UploadEvent, UploadOutcome, UploadQueue, UploadQueueConfig,
};
