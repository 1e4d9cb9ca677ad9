mod docx_adapter;
mod extractor_factory;
mod plain_text_adapter;
mod text_sanitizer;

pub use docx_adapter::DocxAdapter;
pub use extractor_factory::ExtractorFactory;
pub use plain_text_adapter::PlainTextAdapter;
pub use text_sanitizer::sanitize_extracted_text;
