mod auth_provider;
mod document_store;
mod store_error;
mod text_extractor;

pub use auth_provider::AuthProvider;
pub use document_store::DocumentStore;
pub use store_error::StoreError;
pub use text_extractor::{Extraction, ExtractorError, TextExtractor};
