mod in_memory_document_store;
mod pg_document_store;
mod pg_pool;

pub use in_memory_document_store::InMemoryDocumentStore;
pub use pg_document_store::PgDocumentStore;
pub use pg_pool::{create_pool, run_migrations};
