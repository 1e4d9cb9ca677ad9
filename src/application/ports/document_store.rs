use async_trait::async_trait;

use crate::domain::{Document, DocumentChanges, DocumentId, UserId};

use super::StoreError;

/// Remote persistent record of documents. Reads and writes by id are scoped to `owner`:
/// a document belonging to someone else behaves exactly like a missing one.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, document: &Document) -> Result<Document, StoreError>;

    async fn get_by_id(
        &self,
        owner: &UserId,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError>;

    /// Overwrites exactly the fields present in `changes` and returns the stored record.
    async fn update(
        &self,
        owner: &UserId,
        id: DocumentId,
        changes: &DocumentChanges,
    ) -> Result<Document, StoreError>;

    async fn delete(&self, owner: &UserId, id: DocumentId) -> Result<(), StoreError>;

    /// Newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, StoreError>;
}
