use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{DocumentStore, StoreError};
use crate::domain::{Document, DocumentChanges, DocumentId, UserId};

/// Process-local store. Data lives as long as the value.
///
/// `set_unavailable(true)` makes every call fail with `ConnectionFailed` until reset,
/// which stands in for an unreachable remote.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, Document>>,
    unavailable: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::ConnectionFailed(
                "document store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, document: &Document) -> Result<Document, StoreError> {
        self.check_available()?;
        let mut documents = self.documents.write().await;
        if documents.contains_key(&document.id) {
            return Err(StoreError::ConstraintViolation(format!(
                "document {} already exists",
                document.id
            )));
        }
        documents.insert(document.id, document.clone());
        Ok(document.clone())
    }

    async fn get_by_id(
        &self,
        owner: &UserId,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        self.check_available()?;
        Ok(self
            .documents
            .read()
            .await
            .get(&id)
            .filter(|d| &d.owner == owner)
            .cloned())
    }

    async fn update(
        &self,
        owner: &UserId,
        id: DocumentId,
        changes: &DocumentChanges,
    ) -> Result<Document, StoreError> {
        self.check_available()?;
        let mut documents = self.documents.write().await;
        let document = documents
            .get_mut(&id)
            .filter(|d| &d.owner == owner)
            .ok_or_else(|| StoreError::NotFound(format!("document {id}")))?;
        document.apply(changes, Utc::now());
        Ok(document.clone())
    }

    async fn delete(&self, owner: &UserId, id: DocumentId) -> Result<(), StoreError> {
        self.check_available()?;
        let mut documents = self.documents.write().await;
        if !documents.get(&id).is_some_and(|d| &d.owner == owner) {
            return Err(StoreError::NotFound(format!("document {id}")));
        }
        documents.remove(&id);
        Ok(())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let mut documents: Vec<Document> = self
            .documents
            .read()
            .await
            .values()
            .filter(|d| &d.owner == owner)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents)
    }
}
