use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use tokio::sync::{RwLock, broadcast};

use crate::application::ports::{AuthProvider, DocumentStore, StoreError};
use crate::domain::{
    Document, DocumentChanges, DocumentId, FailureKind, NewDocument, Tone, UserId, find_template,
};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    Created { document_id: DocumentId },
    Updated { document_id: DocumentId },
    Deleted { document_id: DocumentId },
    ActiveChanged { document_id: Option<DocumentId> },
    SyncFailed {
        document_id: Option<DocumentId>,
        error: String,
    },
}

/// The document open for viewing and editing. `synced` turns false when a local edit
/// could not be persisted and stays false until a later update of the same fields succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDocument {
    pub document: Document,
    pub synced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LibrarySummary {
    pub total_documents: usize,
    pub created_this_month: usize,
    pub total_words: usize,
}

#[derive(Default)]
struct SyncState {
    cache: HashMap<DocumentId, Document>,
    active: Option<ActiveDocument>,
}

/// Sole owner of the local document cache and the active document slot. Every mutation
/// goes through here and is mirrored to the store. Failed store calls are reported, never
/// retried, and never roll back the local edit.
pub struct SyncManager {
    store: Arc<dyn DocumentStore>,
    auth: Arc<dyn AuthProvider>,
    state: RwLock<SyncState>,
    events: broadcast::Sender<SyncEvent>,
}

impl SyncManager {
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            auth,
            state: RwLock::new(SyncState::default()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title, tone = %draft.tone))]
    pub async fn create(&self, draft: NewDocument) -> Result<Document, SyncError> {
        let owner = self.require_user(None)?;
        let document = Document::new(owner, draft);

        let stored = match self.store.create(&document).await {
            Ok(stored) => stored,
            Err(e) => return Err(self.report_failure(Some(document.id), e)),
        };

        self.state
            .write()
            .await
            .cache
            .insert(stored.id, stored.clone());
        self.publish(SyncEvent::Created {
            document_id: stored.id,
        });
        tracing::info!(document_id = %stored.id, words = stored.word_count, "Document created");
        Ok(stored)
    }

    /// Persists a new document and makes it the active one.
    pub async fn create_active(&self, draft: NewDocument) -> Result<Document, SyncError> {
        let document = self.create(draft).await?;
        self.set_active(Some(ActiveDocument {
            document: document.clone(),
            synced: true,
        }))
        .await;
        Ok(document)
    }

    pub async fn create_from_template(
        &self,
        template_id: &str,
        tone: Tone,
    ) -> Result<Document, SyncError> {
        let template = find_template(template_id)
            .ok_or_else(|| SyncError::UnknownTemplate(template_id.to_string()))?;
        let draft = NewDocument::new(
            template.file_name(),
            template.content,
            tone,
            template.media_type(),
        );
        self.create_active(draft).await
    }

    pub async fn update_content(
        &self,
        id: DocumentId,
        content: impl Into<String>,
    ) -> Result<Document, SyncError> {
        self.update(id, DocumentChanges::content(content)).await
    }

    pub async fn update_tone(&self, id: DocumentId, tone: Tone) -> Result<Document, SyncError> {
        self.update(id, DocumentChanges::tone(tone)).await
    }

    pub async fn update_title(
        &self,
        id: DocumentId,
        title: impl Into<String>,
    ) -> Result<Document, SyncError> {
        self.update(id, DocumentChanges::title(title)).await
    }

    /// Applies `changes` to the active document first, then to the store. The cache is only
    /// touched once the store accepted the write.
    #[tracing::instrument(skip(self, changes), fields(document_id = %id))]
    pub async fn update(
        &self,
        id: DocumentId,
        changes: DocumentChanges,
    ) -> Result<Document, SyncError> {
        {
            let mut state = self.state.write().await;
            if let Some(active) = state.active.as_mut().filter(|a| a.document.id == id) {
                active.document.apply(&changes, Utc::now());
                active.synced = false;
            }
        }

        let owner = self.require_user(Some(id))?;

        let stored = match self.store.update(&owner, id, &changes).await {
            Ok(stored) => stored,
            Err(e) => return Err(self.report_failure(Some(id), e)),
        };

        {
            let mut guard = self.state.write().await;
            let state = &mut *guard;
            match state.cache.get_mut(&id) {
                Some(cached) => cached.apply(&changes, stored.updated_at),
                None => {
                    state.cache.insert(id, stored.clone());
                }
            }
            if let Some(active) = state.active.as_mut().filter(|a| a.document.id == id) {
                if active.document.mutable_fields() == stored.mutable_fields() {
                    active.document = stored.clone();
                    active.synced = true;
                }
            }
        }

        self.publish(SyncEvent::Updated { document_id: id });
        tracing::debug!(words = stored.word_count, "Document updated");
        Ok(stored)
    }

    /// Re-sends every mutable field of an unsynced active document.
    pub async fn resync_active(&self) -> Result<Option<Document>, SyncError> {
        let pending = {
            let state = self.state.read().await;
            state
                .active
                .as_ref()
                .filter(|a| !a.synced)
                .map(|a| (a.document.id, a.document.mutable_fields()))
        };

        match pending {
            Some((id, changes)) => self.update(id, changes).await.map(Some),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self), fields(document_id = %id))]
    pub async fn delete(&self, id: DocumentId) -> Result<(), SyncError> {
        let owner = self.require_user(Some(id))?;

        if let Err(e) = self.store.delete(&owner, id).await {
            return Err(self.report_failure(Some(id), e));
        }

        let was_active = {
            let mut state = self.state.write().await;
            state.cache.remove(&id);
            let was_active = state.active.as_ref().is_some_and(|a| a.document.id == id);
            if was_active {
                state.active = None;
            }
            was_active
        };

        self.publish(SyncEvent::Deleted { document_id: id });
        if was_active {
            self.publish(SyncEvent::ActiveChanged { document_id: None });
        }
        tracing::info!("Document deleted");
        Ok(())
    }

    /// Reloads the caller's documents, newest first. Without a signed-in user the cache is
    /// emptied and nothing is fetched.
    pub async fn refresh(&self) -> Result<Vec<Document>, SyncError> {
        let Some(owner) = self.auth.current_user() else {
            self.state.write().await.cache.clear();
            return Ok(Vec::new());
        };

        let documents = match self.store.list_by_owner(&owner).await {
            Ok(documents) => documents,
            Err(e) => return Err(self.report_failure(None, e)),
        };

        let mut state = self.state.write().await;
        state.cache = documents.iter().map(|d| (d.id, d.clone())).collect();
        tracing::debug!(count = documents.len(), "Document cache refreshed");
        Ok(documents)
    }

    /// Cached documents, newest first.
    pub async fn documents(&self) -> Vec<Document> {
        let state = self.state.read().await;
        let mut documents: Vec<Document> = state.cache.values().cloned().collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        documents
    }

    pub async fn get(&self, id: DocumentId) -> Option<Document> {
        self.state.read().await.cache.get(&id).cloned()
    }

    /// Opens a document of the signed-in user. A cached copy is only reused when it belongs
    /// to that user; anything else is fetched from the store under the user's scope.
    pub async fn open(&self, id: DocumentId) -> Result<Document, SyncError> {
        let owner = self.require_user(Some(id))?;
        let cached = self.get(id).await.filter(|d| d.owner == owner);
        let document = match cached {
            Some(document) => document,
            None => {
                let fetched = match self.store.get_by_id(&owner, id).await {
                    Ok(fetched) => fetched,
                    Err(e) => return Err(self.report_failure(Some(id), e)),
                };
                let document = fetched.ok_or(SyncError::NotFound(id))?;
                self.state
                    .write()
                    .await
                    .cache
                    .insert(id, document.clone());
                document
            }
        };

        self.set_active(Some(ActiveDocument {
            document: document.clone(),
            synced: true,
        }))
        .await;
        Ok(document)
    }

    pub async fn close(&self) {
        self.set_active(None).await;
    }

    pub async fn active(&self) -> Option<ActiveDocument> {
        self.state.read().await.active.clone()
    }

    pub async fn library_summary(&self) -> LibrarySummary {
        let state = self.state.read().await;
        let now = Utc::now();
        LibrarySummary {
            total_documents: state.cache.len(),
            created_this_month: state
                .cache
                .values()
                .filter(|d| d.created_at.year() == now.year() && d.created_at.month() == now.month())
                .count(),
            total_words: state.cache.values().map(|d| d.word_count).sum(),
        }
    }

    async fn set_active(&self, active: Option<ActiveDocument>) {
        let document_id = active.as_ref().map(|a| a.document.id);
        self.state.write().await.active = active;
        self.publish(SyncEvent::ActiveChanged { document_id });
    }

    fn require_user(&self, document_id: Option<DocumentId>) -> Result<UserId, SyncError> {
        self.auth.current_user().ok_or_else(|| {
            tracing::warn!("Mutating sync call without an authenticated user");
            self.publish(SyncEvent::SyncFailed {
                document_id,
                error: SyncError::AuthRequired.to_string(),
            });
            SyncError::AuthRequired
        })
    }

    fn report_failure(&self, document_id: Option<DocumentId>, error: StoreError) -> SyncError {
        tracing::error!(error = %error, "Store call failed");
        self.publish(SyncEvent::SyncFailed {
            document_id,
            error: error.to_string(),
        });
        SyncError::PersistenceFailure(error)
    }

    fn publish(&self, event: SyncEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("authentication required")]
    AuthRequired,
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] StoreError),
}

impl SyncError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SyncError::AuthRequired => FailureKind::AuthRequired,
            _ => FailureKind::PersistenceFailure,
        }
    }
}
