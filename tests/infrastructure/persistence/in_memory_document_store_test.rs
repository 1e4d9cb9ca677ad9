use docflow::application::ports::{DocumentStore, StoreError};
use docflow::domain::{Document, DocumentChanges, DocumentId, NewDocument, Tone, UserId};
use docflow::infrastructure::persistence::InMemoryDocumentStore;

fn document(content: &str) -> Document {
    Document::new(
        UserId::new("user-1"),
        NewDocument::new("notes.txt", content, Tone::Formal, "text/plain"),
    )
}

#[tokio::test]
async fn given_created_document_when_fetching_then_returns_it() {
    let store = InMemoryDocumentStore::new();
    let created = store.create(&document("hello")).await.unwrap();

    let fetched = store.get_by_id(&created.owner, created.id).await.unwrap();

    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn given_existing_id_when_creating_again_then_returns_constraint_violation() {
    let store = InMemoryDocumentStore::new();
    let doc = document("hello");
    store.create(&doc).await.unwrap();

    let result = store.create(&doc).await;

    assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_missing_document_when_updating_then_returns_not_found() {
    let store = InMemoryDocumentStore::new();

    let result = store
        .update(&UserId::new("user-1"), DocumentId::new(), &DocumentChanges::title("x"))
        .await;

    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn given_unavailable_store_when_calling_then_every_operation_fails_to_connect() {
    let store = InMemoryDocumentStore::new();
    let created = store.create(&document("hello")).await.unwrap();
    store.set_unavailable(true);

    assert!(matches!(
        store.get_by_id(&created.owner, created.id).await,
        Err(StoreError::ConnectionFailed(_))
    ));
    assert!(matches!(
        store.delete(&created.owner, created.id).await,
        Err(StoreError::ConnectionFailed(_))
    ));

    store.set_unavailable(false);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn given_document_of_another_owner_when_accessing_by_id_then_behaves_as_missing() {
    let store = InMemoryDocumentStore::new();
    let created = store.create(&document("hello")).await.unwrap();
    let stranger = UserId::new("user-2");

    assert_eq!(store.get_by_id(&stranger, created.id).await.unwrap(), None);
    assert!(matches!(
        store
            .update(&stranger, created.id, &DocumentChanges::content("changed"))
            .await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(&stranger, created.id).await,
        Err(StoreError::NotFound(_))
    ));

    let stored = store.get_by_id(&created.owner, created.id).await.unwrap();
    assert_eq!(stored, Some(created));
}
