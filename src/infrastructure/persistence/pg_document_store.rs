use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{DocumentStore, StoreError};
use crate::domain::{Document, DocumentChanges, DocumentId, Tone, UserId};

const COLUMNS: &str = "id, owner_id, title, original_content, processed_content, tone, \
     media_type, size_bytes, word_count, character_count, created_at, updated_at";

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    #[instrument(skip(self, document), fields(document_id = %document.id))]
    async fn create(&self, document: &Document) -> Result<Document, StoreError> {
        let query = format!(
            "INSERT INTO documents ({COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(document.id.as_uuid())
            .bind(document.owner.as_str())
            .bind(&document.title)
            .bind(&document.original_content)
            .bind(&document.processed_content)
            .bind(document.tone.as_str())
            .bind(&document.media_type)
            .bind(to_i64(document.size_bytes)?)
            .bind(to_i64(document.word_count as u64)?)
            .bind(to_i64(document.character_count as u64)?)
            .bind(document.created_at)
            .bind(document.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        document_from_row(&row)
    }

    #[instrument(skip(self), fields(owner = %owner, document_id = %id))]
    async fn get_by_id(
        &self,
        owner: &UserId,
        id: DocumentId,
    ) -> Result<Option<Document>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 AND owner_id = $2");

        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(document_from_row).transpose()
    }

    #[instrument(skip(self, changes), fields(owner = %owner, document_id = %id))]
    async fn update(
        &self,
        owner: &UserId,
        id: DocumentId,
        changes: &DocumentChanges,
    ) -> Result<Document, StoreError> {
        let counts = match changes.counts() {
            Some((words, chars)) => Some((to_i64(words as u64)?, to_i64(chars as u64)?)),
            None => None,
        };
        let query = format!(
            "UPDATE documents SET \
                 title = COALESCE($2, title), \
                 processed_content = COALESCE($3, processed_content), \
                 tone = COALESCE($4, tone), \
                 word_count = COALESCE($5, word_count), \
                 character_count = COALESCE($6, character_count), \
                 updated_at = $7 \
             WHERE id = $1 AND owner_id = $8 \
             RETURNING {COLUMNS}"
        );

        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .bind(changes.title.as_deref())
            .bind(changes.processed_content.as_deref())
            .bind(changes.tone.map(|t| t.as_str()))
            .bind(counts.map(|(words, _)| words))
            .bind(counts.map(|(_, chars)| chars))
            .bind(Utc::now())
            .bind(owner.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StoreError::NotFound(format!("document {id}")))?;

        document_from_row(&row)
    }

    #[instrument(skip(self), fields(owner = %owner, document_id = %id))]
    async fn delete(&self, owner: &UserId, id: DocumentId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("document {id}")));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM documents WHERE owner_id = $1 ORDER BY created_at DESC"
        );

        let rows = sqlx::query(&query)
            .bind(owner.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(document_from_row).collect()
    }
}

fn document_from_row(row: &PgRow) -> Result<Document, StoreError> {
    let tone: String = get(row, "tone")?;
    let tone = tone.parse::<Tone>().map_err(StoreError::QueryFailed)?;

    Ok(Document {
        id: DocumentId::from_uuid(get::<Uuid>(row, "id")?),
        owner: UserId::new(get::<String>(row, "owner_id")?),
        title: get(row, "title")?,
        original_content: get(row, "original_content")?,
        processed_content: get(row, "processed_content")?,
        tone,
        media_type: get(row, "media_type")?,
        size_bytes: from_i64(get(row, "size_bytes")?)?,
        word_count: from_i64(get(row, "word_count")?)? as usize,
        character_count: from_i64(get(row, "character_count")?)? as usize,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
        updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
    })
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| StoreError::QueryFailed(format!("column {column}: {e}")))
}

fn to_i64(value: u64) -> Result<i64, StoreError> {
    i64::try_from(value)
        .map_err(|_| StoreError::ConstraintViolation(format!("{value} out of range")))
}

fn from_i64(value: i64) -> Result<u64, StoreError> {
    u64::try_from(value)
        .map_err(|_| StoreError::QueryFailed(format!("negative count {value} in row")))
}

fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
            StoreError::ConstraintViolation(db.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::ConnectionFailed(e.to_string())
        }
        _ => StoreError::QueryFailed(e.to_string()),
    }
}
