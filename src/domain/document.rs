use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content_metrics::{character_count, word_count};
use super::{DocumentId, Tone, UserId};

/// Persisted document record.
///
/// `word_count` and `character_count` always describe `processed_content` as it was at the
/// last save or update. They are only ever recomputed, never set on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub owner: UserId,
    pub title: String,
    pub original_content: String,
    pub processed_content: String,
    pub tone: Tone,
    pub media_type: String,
    pub size_bytes: u64,
    pub word_count: usize,
    pub character_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the caller when a document is first saved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub title: String,
    pub content: String,
    pub tone: Tone,
    pub media_type: String,
    pub size_bytes: u64,
}

impl NewDocument {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tone: Tone,
        media_type: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            title: title.into(),
            size_bytes: content.len() as u64,
            content,
            tone,
            media_type: media_type.into(),
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = size_bytes;
        self
    }
}

impl Document {
    pub fn new(owner: UserId, draft: NewDocument) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::new(),
            owner,
            title: draft.title,
            word_count: word_count(&draft.content),
            character_count: character_count(&draft.content),
            processed_content: draft.content.clone(),
            original_content: draft.content,
            tone: draft.tone,
            media_type: draft.media_type,
            size_bytes: draft.size_bytes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the changed fields and stamps `updated_at`. Counts follow the content.
    pub fn apply(&mut self, changes: &DocumentChanges, at: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(content) = &changes.processed_content {
            self.processed_content = content.clone();
            self.word_count = word_count(content);
            self.character_count = character_count(content);
        }
        if let Some(tone) = changes.tone {
            self.tone = tone;
        }
        self.updated_at = at;
    }

    /// Every mutable field, used to push a full copy of a locally edited document.
    pub fn mutable_fields(&self) -> DocumentChanges {
        DocumentChanges {
            title: Some(self.title.clone()),
            processed_content: Some(self.processed_content.clone()),
            tone: Some(self.tone),
        }
    }
}

/// The subset of mutable fields touched by one update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentChanges {
    pub title: Option<String>,
    pub processed_content: Option<String>,
    pub tone: Option<Tone>,
}

impl DocumentChanges {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            processed_content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn tone(tone: Tone) -> Self {
        Self {
            tone: Some(tone),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.processed_content.is_none() && self.tone.is_none()
    }

    /// `(word_count, character_count)` for the new content, if content changes.
    pub fn counts(&self) -> Option<(usize, usize)> {
        self.processed_content
            .as_deref()
            .map(|c| (word_count(c), character_count(c)))
    }
}
