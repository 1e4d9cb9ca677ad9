use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DocumentId, UploadStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UploadTaskId(Uuid);

impl UploadTaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for UploadTaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One file handed to the upload queue.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub media_type: String,
    pub content: Bytes,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, super::media_type::TEXT_PLAIN, text.into())
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    UnsupportedFormat,
    ExtractionFailure,
    FileTooLarge,
    AuthRequired,
    PersistenceFailure,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnsupportedFormat => "unsupported_format",
            FailureKind::ExtractionFailure => "extraction_failure",
            FailureKind::FileTooLarge => "file_too_large",
            FailureKind::AuthRequired => "auth_required",
            FailureKind::PersistenceFailure => "persistence_failure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a task ended in `error`, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid upload transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: UploadStatus,
    pub to: UploadStatus,
}

/// Ephemeral per-file record tracked by the upload queue. Never persisted.
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub id: UploadTaskId,
    pub file: UploadFile,
    pub progress: u8,
    pub status: UploadStatus,
    pub failure: Option<UploadFailure>,
    pub document_id: Option<DocumentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UploadTask {
    pub fn new(file: UploadFile) -> Self {
        let now = Utc::now();
        Self {
            id: UploadTaskId::new(),
            file,
            progress: 0,
            status: UploadStatus::Queued,
            failure: None,
            document_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Raises progress, clamped to 100. Lower values and terminal tasks are ignored.
    /// Returns whether the value changed.
    pub fn advance_progress(&mut self, progress: u8) -> bool {
        let progress = progress.min(100);
        if self.status.is_terminal() || progress <= self.progress {
            return false;
        }
        self.progress = progress;
        self.updated_at = Utc::now();
        true
    }

    pub fn transition(&mut self, next: UploadStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if next == UploadStatus::Processing || next == UploadStatus::Complete {
            self.progress = 100;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn complete(&mut self, document_id: DocumentId) -> Result<(), InvalidTransition> {
        self.transition(UploadStatus::Complete)?;
        self.document_id = Some(document_id);
        Ok(())
    }

    pub fn fail(&mut self, failure: UploadFailure) -> Result<(), InvalidTransition> {
        self.transition(UploadStatus::Error)?;
        self.failure = Some(failure);
        Ok(())
    }
}
