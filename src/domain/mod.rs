mod content_metrics;
mod document;
mod document_id;
pub mod media_type;
mod template;
mod tone;
mod upload_status;
mod upload_task;
mod user_id;

pub use content_metrics::{character_count, word_count};
pub use document::{Document, DocumentChanges, NewDocument};
pub use document_id::DocumentId;
pub use media_type::MediaKind;
pub use template::{DocumentTemplate, builtin_templates, find_template, template_categories};
pub use tone::Tone;
pub use upload_status::UploadStatus;
pub use upload_task::{
    FailureKind, InvalidTransition, UploadFailure, UploadFile, UploadTask, UploadTaskId,
};
pub use user_id::UserId;
