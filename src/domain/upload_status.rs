use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Queued,
    Uploading,
    Processing,
    Complete,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Queued => "queued",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Processing => "processing",
            UploadStatus::Complete => "complete",
            UploadStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadStatus::Complete | UploadStatus::Error)
    }

    /// queued → uploading → processing → complete, with `error` reachable from any
    /// non-terminal state.
    pub fn can_transition_to(&self, next: UploadStatus) -> bool {
        use UploadStatus::*;
        matches!(
            (self, next),
            (Queued, Uploading)
                | (Uploading, Processing)
                | (Processing, Complete)
                | (Queued | Uploading | Processing, Error)
        )
    }
}

impl FromStr for UploadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(UploadStatus::Queued),
            "uploading" => Ok(UploadStatus::Uploading),
            "processing" => Ok(UploadStatus::Processing),
            "complete" => Ok(UploadStatus::Complete),
            "error" => Ok(UploadStatus::Error),
            _ => Err(format!("Invalid upload status: {}", s)),
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
