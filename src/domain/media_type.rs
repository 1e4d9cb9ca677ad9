use std::path::Path;

pub const TEXT_PLAIN: &str = "text/plain";
pub const MSWORD: &str = "application/msword";
pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF: &str = "application/pdf";
pub const MSPOWERPOINT: &str = "application/vnd.ms-powerpoint";
pub const PPTX: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Format family a declared media type belongs to, which decides how text is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Text,
    WordProcessor,
    Presentation,
    Pdf,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        let essence = mime.split(';').next().unwrap_or_default().trim();

        match essence {
            TEXT_PLAIN => Self::Text,
            PDF => Self::Pdf,
            MSPOWERPOINT | PPTX => Self::Presentation,
            MSWORD | DOCX => Self::WordProcessor,
            m if m.contains("presentation") || m.contains("powerpoint") => Self::Presentation,
            m if m.contains("word") || m.contains("document") => Self::WordProcessor,
            _ => Self::Other,
        }
    }

    pub fn from_extension(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Self::Text,
            Some("doc") | Some("docx") => Self::WordProcessor,
            Some("ppt") | Some("pptx") => Self::Presentation,
            Some("pdf") => Self::Pdf,
            _ => Self::Other,
        }
    }

    /// Declared type wins; the file name is only consulted when no type was declared.
    pub fn classify(declared: &str, filename: &str) -> Self {
        if declared.trim().is_empty() {
            Self::from_extension(filename)
        } else {
            Self::from_mime(declared)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::WordProcessor => "word-processor",
            Self::Presentation => "presentation",
            Self::Pdf => "pdf",
            Self::Other => "other",
        }
    }
}
