use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Document,
    Summary,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Document => "document",
            ViewMode::Summary => "summary",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain;charset=utf-8",
            ExportFormat::Markdown => "text/markdown;charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            other => Err(format!("Unsupported export format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBlob {
    pub file_name: String,
    pub mime_type: &'static str,
    pub body: String,
}

impl ExportBlob {
    pub async fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, self.body.as_bytes()).await?;
        tracing::info!(path = %path.display(), bytes = self.body.len(), "Export written");
        Ok(path)
    }
}

/// Builds the downloadable form of the content currently shown for `title`.
pub fn export(title: &str, content: &str, mode: ViewMode, format: ExportFormat) -> ExportBlob {
    let body = match format {
        ExportFormat::Text => content.to_string(),
        ExportFormat::Markdown => match mode {
            ViewMode::Summary => format!("# Summary of {title}\n\n{content}"),
            ViewMode::Document => format!("# {title}\n\n{content}"),
        },
    };

    ExportBlob {
        file_name: format!("{}_{}.{}", file_stem(title), mode, format.extension()),
        mime_type: format.mime_type(),
        body,
    }
}

/// Everything before the first `.`; `report.final.txt` becomes `report`.
fn file_stem(title: &str) -> &str {
    match title.split('.').next() {
        Some(stem) if !stem.trim().is_empty() => stem,
        _ => "document",
    }
}
