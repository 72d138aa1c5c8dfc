use std::path::{Path, PathBuf};

use crate::error::AppResult;
use crate::services::docx::DocxExtractor;
use crate::services::pdf::PdfExtractor;

/// Blank line placed between extracted paragraphs or pages.
pub const UNIT_SEPARATOR: &str = "\n\n";

/// Turns a document on disk into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> AppResult<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Matches an already lowercased extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "docx" => Some(DocumentKind::Docx),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Docx => "docx",
            DocumentKind::Pdf => "pdf",
        }
    }

    pub fn extractor(&self) -> &'static dyn TextExtractor {
        match self {
            DocumentKind::Docx => &DocxExtractor,
            DocumentKind::Pdf => &PdfExtractor,
        }
    }

    /// Runs the matching extractor on the blocking thread pool.
    pub async fn extract(self, path: PathBuf) -> AppResult<String> {
        tokio::task::spawn_blocking(move || self.extractor().extract(&path)).await?
    }
}

pub fn join_units<I>(units: I) -> String
where
    I: IntoIterator<Item = String>,
{
    units.into_iter().collect::<Vec<_>>().join(UNIT_SEPARATOR)
}
