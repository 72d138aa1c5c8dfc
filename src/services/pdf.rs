use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::services::extractor::{join_units, TextExtractor};

/// Per-page text extraction for PDF documents.
///
/// Pages without a text layer (scanned images) and pages whose content
/// cannot be decoded contribute an empty string instead of failing the
/// whole document. No OCR is attempted.
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn pages(document: &Document) -> Vec<String> {
        document
            .get_pages()
            .into_keys()
            .map(|page_number| match document.extract_text(&[page_number]) {
                Ok(text) => text.trim_end().to_string(),
                Err(e) => {
                    warn!(page = page_number, error = %e, "Page text extraction failed, using empty text");
                    String::new()
                }
            })
            .collect()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> AppResult<String> {
        let document = Document::load(path)?;
        let pages = Self::pages(&document);
        debug!(path = %path.display(), pages = pages.len(), "Read pdf pages");
        Ok(join_units(pages))
    }
}
