pub mod docx;
pub mod extractor;
pub mod pdf;
pub mod sanitize;
pub mod storage;

pub use docx::DocxExtractor;
pub use extractor::{join_units, DocumentKind, TextExtractor, UNIT_SEPARATOR};
pub use pdf::PdfExtractor;
pub use sanitize::{secure_filename, storage_name};
pub use storage::{unique_name, Storage};
