//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{PdfError, WellrepError};
use crate::models::config::PdfConfig;

/// Which strategy produced a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextMethod {
    /// Text layer read by `pdf-extract`.
    #[serde(rename = "pdf_extract")]
    PdfExtract,
    /// Per-page content streams decoded by `lopdf`.
    #[serde(rename = "lopdf")]
    Lopdf,
    /// Text supplied directly, no PDF involved.
    #[serde(rename = "text_manual")]
    Manual,
}

impl TextMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextMethod::PdfExtract => "pdf_extract",
            TextMethod::Lopdf => "lopdf",
            TextMethod::Manual => "text_manual",
        }
    }
}

/// Text read from a document plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfText {
    #[serde(skip)]
    pub text: String,
    pub method: TextMethod,
    /// Length of `text` in characters.
    pub length: usize,
}

impl PdfText {
    pub fn new(text: String, method: TextMethod) -> Self {
        let length = text.chars().count();
        Self { text, method, length }
    }

    /// Wrap text that did not come from a PDF.
    pub fn manual(text: impl Into<String>) -> Self {
        Self::new(text.into(), TextMethod::Manual)
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the first `max_pages` pages.
    fn extract_text(&self, max_pages: u32) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Whether `path` has a `.pdf` extension (any case).
pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Read report text from a file: PDFs go through [`PdfExtractor`], anything
/// else is read as UTF-8 text.
pub fn read_document(path: &Path, config: &PdfConfig) -> std::result::Result<PdfText, WellrepError> {
    if !is_pdf_path(path) {
        return Ok(PdfText::manual(std::fs::read_to_string(path)?));
    }

    let data = std::fs::read(path)?;
    let read = PdfExtractor::read(&data, config)?;
    info!(
        "Read {} characters from {} using {}",
        read.length,
        path.display(),
        read.method.as_str()
    );
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_file_is_read_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relatorio.txt");
        std::fs::write(&path, "POÇO SPT-115").unwrap();

        let read = read_document(&path, &PdfConfig::default()).unwrap();
        assert_eq!(read.text, "POÇO SPT-115");
        assert_eq!(read.method, TextMethod::Manual);
        assert_eq!(read.length, 12);
    }

    #[test]
    fn test_broken_pdf_is_pdf_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relatorio.PDF");
        std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let err = read_document(&path, &PdfConfig::default()).unwrap_err();
        assert!(matches!(err, WellrepError::Pdf(_)));
    }
}
