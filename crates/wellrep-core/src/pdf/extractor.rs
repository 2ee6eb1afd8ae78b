//! PDF text extraction using pdf-extract with a lopdf fallback.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, PdfText, Result, TextMethod};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
///
/// The primary strategy reads the text layer with `pdf-extract`. When it
/// yields too little text, the pages are decoded one by one with `lopdf` and
/// that result is kept only if it is longer.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load `data` and read its text with the configured limits.
    pub fn read(data: &[u8], config: &PdfConfig) -> Result<PdfText> {
        let mut extractor = Self::new();
        extractor.load(data)?;
        extractor.read_text(config.max_pages, config.min_text_length)
    }

    /// Read the first `max_pages` pages (0 reads all of them), falling back
    /// to per-page decoding when the text layer has fewer than
    /// `min_text_length` characters.
    pub fn read_text(&self, max_pages: usize, min_text_length: usize) -> Result<PdfText> {
        let page_count = self.page_count();
        let pages = match u32::try_from(max_pages) {
            Ok(0) | Err(_) => page_count,
            Ok(limit) => limit.min(page_count),
        };

        let primary = match self.extract_text(pages) {
            Ok(text) => text,
            Err(e) => {
                warn!("Text layer extraction failed: {}", e);
                String::new()
            }
        };
        let primary_len = primary.trim().chars().count();

        if primary_len >= min_text_length {
            return Ok(PdfText::new(primary, TextMethod::PdfExtract));
        }

        debug!(
            "Text layer too short ({} < {}), decoding pages with lopdf",
            primary_len, min_text_length
        );

        let secondary = (1..=pages)
            .map(|page| {
                self.extract_page_text(page).unwrap_or_else(|e| {
                    warn!("Failed to decode page {}: {}", page, e);
                    String::new()
                })
            })
            .collect::<Vec<_>>()
            .join("\n");

        if secondary.trim().chars().count() > primary_len {
            Ok(PdfText::new(secondary, TextMethod::Lopdf))
        } else {
            Ok(PdfText::new(primary, TextMethod::PdfExtract))
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }

    /// Bytes of the loaded document restricted to its first `max_pages` pages.
    fn truncated_bytes(&self, max_pages: u32) -> Result<Vec<u8>> {
        let doc = self.document()?;
        let page_count = self.page_count();
        if page_count <= max_pages {
            return Ok(self.raw_data.clone());
        }

        let mut truncated = doc.clone();
        let extra: Vec<u32> = (max_pages + 1..=page_count).collect();
        truncated.delete_pages(&extra);

        let mut data = Vec::new();
        truncated
            .save_to(&mut data)
            .map_err(|e| PdfError::Parse(format!("Failed to save truncated PDF: {}", e)))?;
        Ok(data)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self, max_pages: u32) -> Result<String> {
        let data = self.truncated_bytes(max_pages)?;
        pdf_extract::extract_text_from_mem(&data).map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }
}
