// src/pdf/reader.rs
use crate::utils::error::PdfError;
use lopdf::Document;
use std::path::Path;

/// Anything that can turn a document path into its page texts, in page order.
pub trait TextSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, PdfError>;
}

/// Text source backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfSource;

impl TextSource for LopdfSource {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, PdfError> {
        tracing::info!("Opening PDF document: {}", path.display());

        // The document is dropped when this function returns
        let doc = Document::load(path).map_err(|e| PdfError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pages = doc.get_pages();
        tracing::debug!("Document has {} pages", pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        // get_pages is a BTreeMap keyed by page number, so iteration is in page order
        for page_num in pages.keys() {
            let text = doc.extract_text(&[*page_num]).map_err(|e| PdfError::PageText {
                path: path.display().to_string(),
                page: *page_num,
                reason: e.to_string(),
            })?;
            tracing::trace!("Page {}: {} bytes of text", page_num, text.len());
            texts.push(text);
        }

        Ok(texts)
    }
}

/// Extracts the whole document text, each page followed by a newline.
pub fn extract_text<S: TextSource + ?Sized>(source: &S, path: &Path) -> Result<String, PdfError> {
    let pages = source.page_texts(path)?;
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in &pages {
        text.push_str(page);
        text.push('\n');
    }
    tracing::info!("Extracted {} bytes of text from {} pages", text.len(), pages.len());
    Ok(text)
}
