use crate::error::ExtractError;
use lopdf::Document;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Turns an uploaded binary document into plain text.
pub trait ResumeExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl ResumeExtractor for LopdfExtractor {
    /// Concatenates page texts in page order. A document that parses but
    /// has no text layer on any page yields [`ExtractError::EmptyDocument`].
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let pages = extract_page_texts(bytes)?;

        if pages.iter().all(|page| page.text.trim().is_empty()) {
            return Err(ExtractError::EmptyDocument);
        }

        Ok(pages
            .into_iter()
            .map(|page| page.text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

pub fn extract_page_texts(bytes: &[u8]) -> Result<Vec<PageText>, ExtractError> {
    let document =
        Document::load_mem(bytes).map_err(|error| ExtractError::PdfParse(error.to_string()))?;

    let mut pages = Vec::new();
    for (page_no, _page_id) in document.get_pages() {
        let text = document
            .extract_text(&[page_no])
            .map_err(|error| ExtractError::PdfParse(error.to_string()))?;

        debug!(page = page_no, chars = text.len(), "extracted page text");
        pages.push(PageText {
            number: page_no,
            text,
        });
    }

    Ok(pages)
}
