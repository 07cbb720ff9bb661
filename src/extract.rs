//! PDF text extraction.
//!
//! Given raw PDF bytes, returns per-page text. Extraction is pipeline-layer:
//! the resolver supplies bytes; this module returns plain UTF-8 text. No OCR
//! is performed — scanned PDFs without a text layer yield empty pages.

/// Extraction error. The batch aggregator captures this per document and
/// moves on; it never aborts the run.
#[derive(Debug)]
pub enum ExtractError {
    /// Malformed, encrypted, or non-PDF input.
    Pdf(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Pdf(e) => write!(f, "PDF extraction failed: {}", e),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extracts text from each page of a PDF, in page order.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Joins page texts into one document string: pages yielding no text at
/// all are skipped, the rest are joined with a blank line, and the result
/// is trimmed. A page of pure whitespace still counts as text and keeps
/// its separators. Returns an empty string (never an error) when no page
/// has text.
pub fn join_pages(pages: &[String]) -> String {
    let mut out = String::new();
    for page in pages {
        if page.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(page);
    }
    out.trim().to_string()
}
