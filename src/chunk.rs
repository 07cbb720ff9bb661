//! Fixed-size text chunker.
//!
//! Splits a document's extracted text into contiguous, non-overlapping
//! slices of at most `limit` characters for placement into spreadsheet
//! cells. Counts are characters, not bytes, so slicing stays on UTF-8
//! boundaries. Empty input produces zero chunks: a document with no
//! extractable text contributes no rows and is not an error.

/// Split `text` into ordered chunks of at most `limit` characters. The
/// final chunk may be shorter; concatenating all chunks reproduces `text`.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    assert!(limit > 0, "chunk limit must be positive");

    let mut chunks = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        let split_at = remaining
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        chunks.push(remaining[..split_at].to_string());
        remaining = &remaining[split_at..];
    }
    chunks
}
