//! Core data models used throughout pdfsheet.
//!
//! These types represent the tasks, rows, and failure records that flow
//! through the extraction and aggregation pipeline.

/// Maximum characters per output cell. One document's text is split into
/// `Part` rows of at most this many characters.
pub const MAX_CELL_CHARS: usize = 30_000;

/// Where a task's PDF bytes come from.
#[derive(Debug, Clone)]
pub enum Origin {
    /// Bytes already in hand (a local file).
    Local(Vec<u8>),
    /// A URL to fetch the bytes from.
    Remote(String),
}

/// One unit of work: extract text from a single document.
///
/// `identity` is the stable label (filename or URL) used to group output
/// rows belonging to this document.
#[derive(Debug, Clone)]
pub struct SourceTask {
    pub identity: String,
    pub origin: Origin,
}

/// One output spreadsheet row: a bounded-length slice of a document's text.
///
/// For the rows produced by one task, `part` values run `1..=N` with no
/// gaps, and concatenating `content` in `part` order reconstructs the
/// document's trimmed full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRow {
    pub identity: String,
    pub part: u32,
    pub content: String,
}

/// Pipeline stage at which a failure was captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Extract,
    Encode,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Fetch => write!(f, "fetch"),
            Stage::Extract => write!(f, "extract"),
            Stage::Encode => write!(f, "encode"),
        }
    }
}

/// One failure record. Failures are per-task (or per-group at encode time)
/// and never abort the batch.
#[derive(Debug, Clone)]
pub struct ProcessingError {
    pub identity: String,
    pub stage: Stage,
    pub message: String,
}

impl std::fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.identity, self.message)
    }
}

/// Aggregate output of one batch run: rows in task processing order plus
/// every captured failure.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    pub rows: Vec<ContentRow>,
    pub errors: Vec<ProcessingError>,
}
