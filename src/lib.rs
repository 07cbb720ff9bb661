//! # pdfsheet
//!
//! Batch PDF text extraction into a single downloadable spreadsheet.
//!
//! pdfsheet turns a heterogeneous set of inputs — local PDF files, URLs
//! listed in a workbook column, or URLs pasted as plain text — into one
//! xlsx workbook with a row per (document, chunk) pair. Failures are
//! isolated per input: a corrupt PDF or unreachable URL is recorded in
//! the error log and never aborts the batch.
//!
//! ```text
//! ┌───────────┐   ┌─────────┐   ┌─────────────────┐   ┌──────────┐
//! │  Resolver  │──▶│  Batch   │──▶│    Assembler     │──▶│   xlsx    │
//! │ files/urls │   │ fetch +  │   │ group + probe +  │   │ workbook  │
//! │            │   │ extract  │   │ serialize        │   │ + errors  │
//! └───────────┘   └─────────┘   └─────────────────┘   └──────────┘
//! ```
//!
//! No OCR is performed; source PDFs must contain extractable text layers.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Core data types and the cell size limit |
//! | [`resolve`] | Input normalization (files, workbook column, pasted text) |
//! | [`fetch`] | HTTP fetcher with bounded retry |
//! | [`extract`] | PDF per-page text extraction |
//! | [`chunk`] | Fixed-size character chunking |
//! | [`batch`] | Batch job driving the pipeline with per-task error isolation |
//! | [`assemble`] | Row grouping, probe encoding, final serialization |
//! | [`workbook`] | Minimal xlsx writer |
//! | [`progress`] | Progress reporting on stderr |

pub mod assemble;
pub mod batch;
pub mod chunk;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod progress;
pub mod resolve;
pub mod workbook;
