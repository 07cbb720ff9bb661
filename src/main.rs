//! # pdfsheet CLI
//!
//! Batch PDF text extraction into a single downloadable spreadsheet.
//!
//! ## Usage
//!
//! ```bash
//! # Local PDF files
//! pdfsheet files report.pdf appendix.pdf --output pdf_contents.xlsx
//!
//! # URLs listed in a workbook column (all sheets, or one with --sheet)
//! pdfsheet sheet sources.xlsx --column "Document URL"
//! pdfsheet sheet sources.xlsx --column URL --sheet "Q3 filings"
//!
//! # URLs pasted as plain text (file argument or stdin)
//! pdfsheet text links.txt
//! pbpaste | pdfsheet text
//! ```
//!
//! The output workbook has one sheet ("PDF Contents") with three columns:
//! the identity column ("Filename" for local files, "URL" otherwise),
//! "Part", and "Content". Per-input failures are listed on stderr and
//! never abort the batch.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use pdfsheet::assemble::assemble;
use pdfsheet::batch::BatchJob;
use pdfsheet::fetch::{build_client, RetryPolicy};
use pdfsheet::models::ProcessingError;
use pdfsheet::progress::ProgressMode;
use pdfsheet::resolve::{self, Resolution, SheetSelection};

/// pdfsheet — extract text from batches of PDFs into one spreadsheet.
///
/// No OCR is performed; source PDFs must contain extractable text layers.
#[derive(Parser)]
#[command(
    name = "pdfsheet",
    about = "Extract text from batches of PDFs into a single xlsx workbook",
    version,
    long_about = "pdfsheet converts a set of PDF documents — local files, URLs listed in a \
    workbook column, or URLs pasted as plain text — into one xlsx workbook with a row per \
    (document, chunk) pair. Unprocessable inputs are reported and skipped; they never abort \
    the batch."
)]
struct Cli {
    /// Path to write the output workbook.
    #[arg(long, global = true, default_value = "pdf_contents.xlsx")]
    output: PathBuf,

    /// Progress reporting on stderr: auto, off, human, or json.
    ///
    /// `auto` shows human progress when stderr is a TTY and is silent
    /// otherwise.
    #[arg(long, global = true, default_value = "auto")]
    progress: String,

    #[command(subcommand)]
    command: Commands,
}

/// Input modes.
#[derive(Subcommand)]
enum Commands {
    /// Extract text from local PDF files.
    ///
    /// Each file becomes one group of output rows keyed by its file name.
    Files {
        /// PDF files to process, in order.
        files: Vec<PathBuf>,
    },

    /// Extract text from PDFs at URLs listed in a workbook column.
    ///
    /// Reads the named column from every sheet (or one sheet with
    /// --sheet); blank cells are skipped, and a sheet without the column
    /// produces a warning. Duplicate URLs are fetched again, not
    /// deduplicated.
    Sheet {
        /// Input workbook (xlsx / xls / ods).
        workbook: PathBuf,

        /// Header name of the column holding the URLs.
        #[arg(long)]
        column: String,

        /// Restrict to one sheet by name. Default: all sheets.
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Extract text from PDFs at URLs found in pasted text.
    ///
    /// Scans for http(s):// substrings in order of appearance. Reads the
    /// given file, or stdin when no file is given.
    Text {
        /// Text file to scan. Omit to read from stdin.
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = match cli.progress.as_str() {
        "auto" => ProgressMode::default_for_tty(),
        "off" => ProgressMode::Off,
        "human" => ProgressMode::Human,
        "json" => ProgressMode::Json,
        other => bail!("unknown progress mode: '{}'. Must be auto, off, human, or json.", other),
    };

    let (resolution, label) = match &cli.command {
        Commands::Files { files } => {
            let mut named = Vec::with_capacity(files.len());
            for path in files {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                named.push((name, bytes));
            }
            (resolve::resolve_files(named), "Filename")
        }
        Commands::Sheet {
            workbook,
            column,
            sheet,
        } => {
            let selection = match sheet {
                Some(name) => SheetSelection::Named(name.clone()),
                None => SheetSelection::All,
            };
            (
                resolve::resolve_workbook(workbook, &selection, column)?,
                "URL",
            )
        }
        Commands::Text { file } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            (resolve::resolve_pasted_text(&text), "URL")
        }
    };

    let Resolution { tasks, warnings } = resolution;
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }
    if tasks.is_empty() {
        bail!("no valid input: nothing to process");
    }

    let client = build_client().context("failed to build HTTP client")?;
    let reporter = progress.reporter();
    let result = BatchJob::new(tasks)
        .run(&client, RetryPolicy::default(), reporter.as_ref())
        .await;

    let assembled = assemble(&result.rows, label);
    let mut errors: Vec<ProcessingError> = result.errors;
    errors.extend(assembled.errors);

    match assembled.workbook {
        Some(bytes) => {
            std::fs::write(&cli.output, &bytes)
                .with_context(|| format!("failed to write {}", cli.output.display()))?;
            println!(
                "wrote {} ({} rows; {} inputs failed)",
                cli.output.display(),
                assembled.rows_written,
                errors.len()
            );
        }
        None => {
            println!("No content could be processed successfully — no workbook written.");
        }
    }

    if !errors.is_empty() {
        eprintln!("Error details ({}):", errors.len());
        for err in &errors {
            eprintln!("  {}", err);
        }
    }

    Ok(())
}
