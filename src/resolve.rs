//! Input resolution: normalizes the three supported input modes into one
//! ordered list of [`SourceTask`]s.
//!
//! Modes: local PDF files, a workbook column of URLs, or free text with
//! URLs pasted into it. Resolution-time problems that are not batch data
//! (a selected sheet missing the URL column) are reported as warnings, not
//! [`ProcessingError`](crate::models::ProcessingError)s. An empty task
//! list means "no valid input" and the caller must stop before running
//! the batch.

use anyhow::{Context, Result};
use calamine::Reader;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::models::{Origin, SourceTask};

lazy_static! {
    /// `http://` or `https://` followed by non-whitespace. Deliberately
    /// greedy: trailing punctuation is part of the match.
    static ref URL_PATTERN: Regex = Regex::new(r"https?://\S+").expect("valid URL pattern");
}

/// Which sheets of the input workbook to read URLs from.
#[derive(Debug, Clone)]
pub enum SheetSelection {
    All,
    Named(String),
}

/// Resolved inputs: the ordered task list plus resolution-time warnings.
#[derive(Debug, Default)]
pub struct Resolution {
    pub tasks: Vec<SourceTask>,
    pub warnings: Vec<String>,
}

/// Local-files mode: one task per (name, bytes) pair, in the given order.
pub fn resolve_files(files: Vec<(String, Vec<u8>)>) -> Resolution {
    let tasks = files
        .into_iter()
        .map(|(name, bytes)| SourceTask {
            identity: name,
            origin: Origin::Local(bytes),
        })
        .collect();
    Resolution {
        tasks,
        warnings: Vec::new(),
    }
}

/// Workbook mode: read the named column from the selected sheet(s); every
/// non-empty cell value becomes one remote task. Blank cells are skipped
/// silently. A selected sheet without the column contributes zero tasks
/// and one warning. Duplicate URLs are not deduplicated.
pub fn resolve_workbook(
    path: &Path,
    selection: &SheetSelection,
    column: &str,
) -> Result<Resolution> {
    let mut workbook = calamine::open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook: {}", path.display()))?;

    let names = workbook.sheet_names().to_owned();
    let selected: Vec<String> = match selection {
        SheetSelection::All => names,
        SheetSelection::Named(name) => {
            if !names.iter().any(|n| n == name) {
                anyhow::bail!("sheet '{}' not found in {}", name, path.display());
            }
            vec![name.clone()]
        }
    };

    let mut resolution = Resolution::default();
    for sheet in &selected {
        let range = match workbook.worksheet_range(sheet) {
            Ok(r) => r,
            Err(e) => {
                resolution
                    .warnings
                    .push(format!("sheet '{}': failed to read ({})", sheet, e));
                continue;
            }
        };

        let mut rows = range.rows();
        let header = match rows.next() {
            Some(h) => h,
            None => {
                resolution
                    .warnings
                    .push(format!("sheet '{}': empty, no '{}' column", sheet, column));
                continue;
            }
        };
        let col_idx = header
            .iter()
            .position(|cell| cell_to_string(cell).trim() == column);
        let col_idx = match col_idx {
            Some(i) => i,
            None => {
                resolution
                    .warnings
                    .push(format!("sheet '{}': no '{}' column", sheet, column));
                continue;
            }
        };

        for row in rows {
            let value = row.get(col_idx).map(cell_to_string).unwrap_or_default();
            let url = value.trim();
            if url.is_empty() {
                continue;
            }
            resolution.tasks.push(SourceTask {
                identity: url.to_string(),
                origin: Origin::Remote(url.to_string()),
            });
        }
    }

    Ok(resolution)
}

/// Pasted-text mode: every URL-shaped substring, in order of appearance,
/// becomes one remote task. No deduplication.
pub fn resolve_pasted_text(text: &str) -> Resolution {
    let tasks = URL_PATTERN
        .find_iter(text)
        .map(|m| SourceTask {
            identity: m.as_str().to_string(),
            origin: Origin::Remote(m.as_str().to_string()),
        })
        .collect();
    Resolution {
        tasks,
        warnings: Vec::new(),
    }
}

fn cell_to_string(cell: &calamine::DataType) -> String {
    use calamine::DataType as D;
    match cell {
        D::Empty => String::new(),
        D::String(s) => s.clone(),
        D::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        D::Int(i) => i.to_string(),
        D::Bool(b) => b.to_string(),
        other => format!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasted_text_finds_urls_in_order() {
        let res = resolve_pasted_text("see http://a.com/x.pdf and also https://b.com/y.pdf!");
        let ids: Vec<&str> = res.tasks.iter().map(|t| t.identity.as_str()).collect();
        // Trailing punctuation is part of the match per the
        // non-whitespace rule; this boundary is intentional.
        assert_eq!(ids, vec!["http://a.com/x.pdf", "https://b.com/y.pdf!"]);
    }

    #[test]
    fn pasted_text_without_urls_resolves_nothing() {
        let res = resolve_pasted_text("no links here, just prose");
        assert!(res.tasks.is_empty());
        assert!(res.warnings.is_empty());
    }

    #[test]
    fn pasted_text_keeps_duplicates() {
        let res = resolve_pasted_text("http://a.com/p.pdf twice http://a.com/p.pdf");
        assert_eq!(res.tasks.len(), 2);
    }

    #[test]
    fn files_resolve_in_given_order() {
        let res = resolve_files(vec![
            ("a.pdf".to_string(), vec![1]),
            ("b.pdf".to_string(), vec![2]),
        ]);
        assert_eq!(res.tasks.len(), 2);
        assert_eq!(res.tasks[0].identity, "a.pdf");
        assert!(matches!(res.tasks[0].origin, Origin::Local(_)));
        assert_eq!(res.tasks[1].identity, "b.pdf");
    }
}
