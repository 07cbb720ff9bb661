//! Spreadsheet assembly: groups rows by source identity and serializes the
//! groups that can be encoded.
//!
//! The underlying workbook writer fails at document granularity, not cell
//! granularity, so assembly is probe-then-commit: each group is encoded
//! alone first to find poison, then the survivors are encoded together.
//! One unprocessable document must never block every other document's rows
//! from being delivered.

use std::collections::HashMap;

use crate::models::{ContentRow, ProcessingError, Stage};
use crate::workbook::write_workbook;

/// Assembly output: the workbook bytes (absent when no group survived)
/// plus one encode error per excluded group.
#[derive(Debug)]
pub struct Assembled {
    pub workbook: Option<Vec<u8>>,
    pub rows_written: usize,
    pub errors: Vec<ProcessingError>,
}

/// Group `rows` by identity and serialize every group that encodes
/// cleanly into one workbook. `label` is the identity column header
/// ("Filename" for local files, "URL" for remote modes).
pub fn assemble(rows: &[ContentRow], label: &str) -> Assembled {
    if rows.is_empty() {
        return Assembled {
            workbook: None,
            rows_written: 0,
            errors: Vec::new(),
        };
    }

    // Group in first-seen order. Rows arrive in processing order, so each
    // group's parts are already ascending.
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<ContentRow>)> = Vec::new();
    for row in rows {
        let idx = *group_index.entry(&row.identity).or_insert_with(|| {
            groups.push((&row.identity, Vec::new()));
            groups.len() - 1
        });
        groups[idx].1.push(row.clone());
    }

    let mut errors = Vec::new();
    let mut surviving: Vec<ContentRow> = Vec::new();
    for (identity, group) in groups {
        match write_workbook(label, &group) {
            Ok(_) => surviving.extend(group),
            Err(e) => errors.push(ProcessingError {
                identity: identity.to_string(),
                stage: Stage::Encode,
                message: e.to_string(),
            }),
        }
    }

    if surviving.is_empty() {
        return Assembled {
            workbook: None,
            rows_written: 0,
            errors,
        };
    }

    let rows_written = surviving.len();
    match write_workbook(label, &surviving) {
        Ok(bytes) => Assembled {
            workbook: Some(bytes),
            rows_written,
            errors,
        },
        Err(e) => {
            // Every group probed clean, so a combined-write failure is a
            // writer defect rather than input poison. Still reported, not
            // propagated.
            errors.push(ProcessingError {
                identity: "(combined output)".to_string(),
                stage: Stage::Encode,
                message: e.to_string(),
            });
            Assembled {
                workbook: None,
                rows_written: 0,
                errors,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(identity: &str, part: u32, content: &str) -> ContentRow {
        ContentRow {
            identity: identity.to_string(),
            part,
            content: content.to_string(),
        }
    }

    #[test]
    fn empty_rows_produce_no_workbook_and_no_errors() {
        let out = assemble(&[], "Filename");
        assert!(out.workbook.is_none());
        assert!(out.errors.is_empty());
    }

    #[test]
    fn poisoned_group_is_excluded_but_others_survive() {
        let rows = vec![
            row("good.pdf", 1, "fine text"),
            row("bad.pdf", 1, "poison\u{0002}here"),
            row("also-good.pdf", 1, "more fine text"),
        ];
        let out = assemble(&rows, "Filename");
        assert!(out.workbook.is_some());
        assert_eq!(out.rows_written, 2);
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].identity, "bad.pdf");
        assert_eq!(out.errors[0].stage, Stage::Encode);
    }

    #[test]
    fn all_groups_poisoned_yields_no_workbook() {
        let rows = vec![row("bad.pdf", 1, "\u{0000}")];
        let out = assemble(&rows, "Filename");
        assert!(out.workbook.is_none());
        assert_eq!(out.errors.len(), 1);
    }

    #[test]
    fn multi_part_group_stays_together_in_order() {
        let rows = vec![
            row("a.pdf", 1, "first"),
            row("b.pdf", 1, "other"),
            row("a.pdf", 2, "second"),
        ];
        let out = assemble(&rows, "Filename");
        assert!(out.workbook.is_some());
        assert!(out.errors.is_empty());
    }
}
