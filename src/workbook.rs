//! Minimal xlsx writer.
//!
//! Serializes content rows into a single-sheet OOXML workbook (ZIP of XML
//! parts, inline strings only). This is the write-side mirror of the same
//! zip + quick-xml stack used elsewhere for OOXML parsing; the output is
//! readable by Excel, LibreOffice, and `calamine`.
//!
//! Cell text is restricted to characters XML 1.0 can carry. Encoding a row
//! set containing a restricted character fails with
//! [`EncodeError::IllegalCharacter`] — the assembler relies on this to
//! probe groups in isolation.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::models::ContentRow;

/// Name of the single output sheet.
pub const SHEET_NAME: &str = "PDF Contents";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Workbook encoding failure.
#[derive(Debug)]
pub enum EncodeError {
    /// A cell contains a character the spreadsheet cell format cannot
    /// carry (control characters other than tab/CR/LF, or U+FFFE/U+FFFF).
    IllegalCharacter(char),
    /// ZIP or XML serialization failure.
    Workbook(String),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::IllegalCharacter(c) => {
                write!(f, "illegal character U+{:04X} for spreadsheet cell", *c as u32)
            }
            EncodeError::Workbook(e) => write!(f, "workbook serialization failed: {}", e),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Returns the first character of `text` that cannot be stored in a cell.
pub fn find_illegal_char(text: &str) -> Option<char> {
    text.chars().find(|&c| {
        (c < ' ' && c != '\t' && c != '\n' && c != '\r') || c == '\u{FFFE}' || c == '\u{FFFF}'
    })
}

/// Serialize `rows` into a complete xlsx byte stream with the column
/// headers `label`, "Part", "Content". Rows are written in the order
/// given; callers are responsible for grouping.
pub fn write_workbook(label: &str, rows: &[ContentRow]) -> Result<Vec<u8>, EncodeError> {
    for row in rows {
        if let Some(c) = find_illegal_char(&row.content) {
            return Err(EncodeError::IllegalCharacter(c));
        }
        if let Some(c) = find_illegal_char(&row.identity) {
            return Err(EncodeError::IllegalCharacter(c));
        }
    }

    let sheet = sheet_xml(label, rows).map_err(|e| EncodeError::Workbook(e.to_string()))?;
    let workbook_xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        NS_MAIN, NS_REL, SHEET_NAME
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let parts: [(&str, &[u8]); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("xl/workbook.xml", workbook_xml.as_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
        ("xl/worksheets/sheet1.xml", &sheet),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| EncodeError::Workbook(e.to_string()))?;
        zip.write_all(content)
            .map_err(|e| EncodeError::Workbook(e.to_string()))?;
    }
    let cursor = zip
        .finish()
        .map_err(|e| EncodeError::Workbook(e.to_string()))?;
    Ok(cursor.into_inner())
}

/// Build `xl/worksheets/sheet1.xml`: a header row plus one row per
/// [`ContentRow`]. Strings are inline (`t="inlineStr"`), the Part column
/// is numeric.
fn sheet_xml(label: &str, rows: &[ContentRow]) -> Result<Vec<u8>, quick_xml::Error> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute(("xmlns", NS_MAIN));
    writer.write_event(Event::Start(worksheet))?;
    writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

    write_header_row(&mut writer, label)?;
    for (i, row) in rows.iter().enumerate() {
        // Row 1 is the header.
        let row_num = i + 2;
        let mut r = BytesStart::new("row");
        r.push_attribute(("r", row_num.to_string().as_str()));
        writer.write_event(Event::Start(r))?;
        write_text_cell(&mut writer, 'A', row_num, &row.identity)?;
        write_number_cell(&mut writer, 'B', row_num, row.part)?;
        write_text_cell(&mut writer, 'C', row_num, &row.content)?;
        writer.write_event(Event::End(BytesEnd::new("row")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
    writer.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(writer.into_inner().into_inner())
}

fn write_header_row(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    label: &str,
) -> Result<(), quick_xml::Error> {
    let mut r = BytesStart::new("row");
    r.push_attribute(("r", "1"));
    writer.write_event(Event::Start(r))?;
    write_text_cell(writer, 'A', 1, label)?;
    write_text_cell(writer, 'B', 1, "Part")?;
    write_text_cell(writer, 'C', 1, "Content")?;
    writer.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}

fn write_text_cell(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    col: char,
    row_num: usize,
    text: &str,
) -> Result<(), quick_xml::Error> {
    let mut c = BytesStart::new("c");
    c.push_attribute(("r", format!("{}{}", col, row_num).as_str()));
    c.push_attribute(("t", "inlineStr"));
    writer.write_event(Event::Start(c))?;
    writer.write_event(Event::Start(BytesStart::new("is")))?;
    let mut t = BytesStart::new("t");
    t.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(t))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("t")))?;
    writer.write_event(Event::End(BytesEnd::new("is")))?;
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

fn write_number_cell(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    col: char,
    row_num: usize,
    value: u32,
) -> Result<(), quick_xml::Error> {
    let mut c = BytesStart::new("c");
    c.push_attribute(("r", format!("{}{}", col, row_num).as_str()));
    writer.write_event(Event::Start(c))?;
    writer.write_event(Event::Start(BytesStart::new("v")))?;
    writer.write_event(Event::Text(BytesText::new(&value.to_string())))?;
    writer.write_event(Event::End(BytesEnd::new("v")))?;
    writer.write_event(Event::End(BytesEnd::new("c")))?;
    Ok(())
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
