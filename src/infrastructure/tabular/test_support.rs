// Builds small but real .xlsx archives for reader tests

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) struct Sheet<'a> {
    pub name: &'a str,
    pub rows: Vec<Vec<String>>,
}

impl<'a> Sheet<'a> {
    pub fn new(name: &'a str, rows: Vec<Vec<String>>) -> Self {
        Self { name, rows }
    }
}

/// Cells that parse as numbers are stored as numbers, everything else as
/// inline strings.
pub(crate) fn xlsx_workbook(sheets: &[Sheet<'_>]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buf));

        let mut entry = |name: &str, body: &str| {
            let options: FileOptions<'_, ()> =
                FileOptions::default().compression_method(CompressionMethod::Stored);
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };

        entry("[Content_Types].xml", CONTENT_TYPES);
        entry("xl/workbook.xml", &workbook_xml(sheets));
        entry("xl/_rels/workbook.xml.rels", &relationships_xml(sheets.len()));
        for (idx, sheet) in sheets.iter().enumerate() {
            entry(
                &format!("xl/worksheets/sheet{}.xml", idx + 1),
                &worksheet_xml(&sheet.rows),
            );
        }

        zip.finish().unwrap();
    }
    buf
}

fn workbook_xml(sheets: &[Sheet<'_>]) -> String {
    let entries: String = sheets
        .iter()
        .enumerate()
        .map(|(idx, sheet)| {
            format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape(sheet.name),
                idx + 1,
                idx + 1
            )
        })
        .collect();
    format!(r#"<workbook xmlns="{MAIN_NS}" xmlns:r="{REL_NS}"><sheets>{entries}</sheets></workbook>"#)
}

fn relationships_xml(count: usize) -> String {
    let entries: String = (1..=count)
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{n}" Type="{REL_NS}/worksheet" Target="worksheets/sheet{n}.xml"/>"#
            )
        })
        .collect();
    format!(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{entries}</Relationships>"#
    )
}

fn worksheet_xml(rows: &[Vec<String>]) -> String {
    let mut data = String::new();
    for (r, row) in rows.iter().enumerate() {
        data.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            let reference = format!("{}{}", column_letters(c), r + 1);
            if value.parse::<f64>().is_ok() {
                data.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#));
            } else {
                data.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    escape(value)
                ));
            }
        }
        data.push_str("</row>");
    }
    format!(r#"<worksheet xmlns="{MAIN_NS}"><sheetData>{data}</sheetData></worksheet>"#)
}

fn column_letters(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap()
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
    }
}
