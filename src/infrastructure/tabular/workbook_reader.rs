// ============================================================
// WORKBOOK PREVIEW READER
// ============================================================
// First worksheet of an .xlsx / .xls file as text cells

use std::fmt::Display;
use std::io::Cursor;

use calamine::{Data, DataType, Range, Reader, Xls, Xlsx};
use chrono::{NaiveDateTime, Timelike};

use crate::domain::error::{AppError, Result};
use crate::domain::upload::{FileFormat, ParsedPreview, PreviewRow, PREVIEW_ROW_LIMIT};

pub struct WorkbookPreviewReader {
    row_limit: usize,
}

impl Default for WorkbookPreviewReader {
    fn default() -> Self {
        Self {
            row_limit: PREVIEW_ROW_LIMIT,
        }
    }
}

impl WorkbookPreviewReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn read_bytes(&self, bytes: Vec<u8>, format: FileFormat) -> Result<ParsedPreview> {
        let cursor = Cursor::new(bytes);

        let range = match format {
            FileFormat::Xlsx => {
                let mut workbook: Xlsx<_> = Xlsx::new(cursor).map_err(excel_error)?;
                workbook.worksheet_range_at(0).transpose().map_err(excel_error)?
            }
            FileFormat::Xls => {
                let mut workbook: Xls<_> = Xls::new(cursor).map_err(excel_error)?;
                workbook.worksheet_range_at(0).transpose().map_err(excel_error)?
            }
            FileFormat::Csv => {
                return Err(AppError::Internal(
                    "CSV content passed to the workbook reader".to_string(),
                ))
            }
        };

        // A workbook without worksheets previews like an empty sheet.
        Ok(match range {
            Some(range) => self.preview_from_range(&range),
            None => ParsedPreview::empty(),
        })
    }

    /// Row 0 names the columns, the next `row_limit` rows are the preview.
    pub fn preview_from_range(&self, range: &Range<Data>) -> ParsedPreview {
        let mut rows = range.rows();

        let Some(header) = rows.next() else {
            return ParsedPreview::empty();
        };

        let columns = ParsedPreview::unique_columns(header.iter().map(cell_to_text));
        let body = rows
            .take(self.row_limit)
            .map(|row| PreviewRow::from_values(&columns, row.iter().map(cell_to_text)))
            .collect();

        ParsedPreview::new(columns, body)
    }
}

/// Render a cell the way it reads in the sheet.
pub fn cell_to_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_float(*f),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(format_datetime)
            .unwrap_or_else(|| cell.to_string()),
        Data::Error(e) => e.to_string(),
    }
}

fn excel_error(err: impl Display) -> AppError {
    AppError::ParseError(format!("Excel parsing error: {}", err))
}

fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    if value.time().num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
