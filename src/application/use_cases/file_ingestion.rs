// ============================================================
// FILE INGESTION USE CASE
// ============================================================
// Pick a reader from the file name and produce a bounded preview

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::upload::{FileFormat, ParsedPreview, RawFile, RawSource, PREVIEW_ROW_LIMIT};
use crate::infrastructure::tabular::{CsvPreviewReader, WorkbookPreviewReader};

pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Unsupported file type. Please upload a CSV or Excel file.";

static SUPPORTED_FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(csv|xlsx|xls)$").unwrap());

/// True for names ending in `.csv`, `.xlsx` or `.xls`, any case.
pub fn is_supported_filename(name: &str) -> bool {
    SUPPORTED_FILENAME_PATTERN.is_match(name)
}

/// Size in kilobytes with two decimals. Always KB, even for large files.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

pub struct FileIngestion {
    row_limit: usize,
}

impl Default for FileIngestion {
    fn default() -> Self {
        Self {
            row_limit: PREVIEW_ROW_LIMIT,
        }
    }
}

impl FileIngestion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the header and up to the preview limit of rows.
    ///
    /// Fails with `UnsupportedFormat` for unknown extensions and with
    /// `ParseError` when the content cannot be decoded; no partial preview
    /// is returned in either case.
    pub async fn parse_file(&self, file: &RawFile) -> Result<ParsedPreview> {
        let format = file
            .format()
            .ok_or_else(|| AppError::UnsupportedFormat(UNSUPPORTED_FILE_MESSAGE.to_string()))?;

        debug!(file = %file.name(), %format, "Parsing upload preview");

        let preview = match (format, file.source()) {
            (FileFormat::Csv, RawSource::Memory(bytes)) => CsvPreviewReader::new()
                .with_row_limit(self.row_limit)
                .read_bytes(bytes)?,
            (FileFormat::Csv, RawSource::Disk(path)) => {
                let path = path.clone();
                let row_limit = self.row_limit;
                tokio::task::spawn_blocking(move || {
                    CsvPreviewReader::new()
                        .with_row_limit(row_limit)
                        .read_path(&path)
                })
                .await
                .map_err(|e| AppError::Internal(format!("CSV reader task failed: {}", e)))??
            }
            (workbook, _) => {
                let bytes = file.read_bytes().await?;
                WorkbookPreviewReader::new()
                    .with_row_limit(self.row_limit)
                    .read_bytes(bytes, workbook)?
            }
        };

        Ok(preview)
    }
}
