// ============================================================
// CSV PREVIEW READER
// ============================================================
// Read the header and a bounded number of records from delimited text

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};
use encoding_rs::WINDOWS_1252;

use crate::domain::error::{AppError, Result};
use crate::domain::upload::{ParsedPreview, PreviewRow, PREVIEW_ROW_LIMIT};

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];
const SNIFF_LINES: usize = 10;
/// Only this much of an in-memory upload is decoded to sniff the delimiter.
const SNIFF_BYTES: usize = 8 * 1024;

/// CSV reader that stops after a fixed number of data rows
pub struct CsvPreviewReader {
    /// Fixed delimiter; detected from the input when `None`
    delimiter: Option<u8>,

    /// Maximum number of data rows to collect
    row_limit: usize,
}

impl Default for CsvPreviewReader {
    fn default() -> Self {
        Self {
            delimiter: None,
            row_limit: PREVIEW_ROW_LIMIT,
        }
    }
}

impl CsvPreviewReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Preview CSV content already held in memory
    pub fn read_bytes(&self, bytes: &[u8]) -> Result<ParsedPreview> {
        let delimiter = self.delimiter.unwrap_or_else(|| {
            let sample = &bytes[..bytes.len().min(SNIFF_BYTES)];
            Self::detect_delimiter(&String::from_utf8_lossy(sample))
        });

        self.read_from(bytes, delimiter)
    }

    /// Preview a CSV file on disk without loading all of it
    pub fn read_path(&self, path: &Path) -> Result<ParsedPreview> {
        let file = File::open(path).map_err(|e| {
            AppError::IoError(format!("Failed to open file {}: {}", path.display(), e))
        })?;
        let mut reader = BufReader::new(file);

        let delimiter = match self.delimiter {
            Some(delimiter) => delimiter,
            None => {
                let sample = reader.fill_buf().map_err(|e| {
                    AppError::IoError(format!("Failed to read file {}: {}", path.display(), e))
                })?;
                Self::detect_delimiter(&String::from_utf8_lossy(sample))
            }
        };

        self.read_from(reader, delimiter)
    }

    fn read_from<R: Read>(&self, source: R, delimiter: u8) -> Result<ParsedPreview> {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .trim(Trim::None)
            .from_reader(source);

        let headers = reader.byte_headers().map_err(Self::parse_error)?.clone();
        let columns = ParsedPreview::unique_columns(
            headers
                .iter()
                .enumerate()
                .map(|(idx, raw)| Self::header_name(idx, raw)),
        );

        if columns.is_empty() {
            return Ok(ParsedPreview::empty());
        }

        let mut rows = Vec::new();
        let mut record = ByteRecord::new();

        while rows.len() < self.row_limit {
            let has_record = reader
                .read_byte_record(&mut record)
                .map_err(Self::parse_error)?;
            if !has_record {
                break;
            }

            rows.push(PreviewRow::from_values(
                &columns,
                record.iter().map(Self::decode_cell),
            ));
        }

        Ok(ParsedPreview::new(columns, rows))
    }

    fn parse_error(err: csv::Error) -> AppError {
        AppError::ParseError(format!("CSV parsing error: {}", err))
    }

    fn header_name(idx: usize, raw: &[u8]) -> String {
        let name = Self::decode_cell(raw);
        if idx == 0 {
            name.trim_start_matches('\u{feff}').to_string()
        } else {
            name
        }
    }

    /// UTF-8 when valid, otherwise Windows-1252
    fn decode_cell(raw: &[u8]) -> String {
        match std::str::from_utf8(raw) {
            Ok(text) => text.to_string(),
            Err(_) => WINDOWS_1252
                .decode_without_bom_handling(raw)
                .0
                .into_owned(),
        }
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let sample_lines: Vec<&str> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(SNIFF_LINES)
            .collect();

        if sample_lines.is_empty() {
            return b',';
        }

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &DELIMITER_CANDIDATES {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }
}
