use serde::Serialize;
use tracing::{info, warn};

use crate::application::use_cases::column_detection::{analyze_columns, ColumnDetector};
use crate::application::use_cases::file_ingestion::{
    format_file_size, is_supported_filename, FileIngestion, UNSUPPORTED_FILE_MESSAGE,
};
use crate::domain::error::{AppError, Result};
use crate::domain::upload::{ColumnProfile, DetectedColumns, ParsedPreview, RawFile};

/// Everything the forecast form needs after a file is accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadOutcome {
    pub file_name: String,
    pub file_size_label: String,
    pub preview: ParsedPreview,
    pub profiles: Vec<ColumnProfile>,
    pub detected: DetectedColumns,
}

pub struct UploadUseCase {
    ingestion: FileIngestion,
    detector: ColumnDetector,
}

impl Default for UploadUseCase {
    fn default() -> Self {
        Self::new(FileIngestion::new(), ColumnDetector::new())
    }
}

impl UploadUseCase {
    pub fn new(ingestion: FileIngestion, detector: ColumnDetector) -> Self {
        Self {
            ingestion,
            detector,
        }
    }

    /// Accept a file, preview it and guess the date/target columns.
    ///
    /// Unsupported names are rejected before any byte is read.
    pub async fn process(&self, file: &RawFile) -> Result<UploadOutcome> {
        if !is_supported_filename(file.name()) {
            warn!(file = %file.name(), "Rejected unsupported upload");
            return Err(AppError::UnsupportedFormat(
                UNSUPPORTED_FILE_MESSAGE.to_string(),
            ));
        }

        let size = file.size().await?;
        let preview = self.ingestion.parse_file(file).await?;
        let profiles = analyze_columns(&preview.rows);
        let detected = self.detector.detect(&profiles);

        info!(
            file = %file.name(),
            bytes = size,
            columns = preview.columns.len(),
            rows = preview.rows.len(),
            date_col = ?detected.date.as_ref().map(|g| g.name.as_str()),
            target_col = ?detected.target.as_ref().map(|g| g.name.as_str()),
            "Upload processed"
        );

        Ok(UploadOutcome {
            file_name: file.name().to_string(),
            file_size_label: format_file_size(size),
            preview,
            profiles,
            detected,
        })
    }
}
