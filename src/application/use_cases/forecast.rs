use std::sync::Arc;

use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::application::use_cases::file_ingestion::{
    is_supported_filename, UNSUPPORTED_FILE_MESSAGE,
};
use crate::domain::error::{AppError, Result};
use crate::domain::forecast::{ForecastConfig, ForecastResponse, RegionOption};
use crate::domain::session::Session;
use crate::domain::upload::RawFile;
use crate::infrastructure::forecast_client::{FilePayload, ForecastService};

/// Upload limit enforced by the forecasting service.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const MISSING_TOKEN_MESSAGE: &str = "Authentication token not found.";

pub struct ForecastUseCase {
    service: Arc<dyn ForecastService + Send + Sync>,
}

impl ForecastUseCase {
    pub fn new(service: Arc<dyn ForecastService + Send + Sync>) -> Self {
        Self { service }
    }

    pub async fn countries(&self) -> Vec<RegionOption> {
        self.service.countries().await
    }

    pub async fn subdivisions(&self, country: &str) -> Vec<RegionOption> {
        self.service.subdivisions(country).await
    }

    /// Check everything the service would reject, then send the file.
    pub async fn submit(
        &self,
        session: &Session,
        file: &RawFile,
        config: &ForecastConfig,
    ) -> Result<ForecastResponse> {
        let token = session
            .token()
            .ok_or_else(|| AppError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()))?;

        if !is_supported_filename(file.name()) {
            return Err(AppError::UnsupportedFormat(
                UNSUPPORTED_FILE_MESSAGE.to_string(),
            ));
        }

        let size = file.size().await?;
        if size > MAX_UPLOAD_BYTES {
            return Err(AppError::ValidationError(format!(
                "File too large ({} bytes). Maximum size is 10MB.",
                size
            )));
        }

        config.validate().map_err(validation_error)?;

        let payload = FilePayload {
            file_name: file.name().to_string(),
            content_type: file.content_type().map(str::to_string),
            bytes: file.read_bytes().await?,
        };

        info!(file = %payload.file_name, bytes = size, "Forecast submission accepted");
        self.service.generate(token, payload, config).await
    }
}

/// Join field messages, sorted by field name so the text is stable.
fn validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field))
            })
        })
        .collect();

    AppError::ValidationError(messages.join("; "))
}
