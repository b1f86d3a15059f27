use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use super::{FilePayload, ForecastService};
use crate::domain::error::{AppError, Result};
use crate::domain::forecast::{ForecastConfig, ForecastResponse, RegionOption};
use crate::infrastructure::config::ForecastApiConfig;
use crate::infrastructure::response::{format_api_error, GENERIC_FORECAST_ERROR};

pub struct HttpForecastClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpForecastClient {
    pub fn new(config: &ForecastApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::ConfigError(format!("Invalid forecast API URL {}: {}", config.base_url, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::HttpError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::ConfigError(format!("Forecast API URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_options(&self, url: Url, key: &str) -> Result<Vec<RegionOption>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::HttpError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::HttpError(format!(
                "API error ({})",
                response.status()
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse JSON: {}", e)))?;

        serde_json::from_value(json[key].clone()).map_err(|e| {
            AppError::HttpError(format!("Invalid response format: missing {} array: {}", key, e))
        })
    }

    fn build_form(file: FilePayload, config: &ForecastConfig) -> Result<Form> {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type {
            part = part.mime_str(&content_type).map_err(|e| {
                AppError::ValidationError(format!("Invalid content type {}: {}", content_type, e))
            })?;
        }

        let form = config
            .form_fields()
            .into_iter()
            .fold(Form::new().part("file", part), |form, (key, value)| {
                form.text(key, value)
            });

        Ok(form)
    }
}

#[async_trait]
impl ForecastService for HttpForecastClient {
    async fn countries(&self) -> Vec<RegionOption> {
        let result = match self.endpoint(&["countries"]) {
            Ok(url) => self.fetch_options(url, "countries").await,
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            warn!(error = %e, "Error fetching countries");
            Vec::new()
        })
    }

    async fn subdivisions(&self, country: &str) -> Vec<RegionOption> {
        if country.is_empty() {
            return Vec::new();
        }

        let result = match self.endpoint(&["subdivisions", country]) {
            Ok(url) => self.fetch_options(url, "subdivisions").await,
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            warn!(error = %e, country, "Error fetching subdivisions");
            Vec::new()
        })
    }

    async fn generate(
        &self,
        token: &str,
        file: FilePayload,
        config: &ForecastConfig,
    ) -> Result<ForecastResponse> {
        let url = self.endpoint(&["forecast"])?;
        let file_name = file.file_name.clone();
        let form = Self::build_form(file, config)?;

        info!(
            file = %file_name,
            date_col = %config.date_col,
            target_col = %config.target_col,
            freq = %config.freq,
            horizon = config.horizon,
            "Submitting forecast request"
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Forecast request failed");
                AppError::HttpError(GENERIC_FORECAST_ERROR.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(%status, body = %text, "Forecast service returned an error");
            return Err(AppError::HttpError(format_api_error(
                &text,
                GENERIC_FORECAST_ERROR,
            )));
        }

        response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse forecast response: {}", e)))
    }
}
