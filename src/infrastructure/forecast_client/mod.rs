pub mod http;

use async_trait::async_trait;

use crate::domain::error::Result;
use crate::domain::forecast::{ForecastConfig, ForecastResponse, RegionOption};

pub use http::HttpForecastClient;

/// File part of a forecast request.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// External forecasting service.
#[async_trait]
pub trait ForecastService: Send + Sync {
    /// Country options; empty when the lookup fails.
    async fn countries(&self) -> Vec<RegionOption>;

    /// States/provinces of a country; empty when the lookup fails.
    async fn subdivisions(&self, country: &str) -> Vec<RegionOption>;

    async fn generate(
        &self,
        token: &str,
        file: FilePayload,
        config: &ForecastConfig,
    ) -> Result<ForecastResponse>;
}
