use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "forecast-prep.toml";
pub const ENV_PREFIX: &str = "FORECAST_PREP_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastApiConfig {
    /// Base URL of the forecasting service, including the `/api` prefix
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ForecastApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ForecastApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub forecast_api: ForecastApiConfig,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            forecast_api: ForecastApiConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `forecast-prep.toml`, then `FORECAST_PREP_*` variables
    /// (`__` separates nested keys). A `.env` file is loaded first if present.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config: AppConfig = Self::figment(path)
            .extract()
            .map_err(|e| AppError::ConfigError(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.forecast_api.base_url).map_err(|e| {
            AppError::ConfigError(format!(
                "forecast_api.base_url is not a valid URL ({}): {}",
                self.forecast_api.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::ConfigError(format!(
                "forecast_api.base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if self.forecast_api.timeout_secs == 0 {
            return Err(AppError::ConfigError(
                "forecast_api.timeout_secs must be > 0".to_string(),
            ));
        }
        if self.server.host.trim().is_empty() {
            return Err(AppError::ConfigError("server.host must not be empty".to_string()));
        }
        Ok(())
    }
}
