use serde::{Deserialize, Serialize};
use validator::Validate;

use super::upload::DetectedColumns;

pub const MAX_HORIZON: u32 = 365;
pub const DEFAULT_HORIZON: u32 = 30;

/// Sampling frequency understood by the forecasting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Frequency {
    #[default]
    #[serde(rename = "D")]
    Daily,
    #[serde(rename = "W")]
    Weekly,
    #[serde(rename = "M")]
    Monthly,
}

impl Frequency {
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Daily => "D",
            Frequency::Weekly => "W",
            Frequency::Monthly => "M",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Form fields sent alongside the uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ForecastConfig {
    #[validate(length(min = 1, message = "Industry is required"))]
    pub industry: String,

    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default)]
    pub freq: Frequency,

    #[validate(range(min = 1, max = 365, message = "Horizon must be between 1 and 365"))]
    pub horizon: u32,

    #[validate(length(min = 1, message = "Date column is required"))]
    pub date_col: String,

    #[validate(length(min = 1, message = "Target column is required"))]
    pub target_col: String,

    #[serde(default = "default_true")]
    pub apply_holidays: bool,

    #[serde(default = "default_true")]
    pub apply_ai_adjustment: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            industry: String::new(),
            country: String::new(),
            state: None,
            city: None,
            freq: Frequency::default(),
            horizon: DEFAULT_HORIZON,
            date_col: String::new(),
            target_col: String::new(),
            apply_holidays: true,
            apply_ai_adjustment: true,
        }
    }
}

impl ForecastConfig {
    /// Start a form from detected columns; absent guesses stay empty for
    /// the user to fill in.
    pub fn prefilled(detected: &DetectedColumns) -> Self {
        Self {
            date_col: detected
                .date
                .as_ref()
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            target_col: detected
                .target
                .as_ref()
                .map(|g| g.name.clone())
                .unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Text fields in the order the service expects them. Optional
    /// location fields are only present when non-empty.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("industry", self.industry.clone()),
            ("country", self.country.clone()),
            ("freq", self.freq.code().to_string()),
            ("horizon", self.horizon.to_string()),
            ("date_col", self.date_col.clone()),
            ("target_col", self.target_col.clone()),
        ];

        if let Some(state) = self.state.as_ref().filter(|s| !s.is_empty()) {
            fields.push(("state", state.clone()));
        }
        if let Some(city) = self.city.as_ref().filter(|s| !s.is_empty()) {
            fields.push(("city", city.clone()));
        }

        fields.push(("apply_holidays", self.apply_holidays.to_string()));
        fields.push(("apply_ai_adjustment", self.apply_ai_adjustment.to_string()));
        fields
    }
}

/// Option entry for country / subdivision pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub ds: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yhat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yhat_lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yhat_upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yhat_final: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastMeta {
    pub freq: String,
    pub train_start: String,
    pub train_end: String,
    pub horizon: u32,
    #[serde(default)]
    pub holidays_used: Vec<String>,
    pub original_rows: u64,
    pub processed_rows: u64,
    pub null_dates: u64,
    pub null_targets: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiAdjustment {
    #[serde(default)]
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustment_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

/// Result returned by the forecasting service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub meta: ForecastMeta,
    #[serde(default)]
    pub ai_adjustment: Option<AiAdjustment>,
    #[serde(default)]
    pub history: Vec<DataPoint>,
    #[serde(default)]
    pub forecast_base: Vec<DataPoint>,
    #[serde(default)]
    pub forecast_final: Vec<DataPoint>,
}
