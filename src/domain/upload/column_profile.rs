use serde::{Deserialize, Serialize};

/// A column gets a type flag only when strictly more than this share of
/// sampled values match.
pub const ROLE_THRESHOLD: f64 = 0.8;

/// Semantic function of a column for forecasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    /// Time axis
    Date,
    /// Value to forecast
    Target,
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnRole::Date => write!(f, "date"),
            ColumnRole::Target => write!(f, "target"),
        }
    }
}

/// Raw match counts for one column over the sampled rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub numeric_count: usize,
    pub date_count: usize,
}

impl ColumnStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            numeric_count: 0,
            date_count: 0,
        }
    }

    /// Derive type flags against `row_count` sampled rows.
    pub fn profile(&self, row_count: usize) -> ColumnProfile {
        let share = |count: usize| {
            if row_count == 0 {
                0.0
            } else {
                count as f64 / row_count as f64
            }
        };

        ColumnProfile {
            name: self.name.clone(),
            is_numeric: share(self.numeric_count) > ROLE_THRESHOLD,
            is_date: share(self.date_count) > ROLE_THRESHOLD,
            numeric_count: self.numeric_count,
            date_count: self.date_count,
            row_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub is_numeric: bool,
    pub is_date: bool,

    #[serde(default)]
    pub numeric_count: usize,
    #[serde(default)]
    pub date_count: usize,
    #[serde(default)]
    pub row_count: usize,
}

impl ColumnProfile {
    /// Profile with flags only, for callers that already know the types.
    pub fn new(name: impl Into<String>, is_numeric: bool, is_date: bool) -> Self {
        Self {
            name: name.into(),
            is_numeric,
            is_date,
            numeric_count: 0,
            date_count: 0,
            row_count: 0,
        }
    }
}

/// Best candidate for a role. Confidence is a heuristic in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGuess {
    pub name: String,
    pub confidence: f64,
}

impl ColumnGuess {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Guesses used to pre-fill the forecast form; `None` leaves the field
/// for manual entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedColumns {
    pub date: Option<ColumnGuess>,
    pub target: Option<ColumnGuess>,
}
