use crate::domain::upload::{ColumnGuess, ColumnProfile, ColumnRole};

pub const DATE_COLUMN_KEYWORDS: &[&str] = &["date", "day", "time", "period", "dt", "ds"];

pub const NUMERIC_TARGET_KEYWORDS: &[&str] = &[
    "sale", "revenue", "total", "value", "units", "quantity", "amount", "price",
];

/// Contribution of a keyword match in the column name.
pub const NAME_WEIGHT: f64 = 0.5;

/// Contribution of the inferred value type.
pub const TYPE_WEIGHT: f64 = 0.5;

/// Strategy that rates how well a column fits one role.
pub trait ColumnScorer: Send + Sync {
    fn role(&self) -> ColumnRole;

    /// `None` removes the column from candidacy.
    fn score(&self, profile: &ColumnProfile) -> Option<f64>;
}

fn name_matches(name: &str, keywords: &[String]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw.as_str()))
}

fn owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|kw| kw.to_lowercase()).collect()
}

/// Name keywords plus the date type flag.
pub struct DateColumnScorer {
    keywords: Vec<String>,
}

impl Default for DateColumnScorer {
    fn default() -> Self {
        Self::with_keywords(DATE_COLUMN_KEYWORDS)
    }
}

impl DateColumnScorer {
    pub fn with_keywords(keywords: &[&str]) -> Self {
        Self {
            keywords: owned(keywords),
        }
    }
}

impl ColumnScorer for DateColumnScorer {
    fn role(&self) -> ColumnRole {
        ColumnRole::Date
    }

    fn score(&self, profile: &ColumnProfile) -> Option<f64> {
        let mut score = 0.0;
        if name_matches(&profile.name, &self.keywords) {
            score += NAME_WEIGHT;
        }
        if profile.is_date {
            score += TYPE_WEIGHT;
        }
        Some(score)
    }
}

/// Name keywords plus the numeric type flag; date columns never qualify.
pub struct TargetColumnScorer {
    keywords: Vec<String>,
}

impl Default for TargetColumnScorer {
    fn default() -> Self {
        Self::with_keywords(NUMERIC_TARGET_KEYWORDS)
    }
}

impl TargetColumnScorer {
    pub fn with_keywords(keywords: &[&str]) -> Self {
        Self {
            keywords: owned(keywords),
        }
    }
}

impl ColumnScorer for TargetColumnScorer {
    fn role(&self) -> ColumnRole {
        ColumnRole::Target
    }

    fn score(&self, profile: &ColumnProfile) -> Option<f64> {
        if profile.is_date {
            return None;
        }

        let mut score = 0.0;
        if name_matches(&profile.name, &self.keywords) {
            score += NAME_WEIGHT;
        }
        if profile.is_numeric {
            score += TYPE_WEIGHT;
        }
        Some(score)
    }
}

/// Highest-scoring candidate in column order.
///
/// Starts from a sentinel of -1 and only replaces the leader on a strictly
/// greater score, so the first column wins ties and a zero score still
/// wins when nothing else matches.
pub fn best_guess(profiles: &[ColumnProfile], scorer: &dyn ColumnScorer) -> Option<ColumnGuess> {
    let mut best: Option<&ColumnProfile> = None;
    let mut max_score = -1.0;

    for profile in profiles {
        let Some(score) = scorer.score(profile) else {
            continue;
        };

        if score > max_score {
            max_score = score;
            best = Some(profile);
        }
    }

    best.map(|profile| ColumnGuess::new(profile.name.clone(), max_score))
}
