// ============================================================
// COLUMN ROLE DETECTION
// ============================================================
// Infer per-column types from preview rows and guess which columns
// hold the time axis and the forecast target

mod classifiers;
mod scorer;

pub use classifiers::{looks_date, looks_numeric};
pub use scorer::{
    best_guess, ColumnScorer, DateColumnScorer, TargetColumnScorer, DATE_COLUMN_KEYWORDS,
    NAME_WEIGHT, NUMERIC_TARGET_KEYWORDS, TYPE_WEIGHT,
};

use std::collections::HashMap;

use tracing::debug;

use crate::domain::upload::{ColumnGuess, ColumnProfile, ColumnStats, DetectedColumns, PreviewRow};

/// Profile every column of `rows`, in the column order of the first row.
///
/// A value missing from a later row counts as matching neither type.
/// Returns an empty list when there are no rows.
pub fn analyze_columns(rows: &[PreviewRow]) -> Vec<ColumnProfile> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let mut stats: Vec<ColumnStats> = first.columns().map(ColumnStats::new).collect();
    let index: HashMap<&str, usize> = first
        .columns()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();

    for row in rows {
        for (name, value) in row.iter() {
            let Some(&idx) = index.get(name) else {
                continue;
            };
            let column = &mut stats[idx];
            if looks_numeric(value) {
                column.numeric_count += 1;
            }
            if looks_date(value) {
                column.date_count += 1;
            }
        }
    }

    stats.iter().map(|s| s.profile(rows.len())).collect()
}

pub fn detect_date_column(profiles: &[ColumnProfile]) -> Option<ColumnGuess> {
    best_guess(profiles, &DateColumnScorer::default())
}

/// Date-typed columns are never returned.
pub fn detect_target_column(profiles: &[ColumnProfile]) -> Option<ColumnGuess> {
    best_guess(profiles, &TargetColumnScorer::default())
}

/// Runs a date scorer and a target scorer over the same profiles.
pub struct ColumnDetector {
    date: Box<dyn ColumnScorer>,
    target: Box<dyn ColumnScorer>,
}

impl Default for ColumnDetector {
    fn default() -> Self {
        Self {
            date: Box::new(DateColumnScorer::default()),
            target: Box::new(TargetColumnScorer::default()),
        }
    }
}

impl ColumnDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_scorer(mut self, scorer: impl ColumnScorer + 'static) -> Self {
        self.date = Box::new(scorer);
        self
    }

    pub fn with_target_scorer(mut self, scorer: impl ColumnScorer + 'static) -> Self {
        self.target = Box::new(scorer);
        self
    }

    pub fn detect(&self, profiles: &[ColumnProfile]) -> DetectedColumns {
        let date = best_guess(profiles, self.date.as_ref());
        let target = best_guess(profiles, self.target.as_ref());

        debug!(
            date = ?date.as_ref().map(|g| g.name.as_str()),
            target = ?target.as_ref().map(|g| g.name.as_str()),
            "Detected column roles"
        );

        DetectedColumns { date, target }
    }
}

/// Convenience wrapper using the default keyword lists.
pub fn detect_columns(profiles: &[ColumnProfile]) -> DetectedColumns {
    ColumnDetector::default().detect(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(columns: &[&str], data: &[&[&str]]) -> Vec<PreviewRow> {
        let columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        data.iter()
            .map(|values| PreviewRow::from_values(&columns, values.iter().map(|v| v.to_string())))
            .collect()
    }

    fn name(guess: Option<ColumnGuess>) -> Option<String> {
        guess.map(|g| g.name)
    }

    fn profile<'a>(profiles: &'a [ColumnProfile], name: &str) -> &'a ColumnProfile {
        profiles.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn test_analyze_empty_rows() {
        assert!(analyze_columns(&[]).is_empty());
    }

    #[test]
    fn test_analyze_typical_sales_table() {
        let rows = rows(
            &["order_date", "region", "revenue"],
            &[
                &["2024-01-01", "north", "10.5"],
                &["2024-01-02", "south", "12"],
                &["2024-01-03", "north", "9.25"],
            ],
        );
        let profiles = analyze_columns(&rows);

        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["order_date", "region", "revenue"]);

        assert!(profile(&profiles, "order_date").is_date);
        assert!(!profile(&profiles, "order_date").is_numeric);
        assert!(!profile(&profiles, "region").is_date);
        assert!(!profile(&profiles, "region").is_numeric);
        assert!(profile(&profiles, "revenue").is_numeric);
        assert!(!profile(&profiles, "revenue").is_date);
    }

    #[test]
    fn test_threshold_needs_more_than_eighty_percent() {
        // 4 of 5 numeric is exactly 0.8
        let four_of_five = rows(&["v"], &[&["1.5"], &["2.5"], &["3.5"], &["4.5"], &["x"]]);
        assert!(!analyze_columns(&four_of_five)[0].is_numeric);

        let nine_of_ten = rows(
            &["v"],
            &[
                &["1.5"], &["2.5"], &["3.5"], &["4.5"], &["5.5"],
                &["6.5"], &["7.5"], &["8.5"], &["9.5"], &["x"],
            ],
        );
        assert!(analyze_columns(&nine_of_ten)[0].is_numeric);
    }

    #[test]
    fn test_small_integers_are_both_numeric_and_date() {
        let rows = rows(&["units"], &[&["1"], &["2"], &["3"]]);
        let profiles = analyze_columns(&rows);
        assert!(profiles[0].is_numeric);
        assert!(profiles[0].is_date);
    }

    #[test]
    fn test_large_integer_column_is_not_a_target() {
        let rows = rows(
            &["ds", "visits"],
            &[&["2024-01-01", "12000"], &["2024-01-02", "150000"], &["2024-01-03", "98000"]],
        );
        let profiles = analyze_columns(&rows);
        assert!(profile(&profiles, "visits").is_numeric);
        assert!(profile(&profiles, "visits").is_date);

        // both columns read as dates, so no target candidate remains
        assert_eq!(detect_target_column(&profiles), None);
    }

    #[test]
    fn test_columns_follow_first_row() {
        let first = rows(&["a", "b"], &[&["1", "2"]]);
        let second = rows(&["a", "c"], &[&["3", "4"]]);
        let all: Vec<PreviewRow> = first.into_iter().chain(second).collect();

        let profiles = analyze_columns(&all);
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[1].name, "b");
        // "b" is absent from the second row
        assert_eq!(profiles[1].numeric_count, 1);
        assert!(!profiles[1].is_numeric);
    }

    #[test]
    fn test_later_rows_matched_by_name_not_position() {
        let first = rows(&["a", "b"], &[&["1", "2"]]);
        let reordered = rows(&["b", "a"], &[&["x", "3"], &["y", "4"]]);
        let all: Vec<PreviewRow> = first.into_iter().chain(reordered).collect();

        let profiles = analyze_columns(&all);
        assert_eq!(profile(&profiles, "a").numeric_count, 3);
        assert!(profile(&profiles, "a").is_numeric);
        assert_eq!(profile(&profiles, "b").numeric_count, 1);
    }

    #[test]
    fn test_wide_table_profiles_every_column() {
        let columns: Vec<String> = (0..300).map(|i| format!("col_{i}")).collect();
        let all: Vec<PreviewRow> = (0..100)
            .map(|r| {
                PreviewRow::from_values(&columns, (0..300).map(|c| format!("{}.5", r * c)))
            })
            .collect();

        let profiles = analyze_columns(&all);
        assert_eq!(profiles.len(), 300);
        assert!(profiles.iter().all(|p| p.numeric_count == 100 && p.is_numeric));
        assert_eq!(profiles[299].name, "col_299");
    }

    #[test]
    fn test_detect_date_prefers_name_and_type() {
        let profiles = vec![
            ColumnProfile::new("id", true, false),
            ColumnProfile::new("created", false, true),
            ColumnProfile::new("Order Date", false, true),
        ];
        assert_eq!(name(detect_date_column(&profiles)).as_deref(), Some("Order Date"));
    }

    #[test]
    fn test_detect_date_full_confidence() {
        let profiles = vec![
            ColumnProfile::new("Date", false, true),
            ColumnProfile::new("Revenue", true, false),
        ];
        assert_eq!(
            detect_date_column(&profiles),
            Some(ColumnGuess::new("Date", 1.0))
        );
        assert_eq!(
            detect_target_column(&profiles),
            Some(ColumnGuess::new("Revenue", 1.0))
        );
    }

    #[test]
    fn test_zero_score_guess_has_zero_confidence() {
        let profiles = vec![ColumnProfile::new("region", false, false)];
        assert_eq!(
            detect_date_column(&profiles),
            Some(ColumnGuess::new("region", 0.0))
        );
    }

    #[test]
    fn test_detect_date_first_wins_ties() {
        let profiles = vec![
            ColumnProfile::new("start_time", false, true),
            ColumnProfile::new("end_time", false, true),
        ];
        assert_eq!(name(detect_date_column(&profiles)).as_deref(), Some("start_time"));
    }

    #[test]
    fn test_detect_target_first_wins_ties() {
        let profiles = vec![
            ColumnProfile::new("sales", true, false),
            ColumnProfile::new("revenue", true, false),
        ];
        assert_eq!(
            detect_target_column(&profiles),
            Some(ColumnGuess::new("sales", 1.0))
        );
    }

    #[test]
    fn test_zero_score_still_wins() {
        let profiles = vec![
            ColumnProfile::new("region", false, false),
            ColumnProfile::new("store", false, false),
        ];
        assert_eq!(name(detect_date_column(&profiles)).as_deref(), Some("region"));
        assert_eq!(name(detect_target_column(&profiles)).as_deref(), Some("region"));
    }

    #[test]
    fn test_detect_on_empty_profiles() {
        assert_eq!(detect_date_column(&[]), None);
        assert_eq!(detect_target_column(&[]), None);
        assert_eq!(detect_columns(&[]), DetectedColumns::default());
    }

    #[test]
    fn test_target_skips_date_columns() {
        let profiles = vec![
            ColumnProfile::new("sales_date", true, true),
            ColumnProfile::new("store", false, false),
            ColumnProfile::new("Total Sales", true, false),
        ];
        assert_eq!(name(detect_target_column(&profiles)).as_deref(), Some("Total Sales"));

        let only_dates = vec![ColumnProfile::new("ds", true, true)];
        assert_eq!(detect_target_column(&only_dates), None);
    }

    #[test]
    fn test_detected_roles_differ_when_both_found() {
        let rows = rows(
            &["ds", "units"],
            &[&["2024-01-01", "150.5"], &["2024-01-02", "175.25"], &["2024-01-03", "160.75"]],
        );
        let detected = detect_columns(&analyze_columns(&rows));

        let date = detected.date.unwrap();
        let target = detected.target.unwrap();
        assert_eq!(date.name, "ds");
        assert_eq!(date.confidence, 1.0);
        assert_eq!(target.name, "units");
        assert_eq!(target.confidence, 1.0);
    }

    #[test]
    fn test_custom_scorer() {
        let profiles = vec![
            ColumnProfile::new("sales", true, false),
            ColumnProfile::new("demand", true, false),
        ];
        let detected = ColumnDetector::new()
            .with_target_scorer(TargetColumnScorer::with_keywords(&["demand"]))
            .detect(&profiles);
        assert_eq!(detected.target.unwrap().name, "demand");
    }
}
