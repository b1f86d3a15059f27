// ============================================================
// PREVIEW TYPES
// ============================================================
// Bounded sample of an uploaded table

use std::collections::HashSet;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Maximum number of data rows kept in a preview.
pub const PREVIEW_ROW_LIMIT: usize = 100;

/// Only a bounded prefix is read, so the real row count is unknown.
pub const TOTAL_ROWS_LABEL: &str = "100+";

const EMPTY_HEADER: &str = "__EMPTY";

/// One data row keyed by column name, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewRow {
    cells: Vec<(String, String)>,
}

impl PreviewRow {
    /// Pair values with column names. Missing trailing values become empty
    /// strings, surplus values are dropped.
    pub fn from_values<I>(columns: &[String], values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut values = values.into_iter();
        let cells = columns
            .iter()
            .map(|column| (column.clone(), values.next().unwrap_or_default()))
            .collect();

        Self { cells }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for PreviewRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Header plus at most [`PREVIEW_ROW_LIMIT`] rows of an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedPreview {
    pub columns: Vec<String>,
    pub rows: Vec<PreviewRow>,
    pub total_rows_label: String,
}

impl ParsedPreview {
    pub fn new(columns: Vec<String>, rows: Vec<PreviewRow>) -> Self {
        Self {
            columns,
            rows,
            total_rows_label: TOTAL_ROWS_LABEL.to_string(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Make header names usable as row keys: blank names become `__EMPTY`
    /// and repeats get `_1`, `_2`, ... appended in first-seen order.
    pub fn unique_columns<I>(raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for name in raw {
            let base = if name.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                name
            };

            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}_{}", base, suffix);
                suffix += 1;
            }

            seen.insert(candidate.clone());
            columns.push(candidate);
        }

        columns
    }
}
