// ============================================================
// TABULAR INFRASTRUCTURE LAYER
// ============================================================
// Bounded CSV and workbook readers producing previews

mod csv_reader;
mod workbook_reader;

#[cfg(test)]
pub(crate) mod test_support;

pub use csv_reader::CsvPreviewReader;
pub use workbook_reader::{cell_to_text, WorkbookPreviewReader};
