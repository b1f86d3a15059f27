// ============================================================
// UPLOAD DOMAIN LAYER
// ============================================================
// Value types for one uploaded file: the raw source, its bounded
// preview and the per-column role annotations.
// No I/O beyond reading the raw file, no global state.

mod column_profile;
mod preview;
mod raw_file;

pub use column_profile::{
    ColumnGuess, ColumnProfile, ColumnRole, ColumnStats, DetectedColumns, ROLE_THRESHOLD,
};
pub use preview::{ParsedPreview, PreviewRow, PREVIEW_ROW_LIMIT, TOTAL_ROWS_LABEL};
pub use raw_file::{FileFormat, RawFile, RawSource};
