mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::run;
pub use application::{ColumnDetector, ForecastUseCase, UploadOutcome, UploadUseCase};
pub use domain::error::{AppError, Result};
pub use domain::forecast::ForecastConfig;
pub use domain::session::Session;
pub use domain::upload::{ColumnProfile, DetectedColumns, ParsedPreview, PreviewRow, RawFile};
