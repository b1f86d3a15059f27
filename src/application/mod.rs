pub mod use_cases;

pub use use_cases::column_detection::ColumnDetector;
pub use use_cases::file_ingestion::FileIngestion;
pub use use_cases::forecast::ForecastUseCase;
pub use use_cases::upload::{UploadOutcome, UploadUseCase};
