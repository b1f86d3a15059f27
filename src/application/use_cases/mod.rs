pub mod column_detection;
pub mod file_ingestion;
pub mod forecast;
pub mod upload;
