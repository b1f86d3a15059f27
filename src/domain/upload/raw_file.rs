use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;

/// Tabular formats the ingestion path understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
    Xls,
}

impl FileFormat {
    /// Match a lower-cased extension (no leading dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            "xls" => Some(FileFormat::Xls),
            _ => None,
        }
    }

    pub fn is_workbook(&self) -> bool {
        matches!(self, FileFormat::Xlsx | FileFormat::Xls)
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Csv => write!(f, "csv"),
            FileFormat::Xlsx => write!(f, "xlsx"),
            FileFormat::Xls => write!(f, "xls"),
        }
    }
}

/// Where the bytes of an upload live.
#[derive(Debug, Clone)]
pub enum RawSource {
    /// Bytes already received, e.g. a request body.
    Memory(Vec<u8>),
    /// A file on local disk, opened only while it is being parsed.
    Disk(PathBuf),
}

/// An uploaded file as handed over by the caller.
#[derive(Debug, Clone)]
pub struct RawFile {
    name: String,
    content_type: Option<String>,
    source: RawSource,
}

impl RawFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            source: RawSource::Memory(bytes),
        }
    }

    /// Name is taken from the last path component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            name,
            content_type: None,
            source: RawSource::Disk(path.to_path_buf()),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn source(&self) -> &RawSource {
        &self.source
    }

    /// Text after the final `.`, lower-cased. A name without a dot yields
    /// the whole name, which never matches a supported format.
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn format(&self) -> Option<FileFormat> {
        FileFormat::from_extension(&self.extension())
    }

    pub async fn size(&self) -> Result<u64> {
        match &self.source {
            RawSource::Memory(bytes) => Ok(bytes.len() as u64),
            RawSource::Disk(path) => Ok(tokio::fs::metadata(path).await?.len()),
        }
    }

    /// Load the whole file. Used for workbooks and outbound uploads.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            RawSource::Memory(bytes) => Ok(bytes.clone()),
            RawSource::Disk(path) => Ok(tokio::fs::read(path).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_suffix() {
        assert_eq!(RawFile::from_bytes("Sales.CSV", vec![]).extension(), "csv");
        assert_eq!(RawFile::from_bytes("a.b.xlsx", vec![]).extension(), "xlsx");
        assert_eq!(RawFile::from_bytes("noext", vec![]).extension(), "noext");
        assert_eq!(RawFile::from_bytes("trailing.", vec![]).extension(), "");
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            RawFile::from_bytes("x.XLS", vec![]).format(),
            Some(FileFormat::Xls)
        );
        assert_eq!(RawFile::from_bytes("x.txt", vec![]).format(), None);
        assert!(FileFormat::Xlsx.is_workbook());
        assert!(!FileFormat::Csv.is_workbook());
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let file = RawFile::from_path("/tmp/uploads/history.csv").with_content_type("text/csv");
        assert_eq!(file.name(), "history.csv");
        assert_eq!(file.content_type(), Some("text/csv"));
    }

    #[tokio::test]
    async fn test_memory_size_and_bytes() {
        let file = RawFile::from_bytes("a.csv", b"a,b\n1,2\n".to_vec());
        assert_eq!(file.size().await.unwrap(), 8);
        assert_eq!(file.read_bytes().await.unwrap(), b"a,b\n1,2\n".to_vec());
    }

    #[tokio::test]
    async fn test_missing_disk_file_is_io_error() {
        let file = RawFile::from_path("/definitely/not/here.csv");
        let err = file.size().await.unwrap_err();
        assert!(matches!(err, crate::domain::error::AppError::IoError(_)));
    }
}
