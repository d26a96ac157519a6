use crate::core::ReferenceSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads the ASD reference document from disk, for offline runs.
#[derive(Debug, Clone)]
pub struct FileReferenceSource {
    path: PathBuf,
}

impl FileReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceSource for FileReferenceSource {
    async fn fetch_reference_document(&self) -> Result<String> {
        tracing::debug!("Reading ASD reference document from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::WarrantyError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_document() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"MacBookAir: 3S147\n").unwrap();

        let source = FileReferenceSource::new(file.path());
        assert_eq!(
            source.fetch_reference_document().await.unwrap(),
            "MacBookAir: 3S147\n"
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FileReferenceSource::new("/nonexistent/asdcheck");
        let err = source.fetch_reference_document().await.unwrap_err();
        assert!(matches!(err, WarrantyError::IoError(_)));
    }
}
