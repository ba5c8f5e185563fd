use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug)]
pub enum MetadataExtractionError {
    CorruptedFile(String),
    ExtractionFailed(String),
    IoError(String),
}

impl std::fmt::Display for MetadataExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            MetadataExtractionError::ExtractionFailed(msg) => {
                write!(f, "Extraction failed: {}", msg)
            }
            MetadataExtractionError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for MetadataExtractionError {}

/// Bibliographic metadata pulled out of a document, all fields optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedMetadata {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub creation_date: Option<DateTime<Utc>>,
    pub page_count: Option<i32>,
    pub language: Option<String>,
    /// Leading document text, truncated to the extractor's character budget.
    pub text_preview: Option<String>,
}

/// Best-effort metadata extraction. Callers treat every error as
/// recoverable; a failed extraction degrades the result, it never fails the
/// document.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract_metadata(
        &self,
        path: &Path,
    ) -> Result<ExtractedMetadata, MetadataExtractionError>;
}
