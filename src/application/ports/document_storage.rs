use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::value_objects::DocId;

#[derive(Debug)]
pub enum DocumentStorageError {
    SourceNotFound(String),
    InvalidStorageDir(String),
    PermissionDenied(String),
    StorageFailed(String),
}

impl DocumentStorageError {
    /// Stable code carried into per-file results to drive retry decisions.
    pub fn code(&self) -> &'static str {
        match self {
            DocumentStorageError::SourceNotFound(_) => "SOURCE_NOT_FOUND",
            DocumentStorageError::InvalidStorageDir(_) => "INVALID_STORAGE_DIR",
            DocumentStorageError::PermissionDenied(_) => "PERMISSION_DENIED",
            DocumentStorageError::StorageFailed(_) => "STORAGE_FAILED",
        }
    }
}

impl std::fmt::Display for DocumentStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStorageError::SourceNotFound(path) => {
                write!(f, "Source file not found: {}", path)
            }
            DocumentStorageError::InvalidStorageDir(path) => {
                write!(f, "Storage directory invalid: {}", path)
            }
            DocumentStorageError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            DocumentStorageError::StorageFailed(msg) => write!(f, "Storage failed: {}", msg),
        }
    }
}

impl std::error::Error for DocumentStorageError {}

/// Managed storage for validated documents.
///
/// Implementations copy the source into the managed area under the document
/// id, preserving the original extension, and only report success once the
/// copy has completed without error.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    async fn store_document(
        &self,
        source_path: &Path,
        doc_id: &DocId,
    ) -> Result<PathBuf, DocumentStorageError>;
}
