use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{DocumentStorage, DocumentStorageError};
use crate::domain::value_objects::DocId;

/// Stores ingested files on the local filesystem, renaming each copy to its
/// assigned document id while keeping the original extension.
pub struct LocalDocumentStorage {
    storage_dir: PathBuf,
}

impl LocalDocumentStorage {
    pub fn new(storage_dir: PathBuf) -> Self {
        Self { storage_dir }
    }

    fn destination_for(&self, source_path: &Path, doc_id: &DocId) -> PathBuf {
        let file_name = match source_path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => format!("{}.{}", doc_id, ext),
            None => doc_id.to_string(),
        };
        self.storage_dir.join(file_name)
    }
}

#[async_trait]
impl DocumentStorage for LocalDocumentStorage {
    async fn store_document(
        &self,
        source_path: &Path,
        doc_id: &DocId,
    ) -> Result<PathBuf, DocumentStorageError> {
        if !source_path.is_file() {
            return Err(DocumentStorageError::SourceNotFound(
                source_path.display().to_string(),
            ));
        }
        if !self.storage_dir.is_dir() {
            return Err(DocumentStorageError::InvalidStorageDir(
                self.storage_dir.display().to_string(),
            ));
        }

        let destination = self.destination_for(source_path, doc_id);
        tokio::fs::copy(source_path, &destination)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    DocumentStorageError::PermissionDenied(e.to_string())
                }
                _ => DocumentStorageError::StorageFailed(e.to_string()),
            })?;

        debug!(
            source = %source_path.display(),
            destination = %destination.display(),
            "stored document"
        );
        Ok(destination)
    }
}
