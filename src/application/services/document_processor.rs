use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::ports::DocumentStorage;
use crate::domain::value_objects::DocId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Success,
    StorageError,
    CopyError,
    RenameError,
    UnknownError,
}

/// Result of moving one validated file into managed storage.
/// `storage_path` is set exactly when `status` is `Success`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub doc_id: String,
    pub original_path: PathBuf,
    pub storage_path: Option<PathBuf>,
    pub status: ProcessingStatus,
    pub error_message: Option<String>,
    pub error_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchProcessingResult {
    pub successful_docs: Vec<ProcessingResult>,
    pub failed_docs: Vec<ProcessingResult>,
}

impl BatchProcessingResult {
    pub fn has_failures(&self) -> bool {
        !self.failed_docs.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.successful_docs.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_docs.len()
    }
}

/// Copies validated files into managed storage under freshly generated
/// document ids, preserving the original extension.
pub struct DocumentProcessor {
    storage: Arc<dyn DocumentStorage>,
    concurrency: usize,
}

impl DocumentProcessor {
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            storage,
            concurrency: 4,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn process_document(&self, file_path: &PathBuf) -> ProcessingResult {
        let doc_id = DocId::generate();

        match self.storage.store_document(file_path, &doc_id).await {
            Ok(storage_path) => {
                info!(
                    doc_id = %doc_id,
                    source = %file_path.display(),
                    stored = %storage_path.display(),
                    "stored document"
                );
                ProcessingResult {
                    doc_id: doc_id.to_string(),
                    original_path: file_path.clone(),
                    storage_path: Some(storage_path),
                    status: ProcessingStatus::Success,
                    error_message: None,
                    error_code: None,
                }
            }
            Err(e) => {
                warn!(
                    doc_id = %doc_id,
                    source = %file_path.display(),
                    code = e.code(),
                    "failed to store document: {e}"
                );
                ProcessingResult {
                    doc_id: doc_id.to_string(),
                    original_path: file_path.clone(),
                    storage_path: None,
                    status: ProcessingStatus::StorageError,
                    error_message: Some(e.to_string()),
                    error_code: Some(e.code().to_string()),
                }
            }
        }
    }

    pub async fn process_documents(&self, file_paths: &[PathBuf]) -> BatchProcessingResult {
        let results: Vec<ProcessingResult> = stream::iter(file_paths)
            .map(|path| self.process_document(path))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut batch = BatchProcessingResult::default();
        for result in results {
            if result.status == ProcessingStatus::Success {
                batch.successful_docs.push(result);
            } else {
                batch.failed_docs.push(result);
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::file_system::LocalDocumentStorage;

    fn processor(storage_dir: &std::path::Path) -> DocumentProcessor {
        DocumentProcessor::new(Arc::new(LocalDocumentStorage::new(
            storage_dir.to_path_buf(),
        )))
    }

    #[tokio::test]
    async fn test_successful_processing_preserves_extension() {
        let source_dir = tempfile::tempdir().unwrap();
        let storage_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("paper.pdf");
        std::fs::write(&source, b"%PDF-1.4 content").unwrap();

        let result = processor(storage_dir.path()).process_document(&source).await;

        assert_eq!(result.status, ProcessingStatus::Success);
        let stored = result.storage_path.unwrap();
        assert_eq!(stored.extension().unwrap(), "pdf");
        assert!(stored
            .file_stem()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("DOC_"));
        assert_eq!(std::fs::read(&stored).unwrap(), b"%PDF-1.4 content");
    }

    #[tokio::test]
    async fn test_missing_source_reports_source_not_found() {
        let storage_dir = tempfile::tempdir().unwrap();
        let missing = PathBuf::from("/no/such/file.pdf");

        let result = processor(storage_dir.path()).process_document(&missing).await;

        assert_eq!(result.status, ProcessingStatus::StorageError);
        assert_eq!(result.error_code.as_deref(), Some("SOURCE_NOT_FOUND"));
        assert!(result.storage_path.is_none());
        // Nothing may be left behind in storage.
        assert_eq!(std::fs::read_dir(storage_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_storage_dir_reports_code() {
        let source_dir = tempfile::tempdir().unwrap();
        let source = source_dir.path().join("paper.pdf");
        std::fs::write(&source, b"%PDF-1.4").unwrap();

        let result = processor(std::path::Path::new("/no/such/storage"))
            .process_document(&source)
            .await;

        assert_eq!(result.status, ProcessingStatus::StorageError);
        assert_eq!(result.error_code.as_deref(), Some("INVALID_STORAGE_DIR"));
    }

    #[tokio::test]
    async fn test_batch_partitions_results() {
        let source_dir = tempfile::tempdir().unwrap();
        let storage_dir = tempfile::tempdir().unwrap();
        let good = source_dir.path().join("good.pdf");
        std::fs::write(&good, b"%PDF-1.4 good").unwrap();
        let missing = source_dir.path().join("missing.pdf");

        let batch = processor(storage_dir.path())
            .process_documents(&[good, missing])
            .await;

        assert_eq!(batch.success_count(), 1);
        assert_eq!(batch.failure_count(), 1);
        assert!(batch.has_failures());
    }

    #[tokio::test]
    async fn test_each_document_gets_unique_id() {
        let source_dir = tempfile::tempdir().unwrap();
        let storage_dir = tempfile::tempdir().unwrap();
        let a = source_dir.path().join("a.pdf");
        let b = source_dir.path().join("b.pdf");
        std::fs::write(&a, b"%PDF-1.4 a").unwrap();
        std::fs::write(&b, b"%PDF-1.4 b").unwrap();

        let batch = processor(storage_dir.path()).process_documents(&[a, b]).await;
        assert_eq!(batch.success_count(), 2);
        assert_ne!(
            batch.successful_docs[0].doc_id,
            batch.successful_docs[1].doc_id
        );
    }
}
