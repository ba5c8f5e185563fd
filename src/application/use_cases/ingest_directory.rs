use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::application::services::{
    BatchIndexingResult, BatchProcessingResult, BatchValidationResult, DirectoryMonitor,
    DocumentIndexer, DocumentProcessor, DocumentValidator, MonitorError, ProcessingStatus,
};

#[derive(Debug)]
pub enum IngestDirectoryError {
    MonitorError(MonitorError),
}

impl std::fmt::Display for IngestDirectoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestDirectoryError::MonitorError(e) => write!(f, "Monitor error: {}", e),
        }
    }
}

impl std::error::Error for IngestDirectoryError {}

impl From<MonitorError> for IngestDirectoryError {
    fn from(error: MonitorError) -> Self {
        IngestDirectoryError::MonitorError(error)
    }
}

/// Aggregated per-stage outcomes of one ingestion run.
#[derive(Debug, Default)]
pub struct IngestionReport {
    pub discovered_files: Vec<PathBuf>,
    pub validation: BatchValidationResult,
    pub processing: BatchProcessingResult,
    pub indexing: BatchIndexingResult,
}

impl IngestionReport {
    pub fn documents_created(&self) -> usize {
        self.indexing.success_count()
    }

    pub fn files_rejected(&self) -> usize {
        self.validation.invalid_files.len()
            + self.processing.failure_count()
            + self.indexing.failure_count()
    }
}

/// The 4-stage ingestion pipeline: Monitor → Validate → Process → Index.
///
/// Each stage consumes exactly its predecessor's output collection. An empty
/// stage short-circuits the rest of the run but still yields an (empty)
/// report; only a structural monitor failure aborts with an error.
pub struct IngestDirectoryUseCase {
    monitor: DirectoryMonitor,
    validator: DocumentValidator,
    processor: DocumentProcessor,
    indexer: DocumentIndexer,
}

impl IngestDirectoryUseCase {
    pub fn new(
        monitor: DirectoryMonitor,
        validator: DocumentValidator,
        processor: DocumentProcessor,
        indexer: DocumentIndexer,
    ) -> Self {
        Self {
            monitor,
            validator,
            processor,
            indexer,
        }
    }

    pub async fn execute(
        &self,
        ingest_dir: &Path,
    ) -> Result<IngestionReport, IngestDirectoryError> {
        let mut report = IngestionReport::default();

        report.discovered_files = self.monitor.get_ingestible_files(ingest_dir).await?;
        if report.discovered_files.is_empty() {
            info!(directory = %ingest_dir.display(), "no ingestible files found");
            return Ok(report);
        }

        report.validation = self.validator.validate_files(&report.discovered_files).await;
        if !report.validation.has_valid_files() {
            return Ok(report);
        }

        let valid_paths: Vec<PathBuf> = report
            .validation
            .valid_files
            .iter()
            .map(|result| result.filepath.clone())
            .collect();
        report.processing = self.processor.process_documents(&valid_paths).await;

        let stored_paths: Vec<PathBuf> = report
            .processing
            .successful_docs
            .iter()
            .filter(|result| result.status == ProcessingStatus::Success)
            .filter_map(|result| result.storage_path.clone())
            .collect();
        if stored_paths.is_empty() {
            return Ok(report);
        }

        report.indexing = self.indexer.index_batch(&stored_paths).await;

        info!(
            discovered = report.discovered_files.len(),
            valid = report.validation.valid_files.len(),
            stored = report.processing.success_count(),
            indexed = report.documents_created(),
            "ingestion run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        DocumentStorage, ExtractedMetadata, MetadataExtractionError, MetadataExtractor,
    };
    use crate::application::services::{IndexerConfig, ValidatorConfig};
    use crate::domain::repositories::DocumentStore;
    use crate::infrastructure::database::InMemoryDocumentStore;
    use crate::infrastructure::file_system::LocalDocumentStorage;
    use async_trait::async_trait;

    struct NoopExtractor;

    #[async_trait]
    impl MetadataExtractor for NoopExtractor {
        async fn extract_metadata(
            &self,
            _path: &std::path::Path,
        ) -> Result<ExtractedMetadata, MetadataExtractionError> {
            Ok(ExtractedMetadata::default())
        }
    }

    fn pipeline(
        store: Arc<InMemoryDocumentStore>,
        storage_dir: &Path,
    ) -> IngestDirectoryUseCase {
        let store: Arc<dyn DocumentStore> = store;
        let storage: Arc<dyn DocumentStorage> =
            Arc::new(LocalDocumentStorage::new(storage_dir.to_path_buf()));
        IngestDirectoryUseCase::new(
            DirectoryMonitor::default(),
            DocumentValidator::new(store.clone(), ValidatorConfig::default()),
            DocumentProcessor::new(storage),
            DocumentIndexer::new(store, Arc::new(NoopExtractor), IndexerConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_missing_ingest_dir_is_hard_error() {
        let storage_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryDocumentStore::new());
        let use_case = pipeline(store, storage_dir.path());

        let result = use_case.execute(Path::new("/no/such/ingest")).await;
        assert!(matches!(
            result,
            Err(IngestDirectoryError::MonitorError(
                MonitorError::DirectoryNotFound(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_empty_directory_yields_empty_report() {
        let ingest_dir = tempfile::tempdir().unwrap();
        let storage_dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryDocumentStore::new());
        let use_case = pipeline(store.clone(), storage_dir.path());

        let report = use_case.execute(ingest_dir.path()).await.unwrap();
        assert!(report.discovered_files.is_empty());
        assert_eq!(report.documents_created(), 0);
        assert_eq!(store.document_count().await, 0);
    }

    #[tokio::test]
    async fn test_all_invalid_short_circuits_processing() {
        let ingest_dir = tempfile::tempdir().unwrap();
        let storage_dir = tempfile::tempdir().unwrap();
        std::fs::write(ingest_dir.path().join("fake.pdf"), b"not a pdf").unwrap();

        let store = Arc::new(InMemoryDocumentStore::new());
        let use_case = pipeline(store, storage_dir.path());

        let report = use_case.execute(ingest_dir.path()).await.unwrap();
        assert_eq!(report.validation.invalid_files.len(), 1);
        assert_eq!(report.processing.success_count(), 0);
        assert_eq!(std::fs::read_dir(storage_dir.path()).unwrap().count(), 0);
    }
}
