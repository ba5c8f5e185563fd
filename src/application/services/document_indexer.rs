use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::application::ports::{ExtractedMetadata, MetadataExtractor};
use crate::domain::entities::{DocumentMetadata, NewDocument};
use crate::domain::repositories::DocumentStore;
use crate::domain::value_objects::FileHash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexingStatus {
    Success,
    MetadataError,
    ExtractionError,
    DatabaseError,
    UnknownError,
}

#[derive(Debug, Clone)]
pub struct IndexingResult {
    pub doc_id: String,
    pub filepath: PathBuf,
    pub status: IndexingStatus,
    pub error_message: Option<String>,
    pub extracted_metadata: Option<ExtractedMetadata>,
}

impl IndexingResult {
    fn failure(
        doc_id: String,
        filepath: PathBuf,
        status: IndexingStatus,
        message: String,
    ) -> Self {
        Self {
            doc_id,
            filepath,
            status,
            error_message: Some(message),
            extracted_metadata: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchIndexingResult {
    pub successful_docs: Vec<IndexingResult>,
    pub failed_docs: Vec<IndexingResult>,
}

impl BatchIndexingResult {
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

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub supported_mimetypes: Vec<String>,
    pub concurrency: usize,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            supported_mimetypes: vec![
                "application/pdf".to_string(),
                "application/x-pdf".to_string(),
            ],
            concurrency: 4,
        }
    }
}

/// Registers stored files as document records and attaches best-effort
/// bibliographic metadata.
///
/// Indexing success is defined by document creation: the mime re-check, the
/// hash and the insert are hard steps, while metadata extraction and
/// metadata persistence failures only degrade the result.
pub struct DocumentIndexer {
    store: Arc<dyn DocumentStore>,
    extractor: Arc<dyn MetadataExtractor>,
    config: IndexerConfig,
}

impl DocumentIndexer {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        extractor: Arc<dyn MetadataExtractor>,
        config: IndexerConfig,
    ) -> Self {
        Self {
            store,
            extractor,
            config,
        }
    }

    fn doc_id_for(filepath: &Path) -> String {
        // The processor named the stored file `{doc_id}{suffix}`.
        filepath
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("ERROR")
            .to_string()
    }

    pub async fn index_document(&self, filepath: &Path) -> IndexingResult {
        let doc_id = Self::doc_id_for(filepath);
        let path = filepath.to_path_buf();

        // Hard step 1: the stored file must still be a supported type.
        let mime_type = match infer::get_from_path(filepath) {
            Ok(Some(kind)) => kind.mime_type().to_string(),
            Ok(None) => {
                return IndexingResult::failure(
                    doc_id,
                    path,
                    IndexingStatus::MetadataError,
                    "Unable to determine file type".to_string(),
                );
            }
            Err(e) => {
                return IndexingResult::failure(
                    doc_id,
                    path,
                    IndexingStatus::MetadataError,
                    format!("Unable to determine file type: {}", e),
                );
            }
        };
        if !self.config.supported_mimetypes.iter().any(|t| t == &mime_type) {
            return IndexingResult::failure(
                doc_id,
                path,
                IndexingStatus::MetadataError,
                format!("Unsupported file type: {}", mime_type),
            );
        }

        // Hard step 2: content hash.
        let file_hash = match FileHash::from_file(filepath) {
            Ok(hash) => hash,
            Err(e) => {
                return IndexingResult::failure(
                    doc_id,
                    path,
                    IndexingStatus::MetadataError,
                    format!("Failed to compute file hash: {}", e),
                );
            }
        };

        let file_size = match std::fs::metadata(filepath) {
            Ok(meta) => meta.len() as i64,
            Err(e) => {
                return IndexingResult::failure(
                    doc_id,
                    path,
                    IndexingStatus::MetadataError,
                    format!("Failed to read file size: {}", e),
                );
            }
        };

        // Hard step 3: create the document record. Duplicate hashes that
        // slipped past validation surface here via the store's unique
        // constraint.
        let document = match self
            .store
            .create_document(NewDocument {
                id: doc_id.clone(),
                raw_file_path: path.display().to_string(),
                file_hash,
                file_size_bytes: file_size,
                mime_type,
            })
            .await
        {
            Ok(doc) => doc,
            Err(e) => {
                return IndexingResult::failure(
                    doc_id,
                    path,
                    IndexingStatus::DatabaseError,
                    e.to_string(),
                );
            }
        };

        // Best-effort: bibliographic metadata. The document already exists;
        // nothing from here on can fail the file.
        let extracted = match self.extractor.extract_metadata(filepath).await {
            Ok(metadata) => {
                let record = DocumentMetadata {
                    doc_id: document.id.clone(),
                    title: metadata.title.clone(),
                    authors: metadata.authors.clone(),
                    creation_date: metadata.creation_date,
                    page_count: metadata.page_count,
                    language: metadata.language.clone(),
                };
                if let Err(e) = self.store.create_metadata(record).await {
                    warn!(doc_id = %document.id, "failed to store metadata: {e}");
                }
                Some(metadata)
            }
            Err(e) => {
                warn!(
                    doc_id = %document.id,
                    filepath = %path.display(),
                    "metadata extraction failed: {e}"
                );
                None
            }
        };

        info!(doc_id = %document.id, "indexed document");
        IndexingResult {
            doc_id: document.id,
            filepath: path,
            status: IndexingStatus::Success,
            error_message: None,
            extracted_metadata: extracted,
        }
    }

    pub async fn index_batch(&self, filepaths: &[PathBuf]) -> BatchIndexingResult {
        let results: Vec<IndexingResult> = stream::iter(filepaths)
            .map(|path| self.index_document(path))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut batch = BatchIndexingResult::default();
        for result in results {
            if result.status == IndexingStatus::Success {
                batch.successful_docs.push(result);
            } else {
                batch.failed_docs.push(result);
            }
        }
        batch
    }
}
