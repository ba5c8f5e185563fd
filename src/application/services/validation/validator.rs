use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::domain::repositories::DocumentStore;

use super::checks::{
    check_file_exists, check_file_hash, check_file_size, check_hash_unique, check_mime_type,
};
use super::{BatchValidationResult, ValidationResult};

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub max_file_size_bytes: u64,
    pub supported_mimetypes: Vec<String>,
    /// Upper bound on files validated concurrently within one batch.
    pub concurrency: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            supported_mimetypes: vec![
                "application/pdf".to_string(),
                "application/x-pdf".to_string(),
            ],
            concurrency: 4,
        }
    }
}

/// Validates candidate files before ingestion.
///
/// Checks run per file in a fixed order, cheapest and most decisive first:
/// existence, hash, mime type, size, hash uniqueness. The first failure
/// stops the file (fail-fast), so an invalid result carries exactly one
/// check failure. Files are independent of each other and validated with
/// bounded concurrency.
pub struct DocumentValidator {
    store: Arc<dyn DocumentStore>,
    config: ValidatorConfig,
}

impl DocumentValidator {
    pub fn new(store: Arc<dyn DocumentStore>, config: ValidatorConfig) -> Self {
        Self { store, config }
    }

    pub async fn validate_file(&self, filepath: &Path) -> ValidationResult {
        let path = filepath.to_path_buf();

        if let Err(failure) = check_file_exists(filepath) {
            return ValidationResult::invalid(path, failure);
        }

        let file_hash = match check_file_hash(filepath) {
            Ok(hash) => hash,
            Err(failure) => return ValidationResult::invalid(path, failure),
        };

        let mime_type = match check_mime_type(filepath, &self.config.supported_mimetypes) {
            Ok(mime) => mime,
            Err(failure) => return ValidationResult::invalid(path, failure),
        };

        let file_size = match check_file_size(filepath, self.config.max_file_size_bytes) {
            Ok(size) => size,
            Err(failure) => return ValidationResult::invalid(path, failure),
        };

        if let Err(failure) = check_hash_unique(filepath, &file_hash, &self.store).await {
            return ValidationResult::invalid(path, failure);
        }

        debug!(filepath = %path.display(), hash = %file_hash, "file passed validation");
        ValidationResult::valid(path, file_hash, mime_type, file_size)
    }

    pub async fn validate_files(&self, filepaths: &[PathBuf]) -> BatchValidationResult {
        let results: Vec<ValidationResult> = stream::iter(filepaths)
            .map(|path| self.validate_file(path))
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut batch = BatchValidationResult::default();
        for result in results {
            if result.is_valid {
                batch.valid_files.push(result);
            } else {
                batch.invalid_files.push(result);
            }
        }
        batch
    }
}
