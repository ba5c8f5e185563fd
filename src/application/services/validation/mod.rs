pub mod checks;
pub mod validator;

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::FileHash;

pub use validator::{DocumentValidator, ValidatorConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCheckKind {
    DuplicateHash,
    InvalidMimetype,
    CorruptedFile,
    FileTooLarge,
    PermissionError,
    Other,
}

/// One failed validation check. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationCheckFailure {
    pub filepath: PathBuf,
    pub kind: ValidationCheckKind,
    pub message: String,
    pub details: Option<HashMap<String, serde_json::Value>>,
}

impl ValidationCheckFailure {
    pub fn new(filepath: PathBuf, kind: ValidationCheckKind, message: impl Into<String>) -> Self {
        Self {
            filepath,
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: &str, value: serde_json::Value) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value);
        self
    }
}

/// Outcome of validating a single file.
///
/// Invariant: `is_valid == check_failures.is_empty()`, and the hash, mime
/// type and size fields are populated exactly when the file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub filepath: PathBuf,
    pub is_valid: bool,
    pub file_hash: Option<FileHash>,
    pub mime_type: Option<String>,
    pub file_size_bytes: Option<u64>,
    pub check_failures: Vec<ValidationCheckFailure>,
}

impl ValidationResult {
    pub fn valid(filepath: PathBuf, file_hash: FileHash, mime_type: String, size: u64) -> Self {
        Self {
            filepath,
            is_valid: true,
            file_hash: Some(file_hash),
            mime_type: Some(mime_type),
            file_size_bytes: Some(size),
            check_failures: Vec::new(),
        }
    }

    pub fn invalid(filepath: PathBuf, failure: ValidationCheckFailure) -> Self {
        Self {
            filepath,
            is_valid: false,
            file_hash: None,
            mime_type: None,
            file_size_bytes: None,
            check_failures: vec![failure],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchValidationResult {
    pub valid_files: Vec<ValidationResult>,
    pub invalid_files: Vec<ValidationResult>,
}

impl BatchValidationResult {
    pub fn has_valid_files(&self) -> bool {
        !self.valid_files.is_empty()
    }

    pub fn has_invalid_files(&self) -> bool {
        !self.invalid_files.is_empty()
    }
}
