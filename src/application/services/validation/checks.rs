//! Individual validation checks. Each check is independent and returns
//! either its computed value or a single `ValidationCheckFailure`.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::domain::repositories::DocumentStore;
use crate::domain::value_objects::FileHash;

use super::{ValidationCheckFailure, ValidationCheckKind};

pub fn check_file_exists(filepath: &Path) -> Result<(), ValidationCheckFailure> {
    if !filepath.is_file() {
        return Err(ValidationCheckFailure::new(
            filepath.to_path_buf(),
            ValidationCheckKind::Other,
            "File does not exist or is not a regular file",
        ));
    }
    Ok(())
}

pub fn check_file_hash(filepath: &Path) -> Result<FileHash, ValidationCheckFailure> {
    FileHash::from_file(filepath).map_err(|e| {
        ValidationCheckFailure::new(
            filepath.to_path_buf(),
            ValidationCheckKind::CorruptedFile,
            format!("Unable to compute file hash: {}", e),
        )
    })
}

pub fn check_file_size(filepath: &Path, max_size: u64) -> Result<u64, ValidationCheckFailure> {
    let metadata = std::fs::metadata(filepath).map_err(|e| {
        let kind = match e.kind() {
            ErrorKind::PermissionDenied => ValidationCheckKind::PermissionError,
            _ => ValidationCheckKind::Other,
        };
        ValidationCheckFailure::new(
            filepath.to_path_buf(),
            kind,
            format!("Unable to check file size: {}", e),
        )
    })?;

    let file_size = metadata.len();
    if file_size > max_size {
        return Err(ValidationCheckFailure::new(
            filepath.to_path_buf(),
            ValidationCheckKind::FileTooLarge,
            format!("File exceeds maximum size of {} bytes", max_size),
        )
        .with_detail("file_size", json!(file_size))
        .with_detail("max_size", json!(max_size)));
    }

    Ok(file_size)
}

/// Content-sniffs the mime type and requires it to be in the supported set.
/// An undetectable type is a failure too; sniffing never silently passes.
pub fn check_mime_type(
    filepath: &Path,
    supported_types: &[String],
) -> Result<String, ValidationCheckFailure> {
    let detected = infer::get_from_path(filepath).map_err(|e| {
        ValidationCheckFailure::new(
            filepath.to_path_buf(),
            ValidationCheckKind::InvalidMimetype,
            format!("Unable to determine mime type: {}", e),
        )
    })?;

    let mime_type = match detected {
        Some(kind) => kind.mime_type().to_string(),
        None => {
            return Err(ValidationCheckFailure::new(
                filepath.to_path_buf(),
                ValidationCheckKind::InvalidMimetype,
                "Unable to determine mime type from file content",
            ));
        }
    };

    if !supported_types.iter().any(|t| t == &mime_type) {
        return Err(ValidationCheckFailure::new(
            filepath.to_path_buf(),
            ValidationCheckKind::InvalidMimetype,
            format!("Unsupported mime type: {}", mime_type),
        )
        .with_detail("mime_type", json!(mime_type)));
    }

    Ok(mime_type)
}

/// The only non-pure check: asks the store whether this hash is already
/// registered.
pub async fn check_hash_unique(
    filepath: &Path,
    file_hash: &FileHash,
    store: &Arc<dyn DocumentStore>,
) -> Result<(), ValidationCheckFailure> {
    let existing = store
        .get_document_by_hash(file_hash.as_str())
        .await
        .map_err(|e| {
            ValidationCheckFailure::new(
                filepath.to_path_buf(),
                ValidationCheckKind::Other,
                format!("Duplicate lookup failed: {}", e),
            )
        })?;

    if let Some(doc) = existing {
        return Err(ValidationCheckFailure::new(
            filepath.to_path_buf(),
            ValidationCheckKind::DuplicateHash,
            "Document with same hash already exists",
        )
        .with_detail("existing_doc_id", json!(doc.id)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewDocument;
    use crate::infrastructure::database::InMemoryDocumentStore;
    use std::path::PathBuf;

    fn write_pdf(dir: &tempfile::TempDir, name: &str, body: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.extend_from_slice(body);
        bytes.extend_from_slice(b"\n%%EOF");
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_existence_check_missing_file() {
        let err = check_file_exists(Path::new("/does/not/exist.pdf")).unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::Other);
    }

    #[test]
    fn test_existence_check_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_file_exists(dir.path()).unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::Other);
    }

    #[test]
    fn test_hash_check_unreadable_file() {
        let err = check_file_hash(Path::new("/does/not/exist.pdf")).unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::CorruptedFile);
    }

    #[test]
    fn test_size_check_boundary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exact.bin");
        std::fs::write(&path, vec![0u8; 100]).unwrap();

        // Exactly max_size passes.
        assert_eq!(check_file_size(&path, 100).unwrap(), 100);

        // One byte over fails with both sizes in the details.
        let err = check_file_size(&path, 99).unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::FileTooLarge);
        let details = err.details.unwrap();
        assert_eq!(details["file_size"], json!(100));
        assert_eq!(details["max_size"], json!(99));
    }

    #[test]
    fn test_mime_check_accepts_pdf_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(&dir, "doc.pdf", b"1 0 obj");
        let supported = vec!["application/pdf".to_string()];
        assert_eq!(check_mime_type(&path, &supported).unwrap(), "application/pdf");
    }

    #[test]
    fn test_mime_check_rejects_unknown_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"plain text, no recognizable magic").unwrap();

        let supported = vec!["application/pdf".to_string()];
        let err = check_mime_type(&path, &supported).unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::InvalidMimetype);
    }

    #[test]
    fn test_mime_check_rejects_unsupported_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        std::fs::write(&path, [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap();

        let supported = vec!["application/pdf".to_string()];
        let err = check_mime_type(&path, &supported).unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::InvalidMimetype);
        assert_eq!(err.details.unwrap()["mime_type"], json!("image/png"));
    }

    #[tokio::test]
    async fn test_hash_unique_check() {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
        let hash = FileHash::from_bytes(b"registered content");
        let path = Path::new("/ingest/new.pdf");

        check_hash_unique(path, &hash, &store).await.unwrap();

        store
            .create_document(NewDocument {
                id: "DOC_existing0001".to_string(),
                raw_file_path: "/storage/DOC_existing0001.pdf".to_string(),
                file_hash: hash.clone(),
                file_size_bytes: 10,
                mime_type: "application/pdf".to_string(),
            })
            .await
            .unwrap();

        let err = check_hash_unique(path, &hash, &store).await.unwrap_err();
        assert_eq!(err.kind, ValidationCheckKind::DuplicateHash);
        assert_eq!(
            err.details.unwrap()["existing_doc_id"],
            json!("DOC_existing0001")
        );
    }
}
