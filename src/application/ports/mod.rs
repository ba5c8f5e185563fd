pub mod document_storage;
pub mod metadata_extractor;

pub use document_storage::{DocumentStorage, DocumentStorageError};
pub use metadata_extractor::{ExtractedMetadata, MetadataExtractionError, MetadataExtractor};
