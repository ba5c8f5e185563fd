pub mod ingest_directory;

pub use ingest_directory::{IngestDirectoryError, IngestDirectoryUseCase, IngestionReport};
