pub mod directory_monitor;
pub mod document_indexer;
pub mod document_processor;
pub mod validation;

pub use directory_monitor::{DirectoryMonitor, MonitorError};
pub use document_indexer::{
    BatchIndexingResult, DocumentIndexer, IndexerConfig, IndexingResult, IndexingStatus,
};
pub use document_processor::{
    BatchProcessingResult, DocumentProcessor, ProcessingResult, ProcessingStatus,
};
pub use validation::{
    BatchValidationResult, DocumentValidator, ValidationCheckFailure, ValidationCheckKind,
    ValidationResult, ValidatorConfig,
};
