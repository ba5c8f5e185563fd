use std::sync::Arc;

use crate::{
    application::{
        ports::{DocumentStorage, MetadataExtractor},
        services::{
            DirectoryMonitor, DocumentIndexer, DocumentProcessor, DocumentValidator,
            IndexerConfig, ValidatorConfig,
        },
        use_cases::IngestDirectoryUseCase,
    },
    config::IngestionConfig,
    domain::repositories::DocumentStore,
    infrastructure::{
        database::{
            create_connection_pool, get_connection_from_pool, run_migrations, SqliteDocumentStore,
        },
        external_services::PdfMetadataExtractor,
        file_system::LocalDocumentStorage,
    },
};

pub struct AppContainer {
    pub document_store: Arc<dyn DocumentStore>,
    pub document_storage: Arc<dyn DocumentStorage>,
    pub metadata_extractor: Arc<dyn MetadataExtractor>,
    pub ingest_directory_use_case: Arc<IngestDirectoryUseCase>,
}

impl AppContainer {
    pub fn new(config: &IngestionConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool(&config.database_url)?;
        let mut conn = get_connection_from_pool(&db_pool)
            .map_err(|e| format!("Failed to create database connection: {}", e))?;
        run_migrations(&mut conn)
            .map_err(|e| format!("Failed to run database migrations: {}", e))?;

        let document_store: Arc<dyn DocumentStore> =
            Arc::new(SqliteDocumentStore::new(db_pool));
        let document_storage: Arc<dyn DocumentStorage> =
            Arc::new(LocalDocumentStorage::new(config.storage_dir.clone()));
        let metadata_extractor: Arc<dyn MetadataExtractor> =
            Arc::new(PdfMetadataExtractor::new(config.text_preview_chars));

        let monitor = DirectoryMonitor::new(config.supported_extensions.clone());
        let validator = DocumentValidator::new(
            document_store.clone(),
            ValidatorConfig {
                max_file_size_bytes: config.max_file_size_bytes,
                supported_mimetypes: config.supported_mimetypes.clone(),
                concurrency: config.concurrency,
            },
        );
        let processor = DocumentProcessor::new(document_storage.clone())
            .with_concurrency(config.concurrency);
        let indexer = DocumentIndexer::new(
            document_store.clone(),
            metadata_extractor.clone(),
            IndexerConfig {
                supported_mimetypes: config.supported_mimetypes.clone(),
                concurrency: config.concurrency,
            },
        );

        let ingest_directory_use_case = Arc::new(IngestDirectoryUseCase::new(
            monitor, validator, processor, indexer,
        ));

        Ok(Self {
            document_store,
            document_storage,
            metadata_extractor,
            ingest_directory_use_case,
        })
    }
}
