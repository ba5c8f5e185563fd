use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use docintake::config::IngestionConfig;
use docintake::infrastructure::container::AppContainer;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = IngestionConfig::from_env();
    info!(
        ingest_dir = %config.ingest_dir.display(),
        storage_dir = %config.storage_dir.display(),
        database_url = %config.database_url,
        "starting ingestion run"
    );

    if let Err(e) = std::fs::create_dir_all(&config.storage_dir) {
        error!("Failed to prepare storage directory: {}", e);
        std::process::exit(1);
    }

    let container = match AppContainer::new(&config) {
        Ok(container) => container,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let report = match container
        .ingest_directory_use_case
        .execute(&config.ingest_dir)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            error!("Ingestion run failed: {}", e);
            std::process::exit(1);
        }
    };

    for rejected in &report.validation.invalid_files {
        for failure in &rejected.check_failures {
            warn!(
                file = %rejected.filepath.display(),
                kind = ?failure.kind,
                "rejected: {}",
                failure.message
            );
        }
    }

    info!(
        discovered = report.discovered_files.len(),
        created = report.documents_created(),
        rejected = report.files_rejected(),
        "ingestion finished"
    );
}
