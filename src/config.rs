use std::env;
use std::path::PathBuf;

pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;
pub const DEFAULT_TEXT_PREVIEW_CHARS: usize = 1000;
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Runtime configuration, sourced from the environment with sensible
/// defaults for local runs.
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    /// Directory watched for incoming files.
    pub ingest_dir: PathBuf,
    /// Managed directory validated files are copied into.
    pub storage_dir: PathBuf,
    pub database_url: String,
    pub max_file_size_bytes: u64,
    pub supported_mimetypes: Vec<String>,
    pub supported_extensions: Vec<String>,
    pub text_preview_chars: usize,
    /// Upper bound on files validated, stored, or indexed at once.
    pub concurrency: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            ingest_dir: PathBuf::from("./ingest"),
            storage_dir: PathBuf::from("./storage"),
            database_url: "documents.db".to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            supported_mimetypes: vec![
                "application/pdf".to_string(),
                "application/x-pdf".to_string(),
            ],
            supported_extensions: vec!["pdf".to_string()],
            text_preview_chars: DEFAULT_TEXT_PREVIEW_CHARS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl IngestionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            ingest_dir: env::var("INGEST_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.ingest_dir),
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_file_size_bytes: parse_env("MAX_FILE_SIZE_BYTES", defaults.max_file_size_bytes),
            supported_mimetypes: defaults.supported_mimetypes,
            supported_extensions: defaults.supported_extensions,
            text_preview_chars: parse_env("TEXT_PREVIEW_CHARS", defaults.text_preview_chars),
            concurrency: parse_env("INGEST_CONCURRENCY", defaults.concurrency).max(1),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
