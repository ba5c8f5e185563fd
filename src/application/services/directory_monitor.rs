use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::info;

#[derive(Debug)]
pub enum MonitorError {
    DirectoryNotFound(String),
    NotADirectory(String),
    Unreadable(String),
}

impl std::fmt::Display for MonitorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorError::DirectoryNotFound(path) => {
                write!(f, "Directory does not exist: {}", path)
            }
            MonitorError::NotADirectory(path) => write!(f, "Path is not a directory: {}", path),
            MonitorError::Unreadable(msg) => write!(f, "Error scanning directory: {}", msg),
        }
    }
}

impl std::error::Error for MonitorError {}

/// Discovers candidate files in an ingest directory by extension allow-list.
///
/// Structural problems (missing/unreadable directory) are hard errors; an
/// empty directory is an ordinary empty result.
pub struct DirectoryMonitor {
    supported_extensions: Vec<String>,
}

impl DirectoryMonitor {
    pub fn new(supported_extensions: Vec<String>) -> Self {
        Self {
            supported_extensions,
        }
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.supported_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    pub async fn get_ingestible_files(
        &self,
        directory: &Path,
    ) -> Result<Vec<PathBuf>, MonitorError> {
        if !directory.exists() {
            return Err(MonitorError::DirectoryNotFound(
                directory.display().to_string(),
            ));
        }
        if !directory.is_dir() {
            return Err(MonitorError::NotADirectory(directory.display().to_string()));
        }

        let mut entries = fs::read_dir(directory)
            .await
            .map_err(|e| MonitorError::Unreadable(e.to_string()))?;

        let mut found = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| MonitorError::Unreadable(e.to_string()))?
        {
            let path = entry.path();
            if path.is_file() && self.is_supported(&path) {
                found.push(path);
            }
        }

        found.sort();
        info!(
            directory = %directory.display(),
            count = found.len(),
            "scanned ingest directory"
        );
        Ok(found)
    }
}

impl Default for DirectoryMonitor {
    fn default() -> Self {
        Self::new(vec!["pdf".to_string()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_directory_is_structural_error() {
        let monitor = DirectoryMonitor::default();
        let result = monitor
            .get_ingestible_files(Path::new("/no/such/directory"))
            .await;
        assert!(matches!(result, Err(MonitorError::DirectoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_file_path_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.pdf");
        std::fs::write(&file, b"%PDF-1.4").unwrap();

        let monitor = DirectoryMonitor::default();
        let result = monitor.get_ingestible_files(&file).await;
        assert!(matches!(result, Err(MonitorError::NotADirectory(_))));
    }

    #[tokio::test]
    async fn test_extension_filter_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(dir.path().join("b.PDF"), b"x").unwrap();
        std::fs::write(dir.path().join("c.txt"), b"x").unwrap();
        std::fs::write(dir.path().join("noext"), b"x").unwrap();

        let monitor = DirectoryMonitor::default();
        let files = monitor.get_ingestible_files(dir.path()).await.unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| {
            p.extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        }));
    }

    #[tokio::test]
    async fn test_empty_directory_is_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = DirectoryMonitor::default();
        let files = monitor.get_ingestible_files(dir.path()).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_subdirectories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let monitor = DirectoryMonitor::default();
        let files = monitor.get_ingestible_files(dir.path()).await.unwrap();
        assert!(files.is_empty());
    }
}
