use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional bibliographic metadata, 1:1 with a document.
///
/// Created best-effort during indexing; its absence never invalidates the
/// document it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub doc_id: String,
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub creation_date: Option<DateTime<Utc>>,
    pub page_count: Option<i32>,
    pub language: Option<String>,
}

impl DocumentMetadata {
    pub fn empty(doc_id: String) -> Self {
        Self {
            doc_id,
            title: None,
            authors: None,
            creation_date: None,
            page_count: None,
            language: None,
        }
    }
}
