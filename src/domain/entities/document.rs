use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::FileHash;

/// Creation shape for a document record. The store fills in the ingestion
/// date and the derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub id: String,
    pub raw_file_path: String,
    pub file_hash: FileHash,
    pub file_size_bytes: i64,
    pub mime_type: String,
}

/// Top-level persisted record for one ingested file.
///
/// `file_hash` is globally unique; the store enforces this with a unique
/// constraint so a second insert with the same hash fails distinguishably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub raw_file_path: String,
    pub file_hash: FileHash,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub ingestion_date: DateTime<Utc>,
    pub total_sections: i32,
    pub total_images: i32,
    pub total_tables: i32,
    pub total_pages: i32,
}

impl Document {
    pub fn from_new(new: NewDocument, ingestion_date: DateTime<Utc>) -> Self {
        Self {
            id: new.id,
            raw_file_path: new.raw_file_path,
            file_hash: new.file_hash,
            file_size_bytes: new.file_size_bytes,
            mime_type: new.mime_type,
            ingestion_date,
            total_sections: 0,
            total_images: 0,
            total_tables: 0,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_new_zeroes_totals() {
        let new = NewDocument {
            id: "DOC_abc123def456".to_string(),
            raw_file_path: "/storage/DOC_abc123def456.pdf".to_string(),
            file_hash: FileHash::from_bytes(b"content"),
            file_size_bytes: 1024,
            mime_type: "application/pdf".to_string(),
        };

        let doc = Document::from_new(new.clone(), Utc::now());
        assert_eq!(doc.id, new.id);
        assert_eq!(doc.total_sections, 0);
        assert_eq!(doc.total_pages, 0);
    }
}
