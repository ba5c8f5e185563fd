use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::entities::{
    Document, DocumentImage, DocumentMetadata, DocumentSection, DocumentTable, NewDocument,
    NewDocumentImage, NewDocumentTable, SectionContent,
};
use crate::domain::repositories::{DocumentStore, DocumentStoreError};

#[derive(Default)]
struct StoreState {
    documents: HashMap<String, Document>,
    // file_hash -> doc_id
    hash_index: HashMap<String, String>,
    metadata: HashMap<String, DocumentMetadata>,
    sections: HashMap<String, DocumentSection>,
    contents: HashMap<String, SectionContent>,
    images: Vec<DocumentImage>,
    tables: Vec<DocumentTable>,
    next_image_id: i32,
    next_table_id: i32,
}

/// In-memory `DocumentStore` with the same uniqueness contract as the SQLite
/// implementation. Backs unit tests and throwaway runs; nothing survives the
/// process.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    state: Mutex<StoreState>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn document_count(&self) -> usize {
        self.state.lock().await.documents.len()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_document(
        &self,
        document: NewDocument,
    ) -> Result<Document, DocumentStoreError> {
        let mut state = self.state.lock().await;

        if let Some(existing_id) = state.hash_index.get(document.file_hash.as_str()) {
            return Err(DocumentStoreError::DuplicateHash {
                file_hash: document.file_hash.to_string(),
                existing_doc_id: Some(existing_id.clone()),
            });
        }
        if state.documents.contains_key(&document.id) {
            return Err(DocumentStoreError::DatabaseError(format!(
                "document id {} already exists",
                document.id
            )));
        }

        let record = Document::from_new(document, Utc::now());
        state
            .hash_index
            .insert(record.file_hash.to_string(), record.id.clone());
        state.documents.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn get_document_by_id(
        &self,
        doc_id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        Ok(self.state.lock().await.documents.get(doc_id).cloned())
    }

    async fn get_document_by_hash(
        &self,
        file_hash: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let state = self.state.lock().await;
        Ok(state
            .hash_index
            .get(file_hash)
            .and_then(|id| state.documents.get(id))
            .cloned())
    }

    async fn create_metadata(
        &self,
        metadata: DocumentMetadata,
    ) -> Result<DocumentMetadata, DocumentStoreError> {
        let mut state = self.state.lock().await;
        if !state.documents.contains_key(&metadata.doc_id) {
            return Err(DocumentStoreError::NotFound(metadata.doc_id.clone()));
        }
        if state.metadata.contains_key(&metadata.doc_id) {
            return Err(DocumentStoreError::DuplicateMetadata(metadata.doc_id));
        }
        state
            .metadata
            .insert(metadata.doc_id.clone(), metadata.clone());
        Ok(metadata)
    }

    async fn get_metadata(
        &self,
        doc_id: &str,
    ) -> Result<Option<DocumentMetadata>, DocumentStoreError> {
        Ok(self.state.lock().await.metadata.get(doc_id).cloned())
    }

    async fn create_section(
        &self,
        section: DocumentSection,
    ) -> Result<DocumentSection, DocumentStoreError> {
        let mut state = self.state.lock().await;
        if state.sections.contains_key(&section.section_id) {
            return Err(DocumentStoreError::DatabaseError(format!(
                "section {} already exists",
                section.section_id
            )));
        }
        state
            .sections
            .insert(section.section_id.clone(), section.clone());
        Ok(section)
    }

    async fn create_section_content(
        &self,
        content: SectionContent,
    ) -> Result<SectionContent, DocumentStoreError> {
        let mut state = self.state.lock().await;
        if !state.sections.contains_key(&content.section_id) {
            return Err(DocumentStoreError::NotFound(content.section_id.clone()));
        }
        state
            .contents
            .insert(content.section_id.clone(), content.clone());
        Ok(content)
    }

    async fn get_document_sections(
        &self,
        doc_id: &str,
    ) -> Result<Vec<DocumentSection>, DocumentStoreError> {
        let state = self.state.lock().await;
        let mut sections: Vec<DocumentSection> = state
            .sections
            .values()
            .filter(|s| s.doc_id == doc_id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| s.sequence_order);
        Ok(sections)
    }

    async fn create_image(
        &self,
        image: NewDocumentImage,
    ) -> Result<DocumentImage, DocumentStoreError> {
        let mut state = self.state.lock().await;
        state.next_image_id += 1;
        let record = DocumentImage {
            id: state.next_image_id,
            doc_id: image.doc_id,
            section_id: image.section_id,
            image_data: image.image_data,
            caption: image.caption,
            page_number: image.page_number,
        };
        state.images.push(record.clone());
        Ok(record)
    }

    async fn get_section_images(
        &self,
        section_id: &str,
    ) -> Result<Vec<DocumentImage>, DocumentStoreError> {
        let state = self.state.lock().await;
        let mut images: Vec<DocumentImage> = state
            .images
            .iter()
            .filter(|i| i.section_id == section_id)
            .cloned()
            .collect();
        images.sort_by_key(|i| i.page_number);
        Ok(images)
    }

    async fn create_table(
        &self,
        table: NewDocumentTable,
    ) -> Result<DocumentTable, DocumentStoreError> {
        let mut state = self.state.lock().await;
        state.next_table_id += 1;
        let record = DocumentTable {
            id: state.next_table_id,
            doc_id: table.doc_id,
            section_id: table.section_id,
            table_data: table.table_data,
            caption: table.caption,
            page_number: table.page_number,
        };
        state.tables.push(record.clone());
        Ok(record)
    }

    async fn get_section_tables(
        &self,
        section_id: &str,
    ) -> Result<Vec<DocumentTable>, DocumentStoreError> {
        let state = self.state.lock().await;
        let mut tables: Vec<DocumentTable> = state
            .tables
            .iter()
            .filter(|t| t.section_id == section_id)
            .cloned()
            .collect();
        tables.sort_by_key(|t| t.page_number);
        Ok(tables)
    }

    async fn delete_document(&self, doc_id: &str) -> Result<bool, DocumentStoreError> {
        let mut state = self.state.lock().await;
        let Some(document) = state.documents.remove(doc_id) else {
            return Ok(false);
        };

        state.hash_index.remove(document.file_hash.as_str());
        state.metadata.remove(doc_id);
        let section_ids: Vec<String> = state
            .sections
            .values()
            .filter(|s| s.doc_id == doc_id)
            .map(|s| s.section_id.clone())
            .collect();
        for section_id in &section_ids {
            state.sections.remove(section_id);
            state.contents.remove(section_id);
        }
        state.images.retain(|i| i.doc_id != doc_id);
        state.tables.retain(|t| t.doc_id != doc_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FileHash;

    fn new_document(id: &str, content: &[u8]) -> NewDocument {
        NewDocument {
            id: id.to_string(),
            raw_file_path: format!("/storage/{id}.pdf"),
            file_hash: FileHash::from_bytes(content),
            file_size_bytes: content.len() as i64,
            mime_type: "application/pdf".to_string(),
        }
    }

    fn section(section_id: &str, doc_id: &str, order: i32) -> DocumentSection {
        DocumentSection {
            section_id: section_id.to_string(),
            doc_id: doc_id.to_string(),
            parent_section_id: None,
            level: 1,
            sequence_order: order,
            word_count: 0,
            image_count: 0,
            table_count: 0,
        }
    }

    #[tokio::test]
    async fn test_duplicate_hash_rejected_with_existing_id() {
        let store = InMemoryDocumentStore::new();
        store
            .create_document(new_document("DOC_a", b"same"))
            .await
            .unwrap();

        let err = store
            .create_document(new_document("DOC_b", b"same"))
            .await
            .unwrap_err();
        match err {
            DocumentStoreError::DuplicateHash {
                existing_doc_id, ..
            } => assert_eq!(existing_doc_id.as_deref(), Some("DOC_a")),
            other => panic!("expected DuplicateHash, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_lookup_by_hash_and_id() {
        let store = InMemoryDocumentStore::new();
        let created = store
            .create_document(new_document("DOC_a", b"content"))
            .await
            .unwrap();

        let by_id = store.get_document_by_id("DOC_a").await.unwrap().unwrap();
        assert_eq!(by_id, created);
        let by_hash = store
            .get_document_by_hash(created.file_hash.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_hash.id, "DOC_a");
        assert!(store.get_document_by_id("DOC_x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_metadata_is_one_to_one() {
        let store = InMemoryDocumentStore::new();
        store
            .create_document(new_document("DOC_a", b"content"))
            .await
            .unwrap();

        store
            .create_metadata(DocumentMetadata::empty("DOC_a".to_string()))
            .await
            .unwrap();
        let err = store
            .create_metadata(DocumentMetadata::empty("DOC_a".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, DocumentStoreError::DuplicateMetadata(_)));
    }

    #[tokio::test]
    async fn test_sections_ordered_by_sequence() {
        let store = InMemoryDocumentStore::new();
        store
            .create_document(new_document("DOC_a", b"content"))
            .await
            .unwrap();
        store.create_section(section("SEC_2", "DOC_a", 2)).await.unwrap();
        store.create_section(section("SEC_1", "DOC_a", 1)).await.unwrap();

        let sections = store.get_document_sections("DOC_a").await.unwrap();
        assert_eq!(sections[0].section_id, "SEC_1");
        assert_eq!(sections[1].section_id, "SEC_2");
    }

    #[tokio::test]
    async fn test_delete_cascades_and_frees_hash() {
        let store = InMemoryDocumentStore::new();
        let doc = store
            .create_document(new_document("DOC_a", b"content"))
            .await
            .unwrap();
        store
            .create_metadata(DocumentMetadata::empty("DOC_a".to_string()))
            .await
            .unwrap();
        store.create_section(section("SEC_1", "DOC_a", 1)).await.unwrap();
        store
            .create_image(NewDocumentImage {
                doc_id: "DOC_a".to_string(),
                section_id: "SEC_1".to_string(),
                image_data: "aGVsbG8=".to_string(),
                caption: None,
                page_number: 1,
            })
            .await
            .unwrap();

        assert!(store.delete_document("DOC_a").await.unwrap());
        assert!(store.get_document_by_id("DOC_a").await.unwrap().is_none());
        assert!(store.get_metadata("DOC_a").await.unwrap().is_none());
        assert!(store.get_document_sections("DOC_a").await.unwrap().is_empty());
        assert!(store.get_section_images("SEC_1").await.unwrap().is_empty());

        // Hash may be reused after deletion.
        assert!(store
            .get_document_by_hash(doc.file_hash.as_str())
            .await
            .unwrap()
            .is_none());
        store
            .create_document(new_document("DOC_b", b"content"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_document_returns_false() {
        let store = InMemoryDocumentStore::new();
        assert!(!store.delete_document("DOC_x").await.unwrap());
    }
}
