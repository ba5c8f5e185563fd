use async_trait::async_trait;

use crate::domain::entities::{
    Document, DocumentImage, DocumentMetadata, DocumentSection, DocumentTable, NewDocument,
    NewDocumentImage, NewDocumentTable, SectionContent,
};

#[derive(Debug)]
pub enum DocumentStoreError {
    /// A document with the same content hash already exists. Carries the
    /// hash and, when the store can resolve it, the existing document id.
    DuplicateHash {
        file_hash: String,
        existing_doc_id: Option<String>,
    },
    /// Metadata for the document already exists (the relation is 1:1).
    DuplicateMetadata(String),
    NotFound(String),
    DatabaseError(String),
}

impl std::fmt::Display for DocumentStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStoreError::DuplicateHash {
                file_hash,
                existing_doc_id,
            } => match existing_doc_id {
                Some(id) => write!(
                    f,
                    "Document with hash {} already exists as {}",
                    file_hash, id
                ),
                None => write!(f, "Document with hash {} already exists", file_hash),
            },
            DocumentStoreError::DuplicateMetadata(doc_id) => {
                write!(f, "Metadata for document {} already exists", doc_id)
            }
            DocumentStoreError::NotFound(id) => write!(f, "Document not found: {}", id),
            DocumentStoreError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentStoreError {}

/// Persistence boundary for the ingested document model.
///
/// `create_document` is atomic with respect to hash uniqueness: two
/// concurrent inserts of identical content must leave exactly one row, with
/// the loser seeing `DuplicateHash`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_document(&self, document: NewDocument)
        -> Result<Document, DocumentStoreError>;

    async fn get_document_by_id(
        &self,
        doc_id: &str,
    ) -> Result<Option<Document>, DocumentStoreError>;

    async fn get_document_by_hash(
        &self,
        file_hash: &str,
    ) -> Result<Option<Document>, DocumentStoreError>;

    async fn create_metadata(
        &self,
        metadata: DocumentMetadata,
    ) -> Result<DocumentMetadata, DocumentStoreError>;

    async fn get_metadata(
        &self,
        doc_id: &str,
    ) -> Result<Option<DocumentMetadata>, DocumentStoreError>;

    async fn create_section(
        &self,
        section: DocumentSection,
    ) -> Result<DocumentSection, DocumentStoreError>;

    async fn create_section_content(
        &self,
        content: SectionContent,
    ) -> Result<SectionContent, DocumentStoreError>;

    /// All sections for a document, ordered by `sequence_order`.
    async fn get_document_sections(
        &self,
        doc_id: &str,
    ) -> Result<Vec<DocumentSection>, DocumentStoreError>;

    async fn create_image(
        &self,
        image: NewDocumentImage,
    ) -> Result<DocumentImage, DocumentStoreError>;

    async fn get_section_images(
        &self,
        section_id: &str,
    ) -> Result<Vec<DocumentImage>, DocumentStoreError>;

    async fn create_table(
        &self,
        table: NewDocumentTable,
    ) -> Result<DocumentTable, DocumentStoreError>;

    async fn get_section_tables(
        &self,
        section_id: &str,
    ) -> Result<Vec<DocumentTable>, DocumentStoreError>;

    /// Deletes a document and everything hanging off it. Returns `false`
    /// when no such document exists.
    async fn delete_document(&self, doc_id: &str) -> Result<bool, DocumentStoreError>;
}
