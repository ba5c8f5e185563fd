use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::entities::{
    Document, DocumentImage, DocumentMetadata, DocumentSection, DocumentTable, NewDocument,
    NewDocumentImage, NewDocumentTable, SectionContent,
};
use crate::domain::repositories::{DocumentStore, DocumentStoreError};
use crate::infrastructure::database::models::{
    DocumentModel, ImageModel, MetadataModel, NewDocumentModel, NewImageModel, NewTableModel,
    SectionContentModel, SectionModel, TableModel,
};
use crate::infrastructure::database::schema::{
    document_images, document_metadata, document_sections, document_tables, documents,
    section_contents,
};
use crate::infrastructure::database::{get_connection_from_pool, DbConnection, DbPool};

/// Diesel-backed `DocumentStore` over SQLite.
///
/// Hash uniqueness rests on the `documents.file_hash` UNIQUE constraint, so
/// concurrent inserts of identical content are decided by the database, not
/// by an application-level check.
pub struct SqliteDocumentStore {
    pool: DbPool,
}

impl SqliteDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, DocumentStoreError> {
        get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))
    }

    fn is_unique_violation(error: &DieselError) -> bool {
        matches!(
            error,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
        )
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn create_document(
        &self,
        document: NewDocument,
    ) -> Result<Document, DocumentStoreError> {
        let mut conn = self.conn()?;
        let new_model = NewDocumentModel::from(&document);

        let inserted: DocumentModel = diesel::insert_into(documents::table)
            .values(&new_model)
            .get_result(&mut conn)
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    // Resolve the existing document id for the caller's
                    // diagnostics; failures here fall back to hash-only.
                    let existing_doc_id = documents::table
                        .filter(documents::file_hash.eq(document.file_hash.as_str()))
                        .select(documents::id)
                        .first::<String>(&mut conn)
                        .optional()
                        .ok()
                        .flatten();
                    DocumentStoreError::DuplicateHash {
                        file_hash: document.file_hash.to_string(),
                        existing_doc_id,
                    }
                } else {
                    DocumentStoreError::DatabaseError(e.to_string())
                }
            })?;

        Document::try_from(inserted).map_err(DocumentStoreError::DatabaseError)
    }

    async fn get_document_by_id(
        &self,
        doc_id: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let mut conn = self.conn()?;

        let result = documents::table
            .find(doc_id)
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        result
            .map(|model| Document::try_from(model).map_err(DocumentStoreError::DatabaseError))
            .transpose()
    }

    async fn get_document_by_hash(
        &self,
        file_hash: &str,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let mut conn = self.conn()?;

        let result = documents::table
            .filter(documents::file_hash.eq(file_hash))
            .first::<DocumentModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        result
            .map(|model| Document::try_from(model).map_err(DocumentStoreError::DatabaseError))
            .transpose()
    }

    async fn create_metadata(
        &self,
        metadata: DocumentMetadata,
    ) -> Result<DocumentMetadata, DocumentStoreError> {
        let mut conn = self.conn()?;
        let model = MetadataModel::from(&metadata);

        diesel::insert_into(document_metadata::table)
            .values(&model)
            .execute(&mut conn)
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    DocumentStoreError::DuplicateMetadata(metadata.doc_id.clone())
                } else {
                    DocumentStoreError::DatabaseError(e.to_string())
                }
            })?;

        Ok(metadata)
    }

    async fn get_metadata(
        &self,
        doc_id: &str,
    ) -> Result<Option<DocumentMetadata>, DocumentStoreError> {
        let mut conn = self.conn()?;

        let result = document_metadata::table
            .find(doc_id)
            .first::<MetadataModel>(&mut conn)
            .optional()
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        result
            .map(|model| {
                DocumentMetadata::try_from(model).map_err(DocumentStoreError::DatabaseError)
            })
            .transpose()
    }

    async fn create_section(
        &self,
        section: DocumentSection,
    ) -> Result<DocumentSection, DocumentStoreError> {
        let mut conn = self.conn()?;
        let model = SectionModel::from(&section);

        diesel::insert_into(document_sections::table)
            .values(&model)
            .execute(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(section)
    }

    async fn create_section_content(
        &self,
        content: SectionContent,
    ) -> Result<SectionContent, DocumentStoreError> {
        let mut conn = self.conn()?;
        let model = SectionContentModel::from(&content);

        diesel::insert_into(section_contents::table)
            .values(&model)
            .execute(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(content)
    }

    async fn get_document_sections(
        &self,
        doc_id: &str,
    ) -> Result<Vec<DocumentSection>, DocumentStoreError> {
        let mut conn = self.conn()?;

        let models = document_sections::table
            .filter(document_sections::doc_id.eq(doc_id))
            .order(document_sections::sequence_order.asc())
            .load::<SectionModel>(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(DocumentSection::from).collect())
    }

    async fn create_image(
        &self,
        image: NewDocumentImage,
    ) -> Result<DocumentImage, DocumentStoreError> {
        let mut conn = self.conn()?;
        let model = NewImageModel::from(&image);

        let inserted: ImageModel = diesel::insert_into(document_images::table)
            .values(&model)
            .get_result(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(DocumentImage::from(inserted))
    }

    async fn get_section_images(
        &self,
        section_id: &str,
    ) -> Result<Vec<DocumentImage>, DocumentStoreError> {
        let mut conn = self.conn()?;

        let models = document_images::table
            .filter(document_images::section_id.eq(section_id))
            .order(document_images::page_number.asc())
            .load::<ImageModel>(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(models.into_iter().map(DocumentImage::from).collect())
    }

    async fn create_table(
        &self,
        table: NewDocumentTable,
    ) -> Result<DocumentTable, DocumentStoreError> {
        let mut conn = self.conn()?;
        let model =
            NewTableModel::try_from(&table).map_err(DocumentStoreError::DatabaseError)?;

        let inserted: TableModel = diesel::insert_into(document_tables::table)
            .values(&model)
            .get_result(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        DocumentTable::try_from(inserted).map_err(DocumentStoreError::DatabaseError)
    }

    async fn get_section_tables(
        &self,
        section_id: &str,
    ) -> Result<Vec<DocumentTable>, DocumentStoreError> {
        let mut conn = self.conn()?;

        let models = document_tables::table
            .filter(document_tables::section_id.eq(section_id))
            .order(document_tables::page_number.asc())
            .load::<TableModel>(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        models
            .into_iter()
            .map(|model| DocumentTable::try_from(model).map_err(DocumentStoreError::DatabaseError))
            .collect()
    }

    async fn delete_document(&self, doc_id: &str) -> Result<bool, DocumentStoreError> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(documents::table.find(doc_id))
            .execute(&mut conn)
            .map_err(|e| DocumentStoreError::DatabaseError(e.to_string()))?;

        Ok(deleted > 0)
    }
}
