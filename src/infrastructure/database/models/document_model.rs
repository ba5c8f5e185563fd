use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::{Document, NewDocument};
use crate::domain::value_objects::FileHash;
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = documents)]
pub struct DocumentModel {
    pub id: String,
    pub raw_file_path: String,
    pub file_hash: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub ingestion_date: NaiveDateTime,
    pub total_sections: i32,
    pub total_images: i32,
    pub total_tables: i32,
    pub total_pages: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentModel {
    pub id: String,
    pub raw_file_path: String,
    pub file_hash: String,
    pub file_size_bytes: i64,
    pub mime_type: String,
    pub ingestion_date: NaiveDateTime,
}

impl From<&NewDocument> for NewDocumentModel {
    fn from(document: &NewDocument) -> Self {
        Self {
            id: document.id.clone(),
            raw_file_path: document.raw_file_path.clone(),
            file_hash: document.file_hash.to_string(),
            file_size_bytes: document.file_size_bytes,
            mime_type: document.mime_type.clone(),
            ingestion_date: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<DocumentModel> for Document {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            raw_file_path: model.raw_file_path,
            file_hash: FileHash::new(model.file_hash)?,
            file_size_bytes: model.file_size_bytes,
            mime_type: model.mime_type,
            ingestion_date: DateTime::<Utc>::from_naive_utc_and_offset(model.ingestion_date, Utc),
            total_sections: model.total_sections,
            total_images: model.total_images,
            total_tables: model.total_tables,
            total_pages: model.total_pages,
        })
    }
}
