use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::domain::entities::DocumentMetadata;
use crate::infrastructure::database::schema::document_metadata;

/// Author lists are persisted as a JSON array in a text column; SQLite has
/// no native array type.
#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = document_metadata)]
#[diesel(primary_key(doc_id))]
pub struct MetadataModel {
    pub doc_id: String,
    pub title: Option<String>,
    pub authors: Option<String>,
    pub creation_date: Option<NaiveDateTime>,
    pub page_count: Option<i32>,
    pub language: Option<String>,
}

impl From<&DocumentMetadata> for MetadataModel {
    fn from(metadata: &DocumentMetadata) -> Self {
        Self {
            doc_id: metadata.doc_id.clone(),
            title: metadata.title.clone(),
            authors: metadata
                .authors
                .as_ref()
                .and_then(|authors| serde_json::to_string(authors).ok()),
            creation_date: metadata.creation_date.map(|d| d.naive_utc()),
            page_count: metadata.page_count,
            language: metadata.language.clone(),
        }
    }
}

impl TryFrom<MetadataModel> for DocumentMetadata {
    type Error = String;

    fn try_from(model: MetadataModel) -> Result<Self, Self::Error> {
        let authors = match model.authors {
            Some(json) => Some(
                serde_json::from_str::<Vec<String>>(&json)
                    .map_err(|e| format!("invalid authors column: {}", e))?,
            ),
            None => None,
        };
        Ok(Self {
            doc_id: model.doc_id,
            title: model.title,
            authors,
            creation_date: model
                .creation_date
                .map(|d| DateTime::<Utc>::from_naive_utc_and_offset(d, Utc)),
            page_count: model.page_count,
            language: model.language,
        })
    }
}
