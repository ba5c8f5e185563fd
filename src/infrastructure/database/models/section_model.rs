use diesel::prelude::*;

use crate::domain::entities::{
    DocumentImage, DocumentSection, DocumentTable, NewDocumentImage, NewDocumentTable,
    SectionContent,
};
use crate::infrastructure::database::schema::{
    document_images, document_sections, document_tables, section_contents,
};

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = document_sections)]
#[diesel(primary_key(section_id))]
pub struct SectionModel {
    pub section_id: String,
    pub doc_id: String,
    pub parent_section_id: Option<String>,
    pub level: i32,
    pub sequence_order: i32,
    pub word_count: i32,
    pub image_count: i32,
    pub table_count: i32,
}

impl From<&DocumentSection> for SectionModel {
    fn from(section: &DocumentSection) -> Self {
        Self {
            section_id: section.section_id.clone(),
            doc_id: section.doc_id.clone(),
            parent_section_id: section.parent_section_id.clone(),
            level: section.level,
            sequence_order: section.sequence_order,
            word_count: section.word_count,
            image_count: section.image_count,
            table_count: section.table_count,
        }
    }
}

impl From<SectionModel> for DocumentSection {
    fn from(model: SectionModel) -> Self {
        Self {
            section_id: model.section_id,
            doc_id: model.doc_id,
            parent_section_id: model.parent_section_id,
            level: model.level,
            sequence_order: model.sequence_order,
            word_count: model.word_count,
            image_count: model.image_count,
            table_count: model.table_count,
        }
    }
}

#[derive(Debug, Clone, Queryable, Insertable, Identifiable)]
#[diesel(table_name = section_contents)]
#[diesel(primary_key(section_id))]
pub struct SectionContentModel {
    pub section_id: String,
    pub title: String,
    pub content: String,
    pub page_start: Option<i32>,
    pub page_end: Option<i32>,
}

impl From<&SectionContent> for SectionContentModel {
    fn from(content: &SectionContent) -> Self {
        Self {
            section_id: content.section_id.clone(),
            title: content.title.clone(),
            content: content.content.clone(),
            page_start: content.page_start,
            page_end: content.page_end,
        }
    }
}

impl From<SectionContentModel> for SectionContent {
    fn from(model: SectionContentModel) -> Self {
        Self {
            section_id: model.section_id,
            title: model.title,
            content: model.content,
            page_start: model.page_start,
            page_end: model.page_end,
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = document_images)]
pub struct ImageModel {
    pub id: i32,
    pub doc_id: String,
    pub section_id: String,
    pub image_data: String,
    pub caption: Option<String>,
    pub page_number: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = document_images)]
pub struct NewImageModel {
    pub doc_id: String,
    pub section_id: String,
    pub image_data: String,
    pub caption: Option<String>,
    pub page_number: i32,
}

impl From<&NewDocumentImage> for NewImageModel {
    fn from(image: &NewDocumentImage) -> Self {
        Self {
            doc_id: image.doc_id.clone(),
            section_id: image.section_id.clone(),
            image_data: image.image_data.clone(),
            caption: image.caption.clone(),
            page_number: image.page_number,
        }
    }
}

impl From<ImageModel> for DocumentImage {
    fn from(model: ImageModel) -> Self {
        Self {
            id: model.id,
            doc_id: model.doc_id,
            section_id: model.section_id,
            image_data: model.image_data,
            caption: model.caption,
            page_number: model.page_number,
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = document_tables)]
pub struct TableModel {
    pub id: i32,
    pub doc_id: String,
    pub section_id: String,
    pub table_data: String,
    pub caption: Option<String>,
    pub page_number: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = document_tables)]
pub struct NewTableModel {
    pub doc_id: String,
    pub section_id: String,
    pub table_data: String,
    pub caption: Option<String>,
    pub page_number: i32,
}

impl TryFrom<&NewDocumentTable> for NewTableModel {
    type Error = String;

    fn try_from(table: &NewDocumentTable) -> Result<Self, Self::Error> {
        Ok(Self {
            doc_id: table.doc_id.clone(),
            section_id: table.section_id.clone(),
            table_data: serde_json::to_string(&table.table_data)
                .map_err(|e| format!("unserializable table data: {}", e))?,
            caption: table.caption.clone(),
            page_number: table.page_number,
        })
    }
}

impl TryFrom<TableModel> for DocumentTable {
    type Error = String;

    fn try_from(model: TableModel) -> Result<Self, Self::Error> {
        Ok(DocumentTable {
            id: model.id,
            doc_id: model.doc_id,
            section_id: model.section_id,
            table_data: serde_json::from_str(&model.table_data)
                .map_err(|e| format!("invalid table data column: {}", e))?,
            caption: model.caption,
            page_number: model.page_number,
        })
    }
}
