use serde::{Deserialize, Serialize};

/// A titled, leveled subdivision of a document's content.
///
/// Sections form a tree via `parent_section_id`, ordered by
/// `sequence_order` within a document. `level` encodes nesting depth
/// (1 = top-level heading).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub section_id: String,
    pub doc_id: String,
    pub parent_section_id: Option<String>,
    pub level: i32,
    pub sequence_order: i32,
    pub word_count: i32,
    pub image_count: i32,
    pub table_count: i32,
}

/// Body text for a section, kept separate from the tree structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    pub section_id: String,
    pub title: String,
    pub content: String,
    pub page_start: Option<i32>,
    pub page_end: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocumentImage {
    pub doc_id: String,
    pub section_id: String,
    /// Base64-encoded image payload.
    pub image_data: String,
    pub caption: Option<String>,
    pub page_number: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentImage {
    pub id: i32,
    pub doc_id: String,
    pub section_id: String,
    pub image_data: String,
    pub caption: Option<String>,
    pub page_number: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocumentTable {
    pub doc_id: String,
    pub section_id: String,
    /// Structured rows, serialized as JSON.
    pub table_data: serde_json::Value,
    pub caption: Option<String>,
    pub page_number: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTable {
    pub id: i32,
    pub doc_id: String,
    pub section_id: String,
    pub table_data: serde_json::Value,
    pub caption: Option<String>,
    pub page_number: i32,
}
