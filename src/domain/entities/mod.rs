pub mod document;
pub mod document_metadata;
pub mod document_section;

pub use document::{Document, NewDocument};
pub use document_metadata::DocumentMetadata;
pub use document_section::{
    DocumentImage, DocumentSection, DocumentTable, NewDocumentImage, NewDocumentTable,
    SectionContent,
};
