pub mod document_model;
pub mod metadata_model;
pub mod section_model;

pub use document_model::{DocumentModel, NewDocumentModel};
pub use metadata_model::MetadataModel;
pub use section_model::{
    ImageModel, NewImageModel, NewTableModel, SectionContentModel, SectionModel, TableModel,
};
