pub mod doc_id;
pub mod file_hash;

pub use doc_id::{DocId, DOCUMENT_ID_PREFIX, SECTION_ID_PREFIX};
pub use file_hash::FileHash;
