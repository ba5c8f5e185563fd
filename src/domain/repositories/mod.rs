pub mod document_store;

pub use document_store::{DocumentStore, DocumentStoreError};
