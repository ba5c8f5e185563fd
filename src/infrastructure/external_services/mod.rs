pub mod pdf_metadata_extractor;

pub use pdf_metadata_extractor::PdfMetadataExtractor;
