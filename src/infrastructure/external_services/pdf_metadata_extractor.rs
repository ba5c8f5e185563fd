use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use lopdf::{Dictionary, Object};
use tracing::debug;

use crate::application::ports::{ExtractedMetadata, MetadataExtractionError, MetadataExtractor};

/// Pages scanned for the text preview; enough to cover a title page and
/// abstract without parsing the whole document.
const PREVIEW_PAGE_LIMIT: u32 = 3;

/// Reads bibliographic metadata from a PDF's document information
/// dictionary and pulls a bounded text preview from the leading pages.
pub struct PdfMetadataExtractor {
    text_preview_chars: usize,
}

impl PdfMetadataExtractor {
    pub fn new(text_preview_chars: usize) -> Self {
        Self { text_preview_chars }
    }

    fn extract_sync(
        path: &Path,
        text_preview_chars: usize,
    ) -> Result<ExtractedMetadata, MetadataExtractionError> {
        if !path.is_file() {
            return Err(MetadataExtractionError::IoError(format!(
                "file not found: {}",
                path.display()
            )));
        }
        let document = lopdf::Document::load(path)
            .map_err(|e| MetadataExtractionError::CorruptedFile(e.to_string()))?;

        let mut metadata = ExtractedMetadata::default();

        if let Some(info) = info_dictionary(&document) {
            metadata.title = string_entry(&document, info, b"Title");
            metadata.authors = string_entry(&document, info, b"Author").map(split_authors);
            metadata.creation_date =
                string_entry(&document, info, b"CreationDate").and_then(|d| parse_pdf_date(&d));
        }

        let pages = document.get_pages();
        metadata.page_count = Some(pages.len() as i32);
        metadata.language = document
            .catalog()
            .ok()
            .and_then(|catalog| catalog.get(b"Lang").ok())
            .and_then(|obj| decode_text_object(&document, obj));

        let preview_pages: Vec<u32> = pages
            .keys()
            .copied()
            .take(PREVIEW_PAGE_LIMIT as usize)
            .collect();
        if !preview_pages.is_empty() {
            match document.extract_text(&preview_pages) {
                Ok(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        metadata.text_preview =
                            Some(trimmed.chars().take(text_preview_chars).collect());
                    }
                }
                Err(e) => {
                    // Preview text is a nice-to-have; the info dictionary
                    // fields still count as a successful extraction.
                    debug!(path = %path.display(), error = %e, "text preview extraction failed");
                }
            }
        }

        Ok(metadata)
    }
}

#[async_trait]
impl MetadataExtractor for PdfMetadataExtractor {
    async fn extract_metadata(
        &self,
        path: &Path,
    ) -> Result<ExtractedMetadata, MetadataExtractionError> {
        let path: PathBuf = path.to_path_buf();
        let budget = self.text_preview_chars;

        tokio::task::spawn_blocking(move || Self::extract_sync(&path, budget))
            .await
            .map_err(|e| MetadataExtractionError::ExtractionFailed(e.to_string()))?
    }
}

fn info_dictionary(document: &lopdf::Document) -> Option<&Dictionary> {
    let info = document.trailer.get(b"Info").ok()?;
    match info {
        Object::Reference(id) => document.get_dictionary(*id).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn string_entry(document: &lopdf::Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key)
        .ok()
        .and_then(|obj| decode_text_object(document, obj))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn decode_text_object(document: &lopdf::Document, object: &Object) -> Option<String> {
    let object = match object {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    let bytes = object.as_str().ok()?;
    Some(decode_pdf_string(bytes))
}

/// PDF text strings are either UTF-16BE with a byte order mark or
/// PDFDocEncoding, which overlaps ASCII for the characters that matter here.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Author fields routinely pack several names into one string, separated by
/// semicolons or commas.
fn split_authors(raw: String) -> Vec<String> {
    let separator = if raw.contains(';') { ';' } else { ',' };
    raw.split(separator)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Parses the `D:YYYYMMDDHHmmSS` prefix of a PDF date, ignoring the trailing
/// timezone suffix. Shorter forms are valid down to `D:YYYY`.
fn parse_pdf_date(raw: &str) -> Option<DateTime<Utc>> {
    let digits: String = raw
        .trim_start_matches("D:")
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(14)
        .collect();

    let padded = match digits.len() {
        4 => format!("{digits}0101000000"),
        6 => format!("{digits}01000000"),
        8 => format!("{digits}000000"),
        10 => format!("{digits}0000"),
        12 => format!("{digits}00"),
        14 => digits,
        _ => return None,
    };

    NaiveDateTime::parse_from_str(&padded, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_full_pdf_date() {
        let parsed = parse_pdf_date("D:20240317093045+02'00'").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), 3);
        assert_eq!(parsed.day(), 17);
        assert_eq!(parsed.hour(), 9);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_parse_short_pdf_dates() {
        let year_only = parse_pdf_date("D:2019").unwrap();
        assert_eq!(year_only.year(), 2019);
        assert_eq!(year_only.month(), 1);

        let day_precision = parse_pdf_date("D:20191231").unwrap();
        assert_eq!(day_precision.day(), 31);
    }

    #[test]
    fn test_parse_rejects_garbage_dates() {
        assert!(parse_pdf_date("D:20").is_none());
        assert!(parse_pdf_date("last tuesday").is_none());
        assert!(parse_pdf_date("").is_none());
    }

    #[test]
    fn test_split_authors_prefers_semicolons() {
        assert_eq!(
            split_authors("Curie, Marie; Meitner, Lise".to_string()),
            vec!["Curie, Marie", "Meitner, Lise"]
        );
        assert_eq!(
            split_authors("A. Turing, J. von Neumann".to_string()),
            vec!["A. Turing", "J. von Neumann"]
        );
        assert_eq!(split_authors("  Solo Author ".to_string()), vec!["Solo Author"]);
    }

    #[test]
    fn test_decode_utf16_string() {
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_pdf_string(&bytes), "Hi");
        assert_eq!(decode_pdf_string(b"plain"), "plain");
    }

    #[tokio::test]
    async fn test_corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4\nnot actually a pdf body").unwrap();

        let extractor = PdfMetadataExtractor::new(1000);
        let err = extractor.extract_metadata(&path).await.unwrap_err();
        assert!(matches!(err, MetadataExtractionError::CorruptedFile(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let extractor = PdfMetadataExtractor::new(1000);
        let err = extractor
            .extract_metadata(Path::new("/nonexistent/file.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, MetadataExtractionError::IoError(_)));
    }
}
