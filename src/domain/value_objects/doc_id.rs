use rand::Rng;
use serde::{Deserialize, Serialize};

/// Alphabet for the random portion of generated ids: 0-9a-z.
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_RANDOM_LEN: usize = 12;

pub const DOCUMENT_ID_PREFIX: &str = "DOC";
pub const SECTION_ID_PREFIX: &str = "SEC";

/// Opaque document identifier in the form `{prefix}_{random}`.
///
/// The random portion is sampled from a fixed lowercase-alphanumeric
/// alphabet; ids are treated as opaque tokens, never as sequence numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocId(String);

impl DocId {
    pub fn generate() -> Self {
        Self::generate_with_prefix(DOCUMENT_ID_PREFIX)
    }

    pub fn generate_with_prefix(prefix: &str) -> Self {
        let mut rng = rand::rng();
        let random: String = (0..ID_RANDOM_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(format!("{}_{}", prefix, random))
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DocId> for String {
    fn from(id: DocId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_format() {
        let id = DocId::generate();
        let (prefix, random) = id.as_str().split_once('_').unwrap();
        assert_eq!(prefix, "DOC");
        assert_eq!(random.len(), 12);
        assert!(
            random
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn test_custom_prefix() {
        let id = DocId::generate_with_prefix("SEC");
        assert!(id.as_str().starts_with("SEC_"));
    }

    #[test]
    fn test_ids_are_unique() {
        let first = DocId::generate();
        let second = DocId::generate();
        assert_ne!(first, second);
    }
}
