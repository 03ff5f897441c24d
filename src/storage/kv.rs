use std::fmt;

/// Origin-scoped string key-value store that drafts are persisted into.
///
/// Mirrors the browser's `localStorage`: string keys, string values, last
/// write wins. Implementations must make a single `set` visible as a whole
/// or not at all.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    Io { path: String, source: std::io::Error },

    /// Backing file exists but is not a JSON object of strings
    JsonParse { context: String, source: serde_json::Error },

    /// Store contents could not be serialized
    JsonSerialize { context: String, source: serde_json::Error },

    /// Write would grow the store past its byte quota
    QuotaExceeded { key: String, needed: usize, limit: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "Store I/O error on {}: {}", path, source)
            }
            StoreError::JsonParse { context, source } => {
                write!(f, "Store parse error ({}): {}", context, source)
            }
            StoreError::JsonSerialize { context, source } => {
                write!(f, "Store serialize error ({}): {}", context, source)
            }
            StoreError::QuotaExceeded { key, needed, limit } => {
                write!(
                    f,
                    "Quota exceeded writing '{}': {} bytes needed, limit is {}",
                    key, needed, limit
                )
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::JsonParse { source, .. } => Some(source),
            StoreError::JsonSerialize { source, .. } => Some(source),
            StoreError::QuotaExceeded { .. } => None,
        }
    }
}

/// Bytes a set of entries occupies against a quota (keys plus values).
pub fn usage<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> usize {
    entries.map(|(k, v)| k.len() + v.len()).sum()
}
