use std::fmt;

use crate::storage::kv::StoreError;

#[derive(Debug)]
pub enum DraftError {
    /// Stored draft is not valid JSON
    Parse { source: serde_json::Error },

    /// Stored draft is valid JSON but not a flat object
    NotAnObject { found: &'static str },

    /// Draft could not be serialized for writing
    Serialize { source: serde_json::Error },

    /// Backing key-value store failed
    Store(StoreError),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::Parse { source } => {
                write!(f, "Malformed draft JSON: {}", source)
            }
            DraftError::NotAnObject { found } => {
                write!(f, "Malformed draft: expected a JSON object, found {}", found)
            }
            DraftError::Serialize { source } => {
                write!(f, "Draft serialize error: {}", source)
            }
            DraftError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DraftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DraftError::Parse { source } => Some(source),
            DraftError::Serialize { source } => Some(source),
            DraftError::Store(e) => Some(e),
            DraftError::NotAnObject { .. } => None,
        }
    }
}

impl From<StoreError> for DraftError {
    fn from(e: StoreError) -> Self {
        DraftError::Store(e)
    }
}

impl DraftError {
    /// True when the stored data itself is unusable, as opposed to the store failing.
    pub fn is_malformed(&self) -> bool {
        matches!(self, DraftError::Parse { .. } | DraftError::NotAnObject { .. })
    }
}
