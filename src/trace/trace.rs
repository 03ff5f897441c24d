use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::draft::{draft_model::DraftKey, store::DraftOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftOperation {
    Save,
    Restore,
    Clear,
}

/// One JSONL line per draft operation.
#[derive(Debug, Serialize)]
pub struct DraftTraceEvent {
    pub timestamp_ms: u128,
    pub operation: DraftOperation,
    pub key: String,

    pub outcome: Option<String>,
    pub field_count: Option<usize>,
    pub detail: Option<String>,
}

impl DraftTraceEvent {
    pub fn now(operation: DraftOperation, key: &DraftKey) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            operation,
            key: key.to_string(),
            outcome: None,
            field_count: None,
            detail: None,
        }
    }

    pub fn with_outcome(mut self, outcome: &DraftOutcome) -> Self {
        self.outcome = Some(outcome.label().to_string());
        self.field_count = outcome.field_count();
        if let Some(reason) = outcome.reason() {
            self.detail = Some(reason.to_string());
        }
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
