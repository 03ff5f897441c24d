use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::draft::error::DraftError;
use crate::draft::policy::ExclusionPolicy;
use crate::form::accessor::{EntryValue, FormEntry};
use crate::form::form_model::DEFAULT_CHECKED_VALUE;

pub const DRAFT_KEY_PREFIX: &str = "form_draft_";

/// Store key of a draft: `form_draft_<path>_<form id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftKey(pub String);

impl DraftKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key for the form `form_id` on the page at `path`.
///
/// Plain concatenation, no escaping: keys written by earlier versions must
/// stay readable.
pub fn compute_key(path: &str, form_id: &str) -> DraftKey {
    DraftKey(format!("{}{}_{}", DRAFT_KEY_PREFIX, path, form_id))
}

pub fn is_draft_key(key: &str) -> bool {
    key.starts_with(DRAFT_KEY_PREFIX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    /// Whether a checkbox restored from this value ends up checked.
    pub fn checks_checkbox(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => s == DEFAULT_CHECKED_VALUE,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Snapshot of a form's field values, as stored under a [`DraftKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Draft {
    pub fields: BTreeMap<String, FieldValue>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from encoded form entries, dropping what `policy` excludes.
    /// A later entry with the same name replaces an earlier one.
    pub fn from_entries(entries: &[FormEntry], policy: &ExclusionPolicy) -> Self {
        let mut draft = Draft::new();
        for entry in entries.iter().filter(|e| !policy.excludes(e)) {
            if let EntryValue::Text(value) = &entry.value {
                draft.insert(&entry.name, FieldValue::Text(value.clone()));
            }
        }
        draft
    }

    pub fn insert(&mut self, name: &str, value: FieldValue) {
        self.fields.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn to_json(&self) -> Result<String, DraftError> {
        serde_json::to_string(self).map_err(|e| DraftError::Serialize { source: e })
    }

    /// Parse a stored draft.
    ///
    /// The top level must be an object. Strings and booleans are kept,
    /// numbers become their text form, anything else is dropped.
    pub fn from_json(raw: &str) -> Result<Self, DraftError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| DraftError::Parse { source: e })?;

        let object = match value {
            Value::Object(map) => map,
            other => {
                return Err(DraftError::NotAnObject {
                    found: json_kind(&other),
                });
            }
        };

        let mut draft = Draft::new();
        for (name, value) in object {
            match value {
                Value::String(s) => draft.insert(&name, FieldValue::Text(s)),
                Value::Bool(b) => draft.insert(&name, FieldValue::Bool(b)),
                Value::Number(n) => draft.insert(&name, FieldValue::Text(n.to_string())),
                _ => {}
            }
        }
        Ok(draft)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
