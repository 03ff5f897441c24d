use serde::{Deserialize, Serialize};

use crate::form::form_model::FieldKind;

/// One name/value pair of a form's encoded submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
    pub name: String,
    pub value: EntryValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    Text(String),
    /// Binary payload of a file input; only the chosen file name is known here
    File { filename: String },
}

impl EntryValue {
    pub fn is_file(&self) -> bool {
        matches!(self, EntryValue::File { .. })
    }
}

impl FormEntry {
    pub fn text(name: &str, value: &str) -> Self {
        FormEntry {
            name: name.to_string(),
            value: EntryValue::Text(value.to_string()),
        }
    }

    pub fn file(name: &str, filename: &str) -> Self {
        FormEntry {
            name: name.to_string(),
            value: EntryValue::File {
                filename: filename.to_string(),
            },
        }
    }
}

/// Notification delivered to change listeners after a synthesized change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub form_id: String,
    pub name: String,
    pub value: String,
}

/// Capability the draft store uses to read and fill a live form.
///
/// Field lookups by name resolve to the first field carrying that name,
/// except `check_radio`, which searches the whole radio group.
pub trait FormAccessor {
    fn form_id(&self) -> &str;

    /// Form-encoded snapshot of the current field values, in field order.
    fn entries(&self) -> Vec<FormEntry>;

    fn field_kind(&self, name: &str) -> Option<FieldKind>;

    /// Returns false when no field carries `name`.
    fn set_value(&mut self, name: &str, value: &str) -> bool;

    fn set_checked(&mut self, name: &str, checked: bool) -> bool;

    /// Check the radio of group `name` whose value is `value`.
    /// Returns false, leaving the group untouched, when no option matches.
    fn check_radio(&mut self, name: &str, value: &str) -> bool;

    /// Synthesize a change notification for `name` so dependent UI reacts.
    fn notify_changed(&mut self, name: &str);
}
