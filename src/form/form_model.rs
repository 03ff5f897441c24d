use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::form::accessor::{FieldChange, FormAccessor, FormEntry};

/// Value a checked checkbox or radio encodes as when it has no value attribute.
pub const DEFAULT_CHECKED_VALUE: &str = "on";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Hidden,
    Textarea,
    Password,
    Checkbox,
    Radio,
    Select,
    File,
    Button,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,

    /// Current value; for file fields, the chosen file name
    #[serde(default)]
    pub value: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,

    /// Option values of a select field
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FormField {
    fn new(name: &str, kind: FieldKind, value: &str) -> Self {
        FormField {
            name: name.to_string(),
            kind,
            value: value.to_string(),
            checked: false,
            disabled: false,
            options: Vec::new(),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self::new(name, FieldKind::Text, value)
    }

    pub fn hidden(name: &str, value: &str) -> Self {
        Self::new(name, FieldKind::Hidden, value)
    }

    pub fn textarea(name: &str, value: &str) -> Self {
        Self::new(name, FieldKind::Textarea, value)
    }

    pub fn password(name: &str, value: &str) -> Self {
        Self::new(name, FieldKind::Password, value)
    }

    /// Checkbox without a value attribute; encodes as `"on"` when checked.
    pub fn checkbox(name: &str, checked: bool) -> Self {
        let mut f = Self::new(name, FieldKind::Checkbox, "");
        f.checked = checked;
        f
    }

    pub fn radio(name: &str, value: &str, checked: bool) -> Self {
        let mut f = Self::new(name, FieldKind::Radio, value);
        f.checked = checked;
        f
    }

    pub fn select(name: &str, options: &[&str], value: &str) -> Self {
        let mut f = Self::new(name, FieldKind::Select, value);
        f.options = options.iter().map(|o| o.to_string()).collect();
        f
    }

    pub fn file(name: &str, filename: &str) -> Self {
        Self::new(name, FieldKind::File, filename)
    }

    pub fn button(name: &str, value: &str) -> Self {
        Self::new(name, FieldKind::Button, value)
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// The entry this field contributes to a submission, if any.
    pub fn encode(&self) -> Option<FormEntry> {
        if self.name.is_empty() || self.disabled {
            return None;
        }

        match self.kind {
            FieldKind::Button => None,
            FieldKind::Checkbox | FieldKind::Radio => {
                if !self.checked {
                    return None;
                }
                let value = if self.value.is_empty() {
                    DEFAULT_CHECKED_VALUE
                } else {
                    &self.value
                };
                Some(FormEntry::text(&self.name, value))
            }
            FieldKind::File => Some(FormEntry::file(&self.name, &self.value)),
            _ => Some(FormEntry::text(&self.name, &self.value)),
        }
    }
}

pub type ChangeListener = Box<dyn FnMut(&FieldChange)>;

/// An HTML-like form: an id, the persist marker and its fields in document order.
#[derive(Serialize, Deserialize)]
pub struct HtmlForm {
    pub id: String,

    /// Forms carrying the marker are persisted automatically by the page bootstrap
    #[serde(default)]
    pub persist: bool,

    #[serde(default)]
    pub fields: Vec<FormField>,

    #[serde(skip)]
    listeners: HashMap<String, Vec<ChangeListener>>,
}

impl fmt::Debug for HtmlForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlForm")
            .field("id", &self.id)
            .field("persist", &self.persist)
            .field("fields", &self.fields)
            .field("listeners", &self.listeners.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HtmlForm {
    pub fn new(id: &str) -> Self {
        HtmlForm {
            id: id.to_string(),
            persist: false,
            fields: Vec::new(),
            listeners: HashMap::new(),
        }
    }

    pub fn persisted(mut self) -> Self {
        self.persist = true;
        self
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| f.checked)
    }

    /// Value of the checked radio in group `name`.
    pub fn checked_radio(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name && f.kind == FieldKind::Radio && f.checked)
            .map(|f| f.value.as_str())
    }

    /// Register a listener for synthesized change notifications on `name`.
    pub fn on_change(&mut self, name: &str, listener: impl FnMut(&FieldChange) + 'static) {
        self.listeners
            .entry(name.to_string())
            .or_default()
            .push(Box::new(listener));
    }
}

impl FormAccessor for HtmlForm {
    fn form_id(&self) -> &str {
        &self.id
    }

    fn entries(&self) -> Vec<FormEntry> {
        self.fields.iter().filter_map(FormField::encode).collect()
    }

    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|f| f.kind)
    }

    fn set_value(&mut self, name: &str, value: &str) -> bool {
        let Some(field) = self.field_mut(name) else {
            return false;
        };

        match field.kind {
            // A file input only accepts being reset
            FieldKind::File if !value.is_empty() => false,
            FieldKind::Select
                if !field.options.is_empty() && !field.options.iter().any(|o| o == value) =>
            {
                field.value.clear();
                true
            }
            _ => {
                field.value = value.to_string();
                true
            }
        }
    }

    fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.checked = checked;
                true
            }
            None => false,
        }
    }

    fn check_radio(&mut self, name: &str, value: &str) -> bool {
        let matches = self
            .fields
            .iter()
            .any(|f| f.name == name && f.kind == FieldKind::Radio && f.value == value);
        if !matches {
            return false;
        }

        for field in self
            .fields
            .iter_mut()
            .filter(|f| f.name == name && f.kind == FieldKind::Radio)
        {
            field.checked = field.value == value;
        }
        true
    }

    fn notify_changed(&mut self, name: &str) {
        let change = FieldChange {
            form_id: self.id.clone(),
            name: name.to_string(),
            value: self.value_of(name).unwrap_or_default().to_string(),
        };

        if let Some(listeners) = self.listeners.get_mut(name) {
            for listener in listeners.iter_mut() {
                listener(&change);
            }
        }
    }
}
