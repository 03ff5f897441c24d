use serde::{Deserialize, Serialize};

use crate::form::accessor::FormAccessor;
use crate::form::form_model::HtmlForm;

/// The currently rendered page as seen by draft persistence.
pub trait Document {
    /// Path component of the page URL, e.g. `/devices/edit/214`.
    fn path(&self) -> &str;

    fn form(&self, id: &str) -> Option<&dyn FormAccessor>;

    fn form_mut(&mut self, id: &str) -> Option<&mut dyn FormAccessor>;

    /// Id of the first form carrying the persist marker.
    fn persisted_form_id(&self) -> Option<String>;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    #[serde(default)]
    pub forms: Vec<HtmlForm>,
}

impl Page {
    pub fn new(path: &str) -> Self {
        Page {
            path: path.to_string(),
            forms: Vec::new(),
        }
    }

    pub fn with_form(mut self, form: HtmlForm) -> Self {
        self.forms.push(form);
        self
    }

    pub fn html_form(&self, id: &str) -> Option<&HtmlForm> {
        self.forms.iter().find(|f| f.id == id)
    }

    pub fn html_form_mut(&mut self, id: &str) -> Option<&mut HtmlForm> {
        self.forms.iter_mut().find(|f| f.id == id)
    }
}

impl Document for Page {
    fn path(&self) -> &str {
        &self.path
    }

    fn form(&self, id: &str) -> Option<&dyn FormAccessor> {
        self.html_form(id).map(|f| f as &dyn FormAccessor)
    }

    fn form_mut(&mut self, id: &str) -> Option<&mut dyn FormAccessor> {
        self.html_form_mut(id).map(|f| f as &mut dyn FormAccessor)
    }

    fn persisted_form_id(&self) -> Option<String> {
        self.forms.iter().find(|f| f.persist).map(|f| f.id.clone())
    }
}
