use log::debug;

use crate::draft::store::{DraftOutcome, DraftStore};
use crate::form::page::Document;
use crate::storage::kv::KeyValueStore;

/// Page lifecycle events the bootstrap reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Page finished loading, before any user interaction
    Loaded,
    /// A form was submitted successfully
    Submitted { form_id: String },
    /// A "save state" link was clicked, just before it navigates away
    SaveStateLinkClicked,
}

/// Wires the draft store to the page lifecycle for the form carrying the
/// persist marker: restore on load, save before a save-state link
/// navigates, clear on submit. Unmarked forms are left alone.
pub struct FormPersistence<S: KeyValueStore> {
    drafts: DraftStore<S>,
}

impl<S: KeyValueStore> FormPersistence<S> {
    pub fn new(drafts: DraftStore<S>) -> Self {
        Self { drafts }
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn drafts_mut(&mut self) -> &mut DraftStore<S> {
        &mut self.drafts
    }

    /// Returns `None` when the event does not concern a persisted form.
    pub fn handle(&mut self, doc: &mut dyn Document, event: &PageEvent) -> Option<DraftOutcome> {
        match event {
            PageEvent::Loaded => self.on_page_load(doc),
            PageEvent::Submitted { form_id } => self.on_submit(&*doc, form_id),
            PageEvent::SaveStateLinkClicked => self.on_save_state_link(&*doc),
        }
    }

    pub fn on_page_load(&self, doc: &mut dyn Document) -> Option<DraftOutcome> {
        let form_id = doc.persisted_form_id()?;
        Some(self.drafts.restore(doc, &form_id))
    }

    pub fn on_submit(&mut self, doc: &dyn Document, form_id: &str) -> Option<DraftOutcome> {
        let persisted = doc.persisted_form_id()?;
        if persisted != form_id {
            debug!("Submit of unmarked form '{}' leaves drafts alone", form_id);
            return None;
        }
        Some(self.drafts.clear(doc, &persisted))
    }

    pub fn on_save_state_link(&mut self, doc: &dyn Document) -> Option<DraftOutcome> {
        let form_id = doc.persisted_form_id()?;
        Some(self.drafts.save(doc, &form_id))
    }
}
