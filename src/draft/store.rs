use log::{debug, info, warn};

use crate::draft::draft_model::{Draft, DraftKey, compute_key};
use crate::draft::error::DraftError;
use crate::draft::policy::ExclusionPolicy;
use crate::form::accessor::FormAccessor;
use crate::form::form_model::FieldKind;
use crate::form::page::Document;
use crate::storage::kv::KeyValueStore;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{DraftOperation, DraftTraceEvent};

/// What a draft operation did. None of these is an error for the page:
/// every failure leaves the form usable and the draft feature inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftOutcome {
    Saved { fields: usize },
    Restored { applied: usize, skipped: usize },
    Cleared,
    FormMissing,
    NoDraft,
    /// Stored data could not be parsed; treated as no draft
    Malformed(String),
    /// Store read or write failed; nothing changed
    StoreFailed(String),
}

impl DraftOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            DraftOutcome::Saved { .. } => "saved",
            DraftOutcome::Restored { .. } => "restored",
            DraftOutcome::Cleared => "cleared",
            DraftOutcome::FormMissing => "form_missing",
            DraftOutcome::NoDraft => "no_draft",
            DraftOutcome::Malformed(_) => "malformed",
            DraftOutcome::StoreFailed(_) => "store_failed",
        }
    }

    pub fn field_count(&self) -> Option<usize> {
        match self {
            DraftOutcome::Saved { fields } => Some(*fields),
            DraftOutcome::Restored { applied, .. } => Some(*applied),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            DraftOutcome::Malformed(r) | DraftOutcome::StoreFailed(r) => Some(r),
            _ => None,
        }
    }
}

/// Saves, restores and clears form drafts in an injected key-value store.
pub struct DraftStore<S: KeyValueStore> {
    store: S,
    policy: ExclusionPolicy,
    tracer: TraceLogger,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: ExclusionPolicy::default(),
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Draft of `form` as it would be saved right now.
    pub fn snapshot(&self, form: &dyn FormAccessor) -> Draft {
        Draft::from_entries(&form.entries(), &self.policy)
    }

    /// Overwrite the stored draft for `form_id` on the current page.
    pub fn save(&mut self, doc: &dyn Document, form_id: &str) -> DraftOutcome {
        let key = compute_key(doc.path(), form_id);
        let outcome = match doc.form(form_id) {
            None => DraftOutcome::FormMissing,
            Some(form) => {
                let draft = self.snapshot(form);
                match self.write(&key, &draft) {
                    Ok(()) => {
                        info!("Saved form draft {} ({} fields)", key, draft.len());
                        DraftOutcome::Saved {
                            fields: draft.len(),
                        }
                    }
                    Err(e) => {
                        warn!("Could not save form draft {}: {}", key, e);
                        DraftOutcome::StoreFailed(e.to_string())
                    }
                }
            }
        };

        self.trace(DraftOperation::Save, &key, &outcome);
        outcome
    }

    /// Fill `form_id` on the current page from its stored draft, if any.
    /// The draft stays in the store.
    pub fn restore(&self, doc: &mut dyn Document, form_id: &str) -> DraftOutcome {
        let key = compute_key(doc.path(), form_id);
        let outcome = match doc.form_mut(form_id) {
            None => DraftOutcome::FormMissing,
            Some(form) => match self.load_key(&key) {
                Ok(None) => DraftOutcome::NoDraft,
                Ok(Some(draft)) => {
                    let (applied, skipped) = apply(form, &draft);
                    info!(
                        "Restored form draft {} ({} applied, {} skipped)",
                        key, applied, skipped
                    );
                    DraftOutcome::Restored { applied, skipped }
                }
                Err(e) if e.is_malformed() => {
                    warn!("Ignoring malformed form draft {}: {}", key, e);
                    DraftOutcome::Malformed(e.to_string())
                }
                Err(e) => {
                    warn!("Could not read form draft {}: {}", key, e);
                    DraftOutcome::StoreFailed(e.to_string())
                }
            },
        };

        self.trace(DraftOperation::Restore, &key, &outcome);
        outcome
    }

    /// Drop the stored draft for `form_id` on the current page. The form
    /// itself need not be present.
    pub fn clear(&mut self, doc: &dyn Document, form_id: &str) -> DraftOutcome {
        let key = compute_key(doc.path(), form_id);
        let outcome = self.clear_key(&key);
        self.trace(DraftOperation::Clear, &key, &outcome);
        outcome
    }

    pub fn clear_key(&mut self, key: &DraftKey) -> DraftOutcome {
        match self.store.delete(key.as_str()) {
            Ok(()) => {
                info!("Cleared form draft {}", key);
                DraftOutcome::Cleared
            }
            Err(e) => {
                warn!("Could not clear form draft {}: {}", key, e);
                DraftOutcome::StoreFailed(e.to_string())
            }
        }
    }

    /// Stored draft for `form_id` at `path`.
    pub fn load(&self, path: &str, form_id: &str) -> Result<Option<Draft>, DraftError> {
        self.load_key(&compute_key(path, form_id))
    }

    pub fn load_key(&self, key: &DraftKey) -> Result<Option<Draft>, DraftError> {
        match self.store.get(key.as_str())? {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => Draft::from_json(&raw).map(Some),
        }
    }

    pub fn exists(&self, path: &str, form_id: &str) -> bool {
        matches!(self.load(path, form_id), Ok(Some(_)))
    }

    /// Single serialize, single store write.
    fn write(&mut self, key: &DraftKey, draft: &Draft) -> Result<(), DraftError> {
        let json = draft.to_json()?;
        self.store.set(key.as_str(), &json)?;
        Ok(())
    }

    fn trace(&self, operation: DraftOperation, key: &DraftKey, outcome: &DraftOutcome) {
        self.tracer
            .log(&DraftTraceEvent::now(operation, key).with_outcome(outcome));
    }
}

/// Copy `draft` into `form` with per-kind semantics. Returns (applied, skipped).
///
/// Names the form no longer has are skipped. Select fields get a change
/// notification after their value is set.
pub fn apply(form: &mut dyn FormAccessor, draft: &Draft) -> (usize, usize) {
    let mut applied = 0;
    let mut skipped = 0;

    for (name, value) in draft.iter() {
        let Some(kind) = form.field_kind(name) else {
            debug!("Draft field '{}' not in form '{}'", name, form.form_id());
            skipped += 1;
            continue;
        };

        let done = match kind {
            FieldKind::Checkbox => form.set_checked(name, value.checks_checkbox()),
            FieldKind::Radio => form.check_radio(name, &value.as_text()),
            FieldKind::Select => {
                let set = form.set_value(name, &value.as_text());
                form.notify_changed(name);
                set
            }
            _ => form.set_value(name, &value.as_text()),
        };

        if done {
            applied += 1;
        } else {
            skipped += 1;
        }
    }

    (applied, skipped)
}
