//! Client-side form draft persistence.
//!
//! A form's field values are saved under a key derived from the page path
//! and form id, restored on the next visit to the same page and cleared
//! once the form is submitted. The store and the form are both injected,
//! see [`storage::kv::KeyValueStore`] and [`form::accessor::FormAccessor`].

pub mod bootstrap;
pub mod cli;
pub mod draft;
pub mod form;
pub mod storage;
pub mod trace;

pub use draft::draft_model::{Draft, DraftKey, FieldValue, compute_key};
pub use draft::store::{DraftOutcome, DraftStore};
