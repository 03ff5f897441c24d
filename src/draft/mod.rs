pub mod draft_model;
pub mod error;
pub mod policy;
pub mod store;
