pub mod accessor;
pub mod form_model;
pub mod page;
