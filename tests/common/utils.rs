use form_draft::draft::store::DraftStore;
use form_draft::form::form_model::{FormField, HtmlForm};
use form_draft::form::page::Page;
use form_draft::storage::memory::MemoryStore;

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}

/// Fresh asset form as rendered by the edit page, with defaults only.
pub fn asset_form() -> HtmlForm {
    HtmlForm::new("assetForm")
        .persisted()
        .with_field(FormField::hidden("csrf_token", "tok-123"))
        .with_field(FormField::text("name", ""))
        .with_field(FormField::textarea("notes", ""))
        .with_field(FormField::select(
            "department_id",
            &["", "1", "2", "3"],
            "",
        ))
        .with_field(FormField::radio("condition", "new", true))
        .with_field(FormField::radio("condition", "used", false))
        .with_field(FormField::checkbox("is_active", false))
        .with_field(FormField::file("photo", ""))
}

/// The same form after the user typed into it.
pub fn edited_asset_form() -> HtmlForm {
    HtmlForm::new("assetForm")
        .persisted()
        .with_field(FormField::hidden("csrf_token", "tok-123"))
        .with_field(FormField::text("name", "ThinkPad T14"))
        .with_field(FormField::textarea("notes", "Battery replaced"))
        .with_field(FormField::select(
            "department_id",
            &["", "1", "2", "3"],
            "2",
        ))
        .with_field(FormField::radio("condition", "new", false))
        .with_field(FormField::radio("condition", "used", true))
        .with_field(FormField::checkbox("is_active", true))
        .with_field(FormField::file("photo", "laptop.jpg"))
}

pub fn page_with(path: &str, form: HtmlForm) -> Page {
    Page::new(path).with_form(form)
}

pub fn memory_drafts() -> DraftStore<MemoryStore> {
    DraftStore::new(MemoryStore::new())
}
