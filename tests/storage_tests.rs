use form_draft::draft::store::{DraftOutcome, DraftStore};
use form_draft::form::form_model::{FormField, HtmlForm};
use form_draft::storage::file_store::{FileStore, sanitize_origin};
use form_draft::storage::kv::{KeyValueStore, StoreError};
use form_draft::storage::memory::MemoryStore;

use crate::common::utils::{asset_form, edited_asset_form, page_with};

mod common;

// =========================================================================
// MemoryStore
// =========================================================================

#[test]
fn memory_store_basic_operations() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "v1").unwrap();
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    assert_eq!(store.len(), 1);

    store.delete("k").unwrap();
    store.delete("k").unwrap();
    assert!(store.is_empty());
}

#[test]
fn memory_store_quota_counts_keys_and_values() {
    let mut store = MemoryStore::with_quota(10);
    store.set("ab", "cdef").unwrap(); // 6 bytes

    match store.set("gh", "ijkl") {
        Err(StoreError::QuotaExceeded { needed, limit, .. }) => {
            assert_eq!(needed, 12);
            assert_eq!(limit, 10);
        }
        other => panic!("Expected QuotaExceeded, got {:?}", other),
    }

    // Replacing an existing key only counts the new value
    store.set("ab", "cdefghij").unwrap();
    assert_eq!(store.keys().unwrap(), vec!["ab".to_string()]);
}

// =========================================================================
// FileStore
// =========================================================================

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = FileStore::open(dir.path(), "http://inventory.local");
        store.set("form_draft_/p_f", r#"{"a":"1"}"#).unwrap();
    }

    let store = FileStore::open(dir.path(), "http://inventory.local");
    assert_eq!(store.get("form_draft_/p_f").unwrap().as_deref(), Some(r#"{"a":"1"}"#));
    assert!(store.path().ends_with("http___inventory.local.json"));
}

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path().join("not-yet"), "o");

    assert_eq!(store.get("x").unwrap(), None);
    assert!(store.keys().unwrap().is_empty());
    store.delete("x").unwrap();
    assert!(!store.path().exists(), "Deleting from an empty store writes nothing");
}

#[test]
fn file_store_origins_are_isolated() {
    let dir = tempfile::tempdir().unwrap();
    let mut a = FileStore::open(dir.path(), "https://a.example");
    let b = FileStore::open(dir.path(), "https://b.example");

    a.set("k", "v").unwrap();
    assert_eq!(b.get("k").unwrap(), None);
}

#[test]
fn file_store_two_handles_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let mut tab_one = DraftStore::new(FileStore::open(dir.path(), "o"));
    let mut tab_two = DraftStore::new(FileStore::open(dir.path(), "o"));

    let one = HtmlForm::new("assetForm").with_field(FormField::text("name", "from tab one"));
    let two = HtmlForm::new("assetForm").with_field(FormField::text("name", "from tab two"));
    tab_one.save(&page_with("/edit/214", one), "assetForm");
    tab_two.save(&page_with("/edit/214", two), "assetForm");

    let mut page = page_with(
        "/edit/214",
        HtmlForm::new("assetForm").with_field(FormField::text("name", "")),
    );
    tab_one.restore(&mut page, "assetForm");
    assert_eq!(
        page.html_form("assetForm").unwrap().value_of("name"),
        Some("from tab two")
    );
}

#[test]
fn file_store_corrupt_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path(), "o");
    std::fs::write(store.path(), "definitely not json").unwrap();

    assert!(matches!(store.get("k"), Err(StoreError::JsonParse { .. })));
}

#[test]
fn corrupt_store_file_does_not_break_restore() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path(), "o");
    std::fs::write(store.path(), "[[[").unwrap();
    let drafts = DraftStore::new(store);

    let mut page = page_with("/p", asset_form());
    let outcome = drafts.restore(&mut page, "assetForm");
    assert!(matches!(outcome, DraftOutcome::StoreFailed(_)), "got {:?}", outcome);
    assert_eq!(page.html_form("assetForm").unwrap().value_of("name"), Some(""));
}

#[test]
fn file_store_quota_rejects_oversized_draft() {
    let dir = tempfile::tempdir().unwrap();
    let mut drafts = DraftStore::new(FileStore::open(dir.path(), "o").with_quota(Some(32)));

    let outcome = drafts.save(&page_with("/devices/edit/214", edited_asset_form()), "assetForm");
    assert!(matches!(outcome, DraftOutcome::StoreFailed(_)));
    assert!(drafts.store().keys().unwrap().is_empty());
}

#[test]
fn file_store_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::open(dir.path(), "o");
    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    store.delete("a").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["o.json".to_string()]);
    assert_eq!(store.keys().unwrap(), vec!["b".to_string()]);
}

#[test]
fn sanitize_origin_produces_safe_stems() {
    assert_eq!(sanitize_origin("https://Inventory.Local:8443"), "https___inventory.local_8443");
    assert_eq!(sanitize_origin("a/b\\c"), "a_b_c");
    assert_eq!(sanitize_origin(""), "default");
}
