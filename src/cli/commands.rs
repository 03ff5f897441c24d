use crate::cli::config::{Settings, build_file_store, build_policy};
use crate::draft::draft_model::{compute_key, is_draft_key};
use crate::draft::store::{DraftOutcome, DraftStore};
use crate::form::form_model::HtmlForm;
use crate::form::page::Page;
use crate::storage::file_store::FileStore;
use crate::storage::kv::KeyValueStore;
use crate::trace::logger::TraceLogger;

// ============================================================================
// save subcommand
// ============================================================================

pub fn cmd_save(
    settings: &Settings,
    path: &str,
    form_file: &str,
) -> Result<DraftOutcome, Box<dyn std::error::Error>> {
    let form = load_form(form_file)?;
    let form_id = form.id.clone();
    let page = Page::new(path).with_form(form);

    let mut drafts = open_drafts(settings);
    let outcome = drafts.save(&page, &form_id);

    println!("{}: {}", compute_key(path, &form_id), describe(&outcome));
    Ok(outcome)
}

// ============================================================================
// restore subcommand
// ============================================================================

pub fn cmd_restore(
    settings: &Settings,
    path: &str,
    form_file: &str,
    output: Option<&str>,
) -> Result<DraftOutcome, Box<dyn std::error::Error>> {
    let form = load_form(form_file)?;
    let form_id = form.id.clone();
    let mut page = Page::new(path).with_form(form);

    let drafts = open_drafts(settings);
    let outcome = drafts.restore(&mut page, &form_id);
    eprintln!("{}: {}", compute_key(path, &form_id), describe(&outcome));

    let restored = page
        .html_form(&form_id)
        .ok_or_else(|| format!("form '{}' vanished from page", form_id))?;
    let json = serde_json::to_string_pretty(restored)?;

    match output {
        Some(out) => std::fs::write(out, &json)?,
        None => println!("{}", json),
    }

    Ok(outcome)
}

// ============================================================================
// clear / show / list subcommands
// ============================================================================

pub fn cmd_clear(
    settings: &Settings,
    path: &str,
    form_id: &str,
) -> Result<DraftOutcome, Box<dyn std::error::Error>> {
    let mut drafts = open_drafts(settings);
    let outcome = drafts.clear(&Page::new(path), form_id);

    println!("{}: {}", compute_key(path, form_id), describe(&outcome));
    Ok(outcome)
}

/// Print the stored draft. Unlike `restore`, a malformed entry is reported as an error.
pub fn cmd_show(
    settings: &Settings,
    path: &str,
    form_id: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let drafts = open_drafts(settings);

    match drafts.load(path, form_id)? {
        Some(draft) => {
            println!("{}", serde_json::to_string_pretty(&draft)?);
            Ok(true)
        }
        None => {
            eprintln!("No draft stored under {}", compute_key(path, form_id));
            Ok(false)
        }
    }
}

pub fn cmd_list(settings: &Settings) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let store = build_file_store(settings);
    let keys: Vec<String> = store.keys()?.into_iter().filter(|k| is_draft_key(k)).collect();

    for key in &keys {
        println!("{}", key);
    }
    Ok(keys)
}

// ============================================================================
// Helpers
// ============================================================================

pub fn open_drafts(settings: &Settings) -> DraftStore<FileStore> {
    let tracer = match &settings.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    DraftStore::new(build_file_store(settings))
        .with_policy(build_policy(settings))
        .with_tracer(tracer)
}

/// Read an `HtmlForm` from a JSON file.
pub fn load_form(path: &str) -> Result<HtmlForm, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let form: HtmlForm = serde_json::from_str(&content)?;
    Ok(form)
}

/// Human-readable one-liner for an outcome.
pub fn describe(outcome: &DraftOutcome) -> String {
    match outcome {
        DraftOutcome::Saved { fields } => format!("saved {} fields", fields),
        DraftOutcome::Restored { applied, skipped } => {
            format!("restored {} fields ({} skipped)", applied, skipped)
        }
        DraftOutcome::Cleared => "cleared".to_string(),
        DraftOutcome::FormMissing => "form not found".to_string(),
        DraftOutcome::NoDraft => "no draft stored".to_string(),
        DraftOutcome::Malformed(reason) => format!("stored draft ignored: {}", reason),
        DraftOutcome::StoreFailed(reason) => format!("store unavailable: {}", reason),
    }
}
