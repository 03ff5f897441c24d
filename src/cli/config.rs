use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::draft::policy::ExclusionPolicy;
use crate::storage::file_store::FileStore;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-draft",
    version,
    about = "Inspect and drive persisted form drafts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-draft.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory holding the per-origin store files
    #[arg(long, global = true)]
    pub store_dir: Option<String>,

    /// Origin whose store is used
    #[arg(long, global = true)]
    pub origin: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the draft of a form described by a JSON file
    Save {
        /// Page path the form lives on, e.g. /devices/edit/214
        #[arg(long)]
        path: String,

        /// Form JSON file
        #[arg(long)]
        form: String,
    },

    /// Apply the stored draft to a form JSON file and print the result
    Restore {
        #[arg(long)]
        path: String,

        #[arg(long)]
        form: String,

        /// Write the restored form here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Remove the stored draft of a form
    Clear {
        #[arg(long)]
        path: String,

        #[arg(long)]
        form_id: String,
    },

    /// Print the stored draft of a form
    Show {
        #[arg(long)]
        path: String,

        #[arg(long)]
        form_id: String,
    },

    /// List all draft keys in the store
    List,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-draft.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: String,

    #[serde(default = "default_origin")]
    pub origin: String,

    /// Byte quota per origin; `null` disables it
    #[serde(default = "default_quota")]
    pub quota_bytes: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            origin: default_origin(),
            quota_bytes: default_quota(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// JSONL trace file; tracing is off when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersistenceConfig {
    /// Field names never persisted, on top of the anti-forgery token
    #[serde(default)]
    pub exclude_fields: Vec<String>,
}

// Serde default helpers
fn default_store_dir() -> String { ".form-drafts".to_string() }
fn default_origin() -> String { "default".to_string() }
fn default_quota() -> Option<usize> { Some(5 * 1024 * 1024) }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-draft.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Settings resolution (merge CLI args with config file)
// ============================================================================

/// Effective settings after CLI flags override the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: String,
    pub origin: String,
    pub quota_bytes: Option<usize>,
    pub trace_path: Option<String>,
    pub exclude_fields: Vec<String>,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    Settings {
        store_dir: cli.store_dir.clone().unwrap_or_else(|| config.store.dir.clone()),
        origin: cli.origin.clone().unwrap_or_else(|| config.store.origin.clone()),
        quota_bytes: config.store.quota_bytes,
        trace_path: config.trace.path.clone(),
        exclude_fields: config.persistence.exclude_fields.clone(),
    }
}

pub fn build_file_store(settings: &Settings) -> FileStore {
    FileStore::open(&settings.store_dir, &settings.origin).with_quota(settings.quota_bytes)
}

pub fn build_policy(settings: &Settings) -> ExclusionPolicy {
    ExclusionPolicy::new().with_excluded_names(settings.exclude_fields.iter().cloned())
}

/// Default `env_logger` filter for a `-v` count.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
