use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::storage::kv::{KeyValueStore, StoreError, usage};

/// Persistent store scoped to one origin: a single JSON object file per
/// origin under a base directory.
///
/// Every operation re-reads the file, so two handles on the same origin
/// behave like two browser tabs sharing `localStorage`: whichever writes
/// last wins, nothing is merged.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStore {
    /// Open (without creating) the store file for `origin` under `dir`.
    pub fn open(dir: impl AsRef<Path>, origin: &str) -> Self {
        let file_name = format!("{}.json", sanitize_origin(origin));
        Self {
            path: dir.as_ref().join(file_name),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, limit: Option<usize>) -> Self {
        self.quota_bytes = limit;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path_str(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::JsonParse {
            context: self.path_str(),
            source: e,
        })
    }

    /// Write the full map through a sibling temp file and rename it into
    /// place, so readers never observe a half-written store.
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::JsonSerialize {
            context: self.path_str(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| StoreError::Io {
            path: tmp.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io {
            path: self.path_str(),
            source: e,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;

        if let Some(limit) = self.quota_bytes {
            let others = usage(entries.iter().filter(|(k, _)| k.as_str() != key));
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.read_all()?.into_keys().collect())
    }
}

/// Turn an origin like `https://inventory.local:8443` into a safe file stem.
pub fn sanitize_origin(origin: &str) -> String {
    let stem: String = origin
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .to_lowercase();

    if stem.is_empty() { "default".to_string() } else { stem }
}
