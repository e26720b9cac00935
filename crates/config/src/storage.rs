use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use core_types::PreferenceStore;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PreferencesFile {
    schema_version: u32,
    values: BTreeMap<String, String>,
}

/// File-backed preference storage, the local equivalent of browser
/// `localStorage`: a flat map of string keys to string values.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_values(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let doc: PreferencesFile =
            serde_json::from_str(&text).context("failed to parse preferences json")?;
        Ok(doc.values)
    }

    fn save_values(&self, values: BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let doc = PreferencesFile {
            schema_version: SCHEMA_VERSION,
            values,
        };
        let text = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_values()?.get(key).cloned())
    }

    /// An unreadable file is replaced, so one corrupt write never blocks
    /// later preferences.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = match self.load_values() {
            Ok(values) => values,
            Err(err) => {
                warn!(path = %self.path.display(), "discarding unreadable preferences: {err:#}");
                BTreeMap::new()
            }
        };
        values.insert(key.to_string(), value.to_string());
        self.save_values(values)?;
        info!(key, "preference persisted");
        Ok(())
    }
}

/// In-memory preference storage for non-interactive runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.values.lock().insert(key.into(), value.into());
        storage
    }
}

impl PreferenceStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn default_preferences_path_from(base_dir: &Path) -> PathBuf {
    base_dir.join("preferences.json")
}
