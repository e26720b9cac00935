use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod storage;

pub use storage::{LocalStorage, MemoryStorage, default_preferences_path_from};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;
pub const FORM_ENDPOINT_ENV: &str = "PORTFOLIO_FORM_ENDPOINT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactConfig {
    /// HTTP endpoint receiving contact submissions. When unset the
    /// contact form falls back to the user's mail client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Mailto recipient; the profile email is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

impl ContactConfig {
    pub fn endpoint(&self) -> Option<&str> {
        non_blank(self.endpoint.as_deref())
    }

    pub fn recipient(&self) -> Option<&str> {
        non_blank(self.recipient.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub contact: ContactConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            contact: ContactConfig::default(),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides on top of the stored file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(FORM_ENDPOINT_ENV) {
            debug!(env = FORM_ENDPOINT_ENV, "contact endpoint overridden from environment");
            self.contact.endpoint = Some(endpoint);
        }
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("config.json"),
        }
    }

    pub fn from_default_location() -> Result<Self> {
        Ok(Self::from_dir(default_data_dir()?.join("config")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            let config = AppConfig::default();
            self.save(&config)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let mut config: AppConfig =
            serde_json::from_str(&raw).context("failed to parse app config json")?;
        if self.migrate(&mut config) {
            self.save(&config)?;
        }
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let text = serde_json::to_string_pretty(config).context("failed to serialize config")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn migrate(&self, config: &mut AppConfig) -> bool {
        if config.schema_version >= CURRENT_SCHEMA_VERSION {
            return false;
        }

        warn!(
            from = config.schema_version,
            to = CURRENT_SCHEMA_VERSION,
            "migrating app config schema"
        );

        // v0 files stored "" for an unset endpoint.
        if config.contact.endpoint().is_none() {
            config.contact.endpoint = None;
        }
        if config.contact.recipient().is_none() {
            config.contact.recipient = None;
        }
        config.schema_version = CURRENT_SCHEMA_VERSION;
        true
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let mut dir = dirs::data_local_dir().context("failed to resolve data_local_dir")?;
    dir.push("portfolio");
    Ok(dir)
}
