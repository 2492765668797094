use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::FinanceError;
use crate::storage::json_store::write_atomic;

const CONFIG_FILE: &str = "config.json";

/// User-level tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            storage_root: None,
        }
    }
}

/// Loads and saves the tracker configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, FinanceError> {
        let base = dirs::config_dir().ok_or_else(|| {
            FinanceError::InvalidInput("unable to resolve a configuration directory".into())
        })?;
        Self::with_base(base.join("finance_core"))
    }

    pub fn with_base(base: PathBuf) -> Result<Self, FinanceError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the active configuration, falling back to defaults when no file
    /// exists yet.
    pub fn load(&self) -> Result<Config, FinanceError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<(), FinanceError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }
}
