//! Application configuration persisted as JSON under the platform data
//! directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    book::RoundingUnit,
    errors::{Result, SiteError},
    utils::persistence::{tmp_path, write_atomic},
};

const CONFIG_FILE: &str = "config.json";

/// User-level settings shared by the CLI and storage layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Overrides the platform data directory when set.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "AppConfig::default_retention")]
    pub backup_retention: usize,
    #[serde(default)]
    pub default_rounding: RoundingUnit,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            backup_retention: 5,
            default_rounding: RoundingUnit::default(),
        }
    }
}

impl AppConfig {
    fn default_retention() -> usize {
        5
    }

    /// Default config file location under the platform data dir.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("site_core")
            .join(CONFIG_FILE)
    }

    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| SiteError::Config(err.to_string()))
    }

    pub fn load_or_default() -> Self {
        Self::load_from(&Self::default_path()).unwrap_or_default()
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).map_err(|err| SiteError::Config(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
