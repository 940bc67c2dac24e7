//! Data directory resolution and user settings.
//!
//! The data directory is `SPENDWISE_DATA_DIR` when set, otherwise the
//! platform data directory. `settings.json` inside it is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const DATA_DIR_ENV: &str = "SPENDWISE_DATA_DIR";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Settings {
    /// Suffix printed after every amount.
    #[serde(default = "default_currency")]
    pub(crate) currency: String,

    /// How many categories the dashboard ranks.
    #[serde(default = "default_top_expenses")]
    pub(crate) top_expenses: usize,

    /// Database file name, relative to the data directory.
    #[serde(default = "default_database_file")]
    pub(crate) database_file: String,
}

fn default_currency() -> String {
    "PLN".to_string()
}

fn default_top_expenses() -> usize {
    3
}

fn default_database_file() -> String {
    "spendwise.db".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            top_expenses: default_top_expenses(),
            database_file: default_database_file(),
        }
    }
}

impl Settings {
    /// Read `settings.json` from `data_dir`, falling back to defaults when absent.
    pub(crate) fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    #[cfg(test)]
    pub(crate) fn save(&self, data_dir: &Path) -> Result<()> {
        let path = data_dir.join(SETTINGS_FILE);
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))
    }

    pub(crate) fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }
}

/// Resolve and create the data directory.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let proj_dirs = directories::ProjectDirs::from("com", "spendwise", "Spendwise")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
            proj_dirs.data_dir().to_path_buf()
        }
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir)
}
