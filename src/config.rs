//! Persistent settings
//!
//! Stored as JSON under the user config directory. A missing or corrupt file
//! never stops a run: defaults are used and a warning is logged.

use crate::error::{IdMatchError, Result};
use laptop_id_common::DiskPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Worksheet read from remote catalogs unless configured otherwise.
pub const DEFAULT_WORKSHEET: &str = "Raw Date";
/// Two-line settings file of older installations (catalog, output dir).
pub const LEGACY_CONFIG_FILE: &str = "config.cfg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Last catalog locator (path or URL).
    pub catalog_source: Option<String>,
    /// Last output directory.
    pub output_dir: Option<PathBuf>,
    pub worksheet: String,
    /// Bearer token file for remote catalogs.
    pub credentials: Option<PathBuf>,
    pub disk_policy: DiskPolicy,
    /// Where the cleaned catalog CSV dump goes; working directory if unset.
    pub catalog_dump_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_source: None,
            output_dir: None,
            worksheet: DEFAULT_WORKSHEET.to_string(),
            credentials: None,
            disk_policy: DiskPolicy::default(),
            catalog_dump_dir: None,
        }
    }
}

impl Config {
    /// Loads the user config, falling back to the legacy file, then defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            Ok(_) => Self::load_legacy(Path::new(LEGACY_CONFIG_FILE)).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "config directory unavailable, using defaults");
                Self::default()
            }
        }
    }

    /// Reads a JSON config file; any failure yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(IdMatchError::from)
            .and_then(|content| Ok(serde_json::from_str::<Config>(&content)?));
        match parsed {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// Imports the two-line legacy file: catalog locator, then output directory.
    pub fn load_legacy(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let mut lines = content.lines().map(str::trim);
        let non_empty = |line: Option<&str>| line.filter(|l| !l.is_empty()).map(str::to_string);

        let config = Self {
            catalog_source: non_empty(lines.next()),
            output_dir: non_empty(lines.next()).map(PathBuf::from),
            ..Self::default()
        };
        tracing::info!(path = %path.display(), "imported legacy settings");
        Some(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| IdMatchError::Config("no config directory found".into()))?;
        Ok(base.join("laptop-id").join("config.json"))
    }

    /// Remembers the locations of a successful run.
    pub fn remember_run(&mut self, catalog: &str, output_dir: &Path) {
        self.catalog_source = Some(catalog.to_string());
        self.output_dir = Some(output_dir.to_path_buf());
    }

    /// Directory for the catalog dump.
    pub fn dump_dir(&self) -> PathBuf {
        self.catalog_dump_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
