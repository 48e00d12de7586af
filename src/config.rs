// Front-end configuration loaded from YAML

use crate::filter::{PriorityFilter, Query, SortKey, StatusFilter};
use crate::models::Priority;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CONFIG_DIR: &str = "todostore";
const CONFIG_FILE: &str = "todostore.yml";

/// Session defaults; every field may be omitted from the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Status filter used by `list` when none is given
    pub status_filter: StatusFilter,
    /// Priority filter used by `list` when none is given
    pub priority_filter: PriorityFilter,
    /// Sort key used by `list` when none is given
    pub sort_by: SortKey,
    /// Priority for `add` without `--priority`
    pub default_priority: Priority,
    pub color: bool,
    /// One of trace, debug, info, warn, error
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_filter: StatusFilter::All,
            priority_filter: PriorityFilter::All,
            sort_by: SortKey::Created,
            default_priority: Priority::Low,
            color: true,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// used if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(eyre!("Config file not found: {}", path.display()));
            }
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a YAML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context(format!("Failed to read config file {}", path.display()))?;

        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).context(format!("Failed to parse config file {}", path.display()))?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// `<config dir>/todostore/todostore.yml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// The view `list` shows when no overrides are given
    pub fn default_query(&self) -> Query {
        Query::new(self.status_filter, self.priority_filter, self.sort_by)
    }
}
