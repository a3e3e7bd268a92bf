//! Global repeatcal configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{RepeatCalError, RepeatCalResult};
use crate::recurrence::MAX_OCCURRENCES;

static DEFAULT_DATA_FILE: &str = "~/.local/share/repeatcal/events.json";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_max_occurrences() -> usize {
    MAX_OCCURRENCES
}

/// Configuration at ~/.config/repeatcal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RepeatCalConfig {
    /// JSON file holding stored events.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Cap on occurrences a single recurring event may expand into.
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences: usize,
}

impl Default for RepeatCalConfig {
    fn default() -> Self {
        RepeatCalConfig {
            data_file: default_data_file(),
            max_occurrences: default_max_occurrences(),
        }
    }
}

impl RepeatCalConfig {
    pub fn config_path() -> RepeatCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RepeatCalError::Config("Could not determine config directory".into()))?
            .join("repeatcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented-out default file
    /// on first use.
    pub fn load() -> RepeatCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> RepeatCalResult<Self> {
        let config: RepeatCalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| RepeatCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RepeatCalError::Config(e.to_string()))?;

        if config.max_occurrences == 0 {
            return Err(RepeatCalError::Config(
                "max_occurrences must be greater than 0".into(),
            ));
        }

        Ok(config)
    }

    /// The data file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn save(&self, path: &Path) -> RepeatCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RepeatCalError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| RepeatCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RepeatCalResult<()> {
        let contents = format!(
            "\
# repeatcal configuration

# Where events are stored:
# data_file = \"{}\"

# Maximum number of occurrences one recurring event may produce:
# max_occurrences = {}
",
            DEFAULT_DATA_FILE, MAX_OCCURRENCES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RepeatCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RepeatCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
