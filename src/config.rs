//! User configuration
//!
//! Stored in `~/.config/flatdb/config.yaml`. Every field is optional:
//!
//! ```yaml
//! data_dir: /srv/flatdb
//! max_column_width: 40
//! mark_key: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::print::PrintOptions;

/// Configuration that persists across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatDbConfig {
    /// Directory relative table paths resolve against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Column width cap for printed tables
    #[serde(default = "default_max_column_width")]
    pub max_column_width: usize,
    /// Mark the key column header when printing
    #[serde(default = "default_mark_key")]
    pub mark_key: bool,
}

fn default_max_column_width() -> usize {
    40
}

fn default_mark_key() -> bool {
    true
}

impl Default for FlatDbConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            max_column_width: default_max_column_width(),
            mark_key: default_mark_key(),
        }
    }
}

impl FlatDbConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Directory for table files
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(crate::config_paths::default_data_dir)
    }

    /// Resolve a table path: relative paths land in the data dir, and a
    /// missing extension becomes `.mdb`
    pub fn resolve_table_path(&self, path: &Path) -> PathBuf {
        let path = crate::storage::with_table_extension(path);
        if path.is_absolute() {
            path
        } else {
            self.data_dir().join(path)
        }
    }

    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            max_column_width: Some(self.max_column_width),
            mark_key: self.mark_key,
        }
    }
}
