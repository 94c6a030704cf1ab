use std::{env, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".agenda_core";
const HOME_OVERRIDE_VAR: &str = "AGENDA_CORE_HOME";

/// Filesystem configuration for the snapshot store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Resolves the data directory, honoring the `AGENDA_CORE_HOME` override.
    pub fn from_env() -> Self {
        if let Some(custom) = env::var_os(HOME_OVERRIDE_VAR) {
            return Self {
                data_dir: PathBuf::from(custom),
            };
        }
        Self::default()
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(DEFAULT_DIR_NAME),
        }
    }
}
