//! Local libSQL database location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Path opened when none is configured.
pub const DEFAULT_DATABASE_PATH: &str = ".qaqc/qaqc.db";

/// Special path for a throwaway in-memory database.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file, relative to the working directory, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.path.trim().is_empty()
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// The database path, or an error when it was configured empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Blank`] for a blank path.
    pub fn require_path(&self) -> Result<PathBuf, ConfigError> {
        if self.is_configured() {
            Ok(PathBuf::from(&self.path))
        } else {
            Err(ConfigError::Blank {
                field: "database.path",
                env: "QAQC_DATABASE__PATH",
            })
        }
    }
}
