//! # qaqc-config
//!
//! Layered configuration loading for the QA/QC tracker using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QAQC_*` prefix, `__` as separator)
//! 2. Project-level `.qaqc/config.toml`
//! 3. User-level `~/.config/qaqc/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `QAQC_DATABASE__PATH` -> `database.path`,
//! `QAQC_EVALUATION__EQUALITY` -> `evaluation.equality`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use qaqc_config::QaqcConfig;
//!
//! let config = QaqcConfig::load_with_dotenv().expect("config");
//! let policy = config.evaluation.policy();
//! println!("database at {}", config.database.path);
//! # let _ = policy;
//! ```

mod database;
mod error;
mod evaluation;
mod general;

pub use database::{DEFAULT_DATABASE_PATH, DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use evaluation::EvaluationConfig;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QaqcConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl QaqcConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`QaqcConfig::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source fails to parse and
    /// [`ConfigError::OutOfRange`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`QaqcConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`QaqcConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".qaqc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("QAQC_").split("__"))
    }

    /// Reject values that deserialize but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_limit == 0 {
            return Err(ConfigError::OutOfRange {
                field: "general.default_limit",
                reason: "must be at least 1".into(),
            });
        }
        if self.general.page_size == 0 {
            return Err(ConfigError::OutOfRange {
                field: "general.page_size",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("qaqc").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
