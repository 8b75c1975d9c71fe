//! Errors raised while loading or validating the tracker's settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `QAQC_*` variable failed to parse or has the wrong type.
    #[error("cannot read qaqc settings: {0}")]
    Figment(#[from] figment::Error),

    /// A setting that must name something was left blank.
    #[error("qaqc setting '{field}' is blank; set it in .qaqc/config.toml or {env}")]
    Blank { field: &'static str, env: &'static str },

    /// A setting parsed but is outside its accepted range.
    #[error("qaqc setting '{field}' {reason}")]
    OutOfRange { field: &'static str, reason: String },
}
