use crate::cli::GlobalFlags;

/// Load layered configuration (with `.env`) and apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<qaqc_config::QaqcConfig> {
    let mut config = qaqc_config::QaqcConfig::load_with_dotenv()?;
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
    }
    Ok(config)
}
