use anyhow::Context;
use qaqc_config::QaqcConfig;
use qaqc_db::service::QaqcService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: QaqcService,
    pub config: QaqcConfig,
}

impl AppContext {
    /// Open the configured database, creating its directory when needed.
    pub async fn init(config: QaqcConfig) -> anyhow::Result<Self> {
        let db_path = config.database.require_path()?;

        if !config.database.is_in_memory()
            && let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let service = QaqcService::new_local(&db_path.to_string_lossy(), config.evaluation.policy())
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;
        tracing::debug!(path = %db_path.display(), "database opened");

        Ok(Self { service, config })
    }
}
