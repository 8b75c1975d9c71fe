//! Database error types for qaqc-db.

use qaqc_core::enums::EntityType;
use qaqc_core::errors::CoreError;
use qaqc_core::runner::RunError;
use thiserror::Error;

/// Errors from database operations and the service built on them.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A process run was aborted.
    #[error(transparent)]
    Run(#[from] RunError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: EntityType, id: &str) -> Self {
        Self::Core(CoreError::NotFound {
            entity_type: entity.as_str().to_string(),
            id: id.to_string(),
        })
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Core(CoreError::validation(message))
    }

    /// Whether this is a missing-entity error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }

    /// Whether a domain rule (not storage) rejected the operation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Core(CoreError::Validation(_)))
    }
}
