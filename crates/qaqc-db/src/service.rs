//! Service layer hosting every repository method.
//!
//! `QaqcService` wraps `QaqcDb` (raw database access) and the
//! [`EvaluationPolicy`] that process runs are evaluated under. All repo
//! methods are implemented as `impl QaqcService` blocks in [`crate::repos`].

use qaqc_core::evaluation::EvaluationPolicy;
use qaqc_core::runner::ProcessRunner;

use crate::QaqcDb;
use crate::error::DatabaseError;

pub struct QaqcService {
    db: QaqcDb,
    policy: EvaluationPolicy,
}

impl QaqcService {
    /// Open (or create) a local database and wrap it.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `policy` - Comparison semantics for process runs.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, policy: EvaluationPolicy) -> Result<Self, DatabaseError> {
        let db = QaqcDb::open_local(db_path).await?;
        Ok(Self { db, policy })
    }

    /// Create from an existing `QaqcDb`.
    #[must_use]
    pub const fn from_db(db: QaqcDb, policy: EvaluationPolicy) -> Self {
        Self { db, policy }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &QaqcDb {
        &self.db
    }

    #[must_use]
    pub const fn policy(&self) -> &EvaluationPolicy {
        &self.policy
    }

    /// Replace the evaluation policy for subsequent runs.
    pub const fn set_policy(&mut self, policy: EvaluationPolicy) {
        self.policy = policy;
    }

    pub(crate) const fn runner(&self) -> ProcessRunner {
        ProcessRunner::new(self.policy)
    }
}
