//! # qaqc-db
//!
//! libSQL persistence for the QA/QC tracker.
//!
//! Stores projects, events, document types, documents, questionnaires,
//! questions and QA/QC processes with their per-question results. The
//! [`service::QaqcService`] wraps the database and hosts every repository
//! method, including the two process triggers (create and rerun).
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct QaqcDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl QaqcDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let qaqc_db = Self { db, conn };
        qaqc_db.run_migrations().await?;
        Ok(qaqc_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"prc-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> QaqcDb {
        QaqcDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "projects",
            "events",
            "document_types",
            "documents",
            "questionnaires",
            "questions",
            "qaqc_processes",
            "results",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("prc").await.unwrap();
        assert!(id.starts_with("prc-"), "ID should start with 'prc-': {id}");
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in qaqc_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(qaqc_core::ids::has_prefix(&id, prefix));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("res").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qaqc.db");
        let path = path.to_str().unwrap();

        {
            let db = QaqcDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO document_types (id, name) VALUES ('dty-t1', 'Drilling Log')",
                    (),
                )
                .await
                .unwrap();
        }

        let reopened = QaqcDb::open_local(path).await.unwrap();
        let mut rows = reopened
            .conn()
            .query("SELECT name FROM document_types WHERE id = 'dty-t1'", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "Drilling Log");
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn question_operand_check_constraint() {
        let db = test_db().await;
        db.conn()
            .execute_batch(
                "INSERT INTO questionnaires (id, name) VALUES ('qnr-t1', 'QC');
                 INSERT INTO document_types (id, name) VALUES ('dty-t1', 'Drilling Log');",
            )
            .await
            .unwrap();

        let both = db
            .conn()
            .execute(
                "INSERT INTO questions (id, questionnaire_id, position, document_1_id, property_1,
                     relation, document_2_id, property_2, comparison_value)
                 VALUES ('qst-t1', 'qnr-t1', 0, 'dty-t1', 'Depth', 'Equals',
                     'dty-t1', 'Depth', '10')",
                (),
            )
            .await;
        assert!(both.is_err(), "both right operands must be rejected");

        let neither = db
            .conn()
            .execute(
                "INSERT INTO questions
                     (id, questionnaire_id, position, document_1_id, property_1, relation)
                 VALUES ('qst-t2', 'qnr-t1', 0, 'dty-t1', 'Depth', 'Equals')",
                (),
            )
            .await;
        assert!(neither.is_err(), "missing right operand must be rejected");
    }
}
