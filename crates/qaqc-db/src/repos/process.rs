//! QA/QC process repository: the create and rerun triggers.
//!
//! Both triggers read a snapshot (questions, the event's documents, the
//! document type catalog) inside one read transaction, evaluate it with the
//! service's runner, and write the process with all of its results in a
//! second transaction.

use chrono::Utc;
use qaqc_core::entities::{Document, DocumentType, QaqcProcess, Question, QuestionResult};
use qaqc_core::enums::{EntityType, Verdict};
use qaqc_core::ids::{PREFIX_PROCESS, PREFIX_RESULT};
use qaqc_core::runner::RunOutcome;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::service::QaqcService;

const SELECT_COLS: &str = "id, name, description, time, event_id, questionnaire_id, result";
const RESULT_COLS: &str = "id, process_id, question_id, status, comment, reason";

fn row_to_process(row: &libsql::Row) -> Result<QaqcProcess, DatabaseError> {
    Ok(QaqcProcess {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        time: parse_datetime(&row.get::<String>(3)?)?,
        event_id: row.get(4)?,
        questionnaire_id: row.get(5)?,
        result: parse_enum(&row.get::<String>(6)?)?,
        results: Vec::new(),
    })
}

fn row_to_result(row: &libsql::Row) -> Result<QuestionResult, DatabaseError> {
    Ok(QuestionResult {
        id: row.get(0)?,
        process_id: row.get(1)?,
        question_id: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        comment: row.get(4)?,
        reason: get_opt_string(row, 5)?
            .map(|s| parse_enum(&s))
            .transpose()?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProcess {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub event_id: String,
    pub questionnaire_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessFilter {
    pub event_id: Option<String>,
    pub questionnaire_id: Option<String>,
    pub result: Option<Verdict>,
    pub limit: Option<u32>,
}

async fn insert_results(
    conn: &libsql::Connection,
    results: &[QuestionResult],
) -> Result<(), DatabaseError> {
    for (ordinal, result) in results.iter().enumerate() {
        let ordinal = i64::try_from(ordinal)
            .map_err(|_| DatabaseError::InvalidState("result ordinal overflow".into()))?;
        conn.execute(
            &format!(
                "INSERT INTO results ({RESULT_COLS}, ordinal) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            libsql::params![
                result.id.as_str(),
                result.process_id.as_str(),
                result.question_id.as_str(),
                result.status.as_str(),
                result.comment.as_str(),
                result.reason.map(|r| r.as_str()),
                ordinal
            ],
        )
        .await?;
    }
    Ok(())
}

/// Everything one evaluation reads, taken at a single point in time.
struct Snapshot {
    questions: Vec<Question>,
    documents: Vec<Document>,
    catalog: Vec<DocumentType>,
}

impl QaqcService {
    /// Read the questions, the event's documents and the document type
    /// catalog for `event_id` x `questionnaire_id`.
    async fn read_snapshot(
        &self,
        event_id: &str,
        questionnaire_id: &str,
    ) -> Result<Snapshot, DatabaseError> {
        let event = self.get_event(event_id).await?;
        let questionnaire = self.get_questionnaire(questionnaire_id).await?;

        if !questionnaire.applies_to(&event.event_types) {
            let scope = questionnaire
                .event_type
                .map_or_else(String::new, |t| t.to_string());
            return Err(DatabaseError::validation(format!(
                "questionnaire '{}' is for {scope} events; event '{}' has no {scope} type",
                questionnaire.name, event.name
            )));
        }

        let questions = self.list_questions(questionnaire_id).await?;
        if questions.is_empty() {
            return Err(DatabaseError::validation(format!(
                "questionnaire '{}' has no questions",
                questionnaire.name
            )));
        }
        Ok(Snapshot {
            questions,
            documents: self.list_documents(event_id).await?,
            catalog: self.list_document_types().await?,
        })
    }

    /// Load the snapshot for `event_id` x `questionnaire_id` and evaluate it.
    ///
    /// The reads share one transaction, so a concurrent edit lands either
    /// wholly before or wholly after the snapshot. It is committed before the
    /// caller opens its write transaction.
    async fn evaluate_process(
        &self,
        event_id: &str,
        questionnaire_id: &str,
    ) -> Result<RunOutcome, DatabaseError> {
        let tx = self.db().conn().transaction().await?;
        let snapshot = self.read_snapshot(event_id, questionnaire_id).await?;
        tx.commit().await?;

        let outcome = self
            .runner()
            .run(&snapshot.questions, &snapshot.documents, &snapshot.catalog)?;
        for result in &outcome.results {
            tracing::debug!(
                question = %result.question_id,
                status = %result.status,
                reason = ?result.reason,
                comment = %result.comment,
                "question evaluated"
            );
        }
        Ok(outcome)
    }

    /// Give each outcome a result id under `process_id`.
    async fn assign_result_ids(
        &self,
        process_id: &str,
        outcome: RunOutcome,
    ) -> Result<Vec<QuestionResult>, DatabaseError> {
        let mut results = Vec::with_capacity(outcome.results.len());
        for item in outcome.results {
            results.push(QuestionResult {
                id: self.db().generate_id(PREFIX_RESULT).await?,
                process_id: process_id.to_string(),
                question_id: item.question_id,
                status: item.status,
                comment: item.comment,
                reason: item.reason,
            });
        }
        Ok(results)
    }

    /// Create a process: evaluate once and persist it with its results.
    ///
    /// Nothing is stored when validation fails or the run is aborted.
    pub async fn create_process(&self, new: NewProcess) -> Result<QaqcProcess, DatabaseError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(DatabaseError::validation("process name is required"));
        }

        let outcome = self
            .evaluate_process(&new.event_id, &new.questionnaire_id)
            .await?;
        let result = outcome.result;
        let failed = outcome.failed_count();

        let id = self.db().generate_id(PREFIX_PROCESS).await?;
        let results = self.assign_result_ids(&id, outcome).await?;
        let now = Utc::now();

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            &format!(
                "INSERT INTO qaqc_processes ({SELECT_COLS}, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ),
            libsql::params![
                id.as_str(),
                name,
                new.description.as_str(),
                format_datetime(&now),
                new.event_id.as_str(),
                new.questionnaire_id.as_str(),
                result.as_str(),
                format_datetime(&now)
            ],
        )
        .await?;
        insert_results(&tx, &results).await?;
        tx.commit().await?;

        tracing::info!(
            process = %id,
            event = %new.event_id,
            questionnaire = %new.questionnaire_id,
            result = %result,
            questions = results.len(),
            failed,
            "qaqc process created"
        );

        Ok(QaqcProcess {
            id,
            name: name.to_string(),
            description: new.description,
            time: now,
            event_id: new.event_id,
            questionnaire_id: new.questionnaire_id,
            result,
            results,
        })
    }

    /// Re-evaluate against current documents and questions, replacing the
    /// results, verdict and time. The process id is kept.
    pub async fn rerun_process(&self, process_id: &str) -> Result<QaqcProcess, DatabaseError> {
        let process = self.get_process_header(process_id).await?;
        let outcome = self
            .evaluate_process(&process.event_id, &process.questionnaire_id)
            .await?;
        let result = outcome.result;
        let failed = outcome.failed_count();
        let results = self.assign_result_ids(process_id, outcome).await?;
        let now = Utc::now();

        let tx = self.db().conn().transaction().await?;
        tx.execute("DELETE FROM results WHERE process_id = ?1", [process_id])
            .await?;
        insert_results(&tx, &results).await?;
        tx.execute(
            "UPDATE qaqc_processes SET result = ?1, time = ?2 WHERE id = ?3",
            libsql::params![result.as_str(), format_datetime(&now), process_id],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            process = %process_id,
            previous = %process.result,
            result = %result,
            questions = results.len(),
            failed,
            "qaqc process re-run"
        );

        Ok(QaqcProcess {
            time: now,
            result,
            results,
            ..process
        })
    }

    async fn get_process_header(&self, id: &str) -> Result<QaqcProcess, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM qaqc_processes WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Process, id))?;
        row_to_process(&row)
    }

    async fn list_results(&self, process_id: &str) -> Result<Vec<QuestionResult>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {RESULT_COLS} FROM results WHERE process_id = ?1 ORDER BY ordinal"
                ),
                [process_id],
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_result(&row)?);
        }
        Ok(results)
    }

    /// A process with its results in question order.
    pub async fn get_process(&self, id: &str) -> Result<QaqcProcess, DatabaseError> {
        let mut process = self.get_process_header(id).await?;
        process.results = self.list_results(id).await?;
        Ok(process)
    }

    /// Processes matching `filter`, most recently evaluated first.
    pub async fn list_processes(
        &self,
        filter: &ProcessFilter,
    ) -> Result<Vec<QaqcProcess>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref event_id) = filter.event_id {
            clauses.push(format!("event_id = ?{}", params.len() + 1));
            params.push(event_id.clone().into());
        }
        if let Some(ref questionnaire_id) = filter.questionnaire_id {
            clauses.push(format!("questionnaire_id = ?{}", params.len() + 1));
            params.push(questionnaire_id.clone().into());
        }
        if let Some(result) = filter.result {
            clauses.push(format!("result = ?{}", params.len() + 1));
            params.push(result.as_str().into());
        }

        let mut sql = format!("SELECT {SELECT_COLS} FROM qaqc_processes");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY time DESC, rowid DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut processes = Vec::new();
        while let Some(row) = rows.next().await? {
            processes.push(row_to_process(&row)?);
        }
        for process in &mut processes {
            process.results = self.list_results(&process.id).await?;
        }
        Ok(processes)
    }
}
