//! Project repository: CRUD, dashboard search and year facets.

use chrono::{NaiveDate, Utc};
use qaqc_core::entities::Project;
use qaqc_core::enums::{EntityType, ProjectStatus};
use qaqc_core::ids::PREFIX_PROJECT;
use serde::{Deserialize, Serialize};

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, format_datetime, get_opt_string, parse_date, parse_datetime, parse_enum,
    parse_optional_date,
};
use crate::service::QaqcService;
use crate::updates::project::ProjectUpdate;

const SELECT_COLS: &str =
    "id, name, client, location, status, start_date, end_date, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        client: row.get(2)?,
        location: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        start_date: parse_date(&row.get::<String>(5)?)?,
        end_date: parse_optional_date(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

/// Project creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub location: String,
    /// Defaults to `Not Started`.
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Dashboard filter. All criteria are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Case-insensitive substring of name or client.
    pub search: Option<String>,
    /// Start year.
    pub year: Option<i32>,
    pub status: Option<ProjectStatus>,
    pub limit: Option<u32>,
}

fn validate_dates(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), DatabaseError> {
    match end {
        Some(end) if end < start => Err(DatabaseError::validation(format!(
            "project ends ({end}) before it starts ({start})"
        ))),
        _ => Ok(()),
    }
}

impl QaqcService {
    pub async fn create_project(&self, new: NewProject) -> Result<Project, DatabaseError> {
        if new.name.trim().is_empty() {
            return Err(DatabaseError::validation("project name is required"));
        }
        validate_dates(new.start_date, new.end_date)?;

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PROJECT).await?;
        let status = new.status.unwrap_or(ProjectStatus::NotStarted);

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO projects ({SELECT_COLS}) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.client.as_str(),
                    new.location.as_str(),
                    status.as_str(),
                    format_date(new.start_date),
                    new.end_date.map(format_date),
                    format_datetime(&now),
                    format_datetime(&now)
                ],
            )
            .await?;

        Ok(Project {
            id,
            name: new.name,
            client: new.client,
            location: new.location,
            status,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM projects WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Project, id))?;
        row_to_project(&row)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        let current = self.get_project(project_id).await?;
        validate_dates(
            update.start_date.unwrap_or(current.start_date),
            update.end_date.unwrap_or(current.end_date),
        )?;

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            if name.trim().is_empty() {
                return Err(DatabaseError::validation("project name is required"));
            }
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref client) = update.client {
            sets.push(format!("client = ?{idx}"));
            params.push(client.clone().into());
            idx += 1;
        }
        if let Some(ref location) = update.location {
            sets.push(format!("location = ?{idx}"));
            params.push(location.clone().into());
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(start_date) = update.start_date {
            sets.push(format!("start_date = ?{idx}"));
            params.push(format_date(start_date).into());
            idx += 1;
        }
        if let Some(end_date) = update.end_date {
            sets.push(format!("end_date = ?{idx}"));
            params.push(end_date.map_or(libsql::Value::Null, |d| format_date(d).into()));
            idx += 1;
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_datetime(&Utc::now()).into());
        idx += 1;

        params.push(project_id.into());
        let sql = format!("UPDATE projects SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_project(project_id).await
    }

    /// Projects matching `filter`, most recent start first.
    pub async fn list_projects(
        &self,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let idx = params.len() + 1;
            clauses.push(format!(
                "(instr(lower(name), ?{idx}) > 0 OR instr(lower(client), ?{idx}) > 0)"
            ));
            params.push(term.to_lowercase().into());
        }
        if let Some(year) = filter.year {
            clauses.push(format!("substr(start_date, 1, 4) = ?{}", params.len() + 1));
            params.push(format!("{year:04}").into());
        }
        if let Some(status) = filter.status {
            clauses.push(format!("status = ?{}", params.len() + 1));
            params.push(status.as_str().into());
        }

        let mut sql = format!("SELECT {SELECT_COLS} FROM projects");
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY start_date DESC, created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Distinct project start years, newest first.
    pub async fn available_years(&self) -> Result<Vec<i32>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT CAST(substr(start_date, 1, 4) AS INTEGER) AS year
                 FROM projects ORDER BY year DESC",
                (),
            )
            .await?;
        let mut years = Vec::new();
        while let Some(row) = rows.next().await? {
            let year = row.get::<i64>(0)?;
            years.push(
                i32::try_from(year)
                    .map_err(|_| DatabaseError::InvalidState(format!("bad year {year}")))?,
            );
        }
        Ok(years)
    }
}
