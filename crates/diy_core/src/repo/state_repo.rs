//! Snapshot repository contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Load the persisted project collection once at startup.
//! - Overwrite the persisted collection after every store mutation.
//!
//! # Invariants
//! - The persisted document shape is `{"projects": [...]}`.
//! - One named row in `kv_store` holds the whole document.

use crate::db::DbError;
use crate::model::project::Project;
use crate::time::now_epoch_ms;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Snapshot could not be encoded to JSON.
    Serialize(serde_json::Error),
    /// Persisted record cannot be decoded, or the collection holds values
    /// that cannot be persisted.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode project state: {err}"),
            Self::InvalidData(message) => write!(f, "invalid project state: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Owned persisted document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Serialize)]
struct PersistedStateRef<'a> {
    projects: &'a [Project],
}

/// Encodes a project collection into the persisted document form.
///
/// Rejects NaN and infinite numbers: JSON has no encoding for them, and a
/// document holding `null` in a numeric field could not be loaded again.
pub fn encode_state(projects: &[Project]) -> RepoResult<String> {
    ensure_finite_numbers(projects)?;
    serde_json::to_string(&PersistedStateRef { projects }).map_err(RepoError::Serialize)
}

fn ensure_finite_numbers(projects: &[Project]) -> RepoResult<()> {
    for project in projects {
        check_finite("project.estimatedDuration", project.estimated_duration)?;
        check_finite("project.estimatedCost", project.estimated_cost)?;
        if let Some(actual_cost) = project.actual_cost {
            check_finite("project.actualCost", actual_cost)?;
        }
        for material in &project.materials {
            check_finite("material.quantity", material.quantity)?;
            check_finite("material.estimatedCost", material.estimated_cost)?;
        }
        for step in &project.steps {
            check_finite("step.duration", step.duration)?;
        }
    }
    Ok(())
}

fn check_finite(field: &str, value: f64) -> RepoResult<()> {
    if value.is_finite() {
        return Ok(());
    }
    Err(RepoError::InvalidData(format!(
        "non-finite value `{value}` in {field}"
    )))
}

/// Decodes a persisted document back into a project collection.
pub fn decode_state(raw: &str) -> RepoResult<Vec<Project>> {
    serde_json::from_str::<PersistedState>(raw)
        .map(|state| state.projects)
        .map_err(|err| RepoError::InvalidData(err.to_string()))
}

/// Repository interface for whole-collection persistence.
pub trait StateRepository {
    /// Returns `None` when nothing has been persisted yet.
    fn load_projects(&self) -> RepoResult<Option<Vec<Project>>>;
    fn save_projects(&self, projects: &[Project]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository storing one named `kv_store` row.
pub struct SqliteStateRepository {
    conn: Connection,
    key: String,
}

impl SqliteStateRepository {
    /// Wraps a migrated connection. `key` names the persisted record.
    pub fn new(conn: Connection, key: impl Into<String>) -> Self {
        Self {
            conn,
            key: key.into(),
        }
    }

    /// Name of the persisted record.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying connection, for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Raw persisted document, if any.
    pub fn load_raw(&self) -> RepoResult<Option<String>> {
        let raw = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }
}

impl StateRepository for SqliteStateRepository {
    fn load_projects(&self) -> RepoResult<Option<Vec<Project>>> {
        let Some(raw) = self.load_raw()? else {
            debug!("event=state_load module=repo status=empty");
            return Ok(None);
        };

        match decode_state(&raw) {
            Ok(projects) => {
                debug!(
                    "event=state_load module=repo status=ok projects={} bytes={}",
                    projects.len(),
                    raw.len()
                );
                Ok(Some(projects))
            }
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error error_code=state_decode_failed bytes={}",
                    raw.len()
                );
                Err(err)
            }
        }
    }

    fn save_projects(&self, projects: &[Project]) -> RepoResult<()> {
        let encoded = encode_state(projects)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), encoded.as_str(), now_epoch_ms()],
        )?;
        debug!(
            "event=state_save module=repo status=ok projects={} bytes={}",
            projects.len(),
            encoded.len()
        );
        Ok(())
    }
}
