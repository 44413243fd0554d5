//! Typed queries over the task store.
//!
//! Rows are read into [`TaskRow`] first and converted to
//! [`TaskSnapshot`] afterwards, so a malformed row is reported with its id
//! instead of as an opaque conversion failure.

use chrono::{DateTime, Utc};
use kudos_core::model::{Priority, ProjectId, TaskId, TaskSnapshot, TeamId, UserId};
use rusqlite::{Connection, params};

use super::schema::CANCELLED_STATUSES;
use crate::source::SourceError;

/// A raw `tasks` row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task_id: String,
    pub team_id: String,
    pub priority: String,
    pub created_at_us: i64,
    pub approved_at_us: Option<i64>,
    pub expiration_at_us: Option<i64>,
}

impl TaskRow {
    /// Convert into a snapshot, validating ids, priority and instants.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Corrupt`] naming the row when any column does
    /// not decode.
    pub fn into_snapshot(self) -> Result<TaskSnapshot, SourceError> {
        let corrupt = |reason: String| SourceError::Corrupt {
            task: self.task_id.clone(),
            reason,
        };

        let id = TaskId::parse(self.task_id.as_str()).map_err(|e| corrupt(e.to_string()))?;
        let team_id = TeamId::parse(self.team_id.as_str()).map_err(|e| corrupt(e.to_string()))?;
        let priority: Priority = self.priority.parse().map_err(|e| corrupt(format!("priority: {e}")))?;
        let created_at = micros(self.created_at_us).ok_or_else(|| {
            corrupt(format!("created_at_us {} out of range", self.created_at_us))
        })?;
        let approved_at = decode_optional(self.approved_at_us, "approved_at_us", &corrupt)?;
        let expiration_date = decode_optional(self.expiration_at_us, "expiration_at_us", &corrupt)?;

        Ok(TaskSnapshot {
            id,
            created_at,
            approved_at,
            expiration_date,
            priority,
            team_id,
        })
    }
}

fn micros(value: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(value)
}

fn decode_optional(
    value: Option<i64>,
    column: &str,
    corrupt: &impl Fn(String) -> SourceError,
) -> Result<Option<DateTime<Utc>>, SourceError> {
    value
        .map(|raw| micros(raw).ok_or_else(|| corrupt(format!("{column} {raw} out of range"))))
        .transpose()
}

fn row_to_task_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        task_id: row.get("task_id")?,
        team_id: row.get("team_id")?,
        priority: row.get("priority")?,
        created_at_us: row.get("created_at_us")?,
        approved_at_us: row.get("approved_at_us")?,
        expiration_at_us: row.get("expiration_at_us")?,
    })
}

/// Approved rows assigned to `user` within `project`, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn approved_rows(
    conn: &Connection,
    user: &UserId,
    project: &ProjectId,
) -> rusqlite::Result<Vec<TaskRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT task_id, team_id, priority, created_at_us, approved_at_us, expiration_at_us \
         FROM tasks \
         WHERE assignee_id = ?1 AND project_id = ?2 AND status = 'approved' \
         ORDER BY task_id",
    )?;
    let rows = stmt.query_map(params![user.as_str(), project.as_str()], row_to_task_row)?;
    rows.collect()
}

/// Whether `task` has at least one comment.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn comment_exists(conn: &Connection, task: &TaskId) -> rusqlite::Result<bool> {
    conn.prepare_cached("SELECT EXISTS(SELECT 1 FROM task_comments WHERE task_id = ?1)")?
        .query_row([task.as_str()], |row| row.get(0))
}

/// Whether `task` entered a cancelled or rejected status at or before its
/// final approval.
///
/// History written after `approved_at_us` (a reopened item, say) does not
/// count. An item without an approval instant has every row considered.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn cancellation_exists(conn: &Connection, task: &TaskId) -> rusqlite::Result<bool> {
    conn.prepare_cached(
        "SELECT EXISTS(\
           SELECT 1 FROM task_status_history h \
           WHERE h.task_id = ?1 AND h.status IN (?2, ?3) \
             AND h.changed_at_us <= COALESCE(\
               (SELECT approved_at_us FROM tasks WHERE task_id = ?1), h.changed_at_us))",
    )?
    .query_row(
        params![task.as_str(), CANCELLED_STATUSES[0], CANCELLED_STATUSES[1]],
        |row| row.get(0),
    )
}
