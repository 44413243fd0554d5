//! Expected layout of the task backend's database.
//!
//! The backend owns this schema and its upgrades; the engine only checks
//! that an opened database matches before querying it.
//!
//! - `tasks` holds the latest state of each work item; instants are stored
//!   as microseconds since the Unix epoch (`*_at_us`)
//! - `task_comments` records comments and review annotations
//! - `task_status_history` keeps every status an item passed through, so a
//!   cancellation before final approval stays visible
//! - `PRAGMA user_version` carries the layout version

use rusqlite::{Connection, params};

/// Layout version the queries in [`super::query`] are written against.
pub const SCHEMA_VERSION: u32 = 2;

/// Tables the read path touches.
pub const REQUIRED_TABLES: &[&str] = &["tasks", "task_comments", "task_status_history"];

/// Indexes backing the evaluator's three queries.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_tasks_assignee_project_status",
    "idx_task_comments_task",
    "idx_task_status_history_task_status",
];

/// Statuses that count as "cancelled at some point" in the history table.
pub const CANCELLED_STATUSES: &[&str] = &["cancelled", "rejected"];

/// DDL for a database at [`SCHEMA_VERSION`], as the task backend lays it out.
pub const TASK_STORE_DDL: &str = r"
CREATE TABLE IF NOT EXISTS tasks (
    task_id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    team_id TEXT NOT NULL,
    assignee_id TEXT,
    status TEXT NOT NULL CHECK (
        status IN ('open', 'in_progress', 'in_review', 'cancelled', 'rejected', 'approved')
    ),
    priority TEXT NOT NULL CHECK (priority IN ('low', 'medium', 'high', 'critical')),
    created_at_us INTEGER NOT NULL,
    approved_at_us INTEGER,
    expiration_at_us INTEGER,
    CHECK (length(trim(task_id)) > 0)
);

CREATE TABLE IF NOT EXISTS task_comments (
    comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id TEXT NOT NULL REFERENCES tasks(task_id) ON DELETE CASCADE,
    author_id TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS task_status_history (
    history_id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id TEXT NOT NULL REFERENCES tasks(task_id) ON DELETE CASCADE,
    status TEXT NOT NULL,
    changed_at_us INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_assignee_project_status
    ON tasks(assignee_id, project_id, status);

CREATE INDEX IF NOT EXISTS idx_task_comments_task
    ON task_comments(task_id);

CREATE INDEX IF NOT EXISTS idx_task_status_history_task_status
    ON task_status_history(task_id, status);
";

/// Why an opened database cannot be queried.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("task store schema version mismatch: db has v{found}, engine expects v{expected}")]
    VersionMismatch { found: i64, expected: u32 },

    #[error("task store is missing table `{0}`")]
    MissingTable(&'static str),

    #[error("task store is missing index `{0}`")]
    MissingIndex(&'static str),

    #[error("failed to inspect task store schema: {0}")]
    Inspect(#[from] rusqlite::Error),
}

/// Read `PRAGMA user_version`.
///
/// # Errors
///
/// Returns an error if querying SQLite fails.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Check that `conn` carries the layout the read path expects.
///
/// Never writes; version first, then tables, then indexes.
///
/// # Errors
///
/// Returns the first mismatch found as a [`SchemaError`].
pub fn verify(conn: &Connection) -> Result<(), SchemaError> {
    let found = schema_version(conn)?;
    if found != i64::from(SCHEMA_VERSION) {
        return Err(SchemaError::VersionMismatch {
            found,
            expected: SCHEMA_VERSION,
        });
    }

    for table in REQUIRED_TABLES {
        if !object_exists(conn, "table", table)? {
            return Err(SchemaError::MissingTable(*table));
        }
    }
    for index in REQUIRED_INDEXES {
        if !object_exists(conn, "index", index)? {
            return Err(SchemaError::MissingIndex(*index));
        }
    }
    Ok(())
}

fn object_exists(conn: &Connection, kind: &str, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2)",
        params![kind, name],
        |row| row.get(0),
    )
}

/// Lay down [`TASK_STORE_DDL`] and stamp [`SCHEMA_VERSION`] on a writable
/// connection.
///
/// For test fixtures and local seed databases. The store's open path never
/// calls this.
///
/// # Errors
///
/// Returns an error if executing the DDL or setting the version fails.
pub fn install_fixture_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(TASK_STORE_DDL)?;
    conn.pragma_update(None, "user_version", i64::from(SCHEMA_VERSION))
}
