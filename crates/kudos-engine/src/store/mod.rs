//! SQLite-backed read side for task history.
//!
//! The task backend owns the database. Runtime defaults:
//! - opened `SQLITE_OPEN_READ_ONLY` with `query_only = ON`
//! - `busy_timeout = 5s` to absorb the backend's write locks
//! - the layout is checked against [`schema::SCHEMA_VERSION`] before use

pub mod query;
pub mod schema;

use anyhow::{Context, Result};
use kudos_core::model::{ProjectId, TaskId, TaskSnapshot, TeamId, UserId};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

use crate::source::{CancellationSource, CommentSource, SnapshotSource, SourceError};

/// Busy timeout used for store connections.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Task store implementing every collaborator interface the engine needs.
#[derive(Debug)]
pub struct SqliteActivityStore {
    conn: Mutex<Connection>,
}

impl SqliteActivityStore {
    /// Open an existing task database read-only and verify its layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened, or
    /// if its schema does not match [`schema::SCHEMA_VERSION`].
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("open task store {}", path.display()))?;
        configure_connection(&conn).context("configure sqlite pragmas")?;
        Self::from_connection(conn)
            .with_context(|| format!("task store {} is not usable", path.display()))
    }

    /// Wrap an existing connection after verifying its layout.
    ///
    /// The connection is used as given; fixtures pass a writable one so
    /// they can seed rows through [`Self::with_connection`].
    ///
    /// # Errors
    ///
    /// Returns a [`schema::SchemaError`] if the layout does not match.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        schema::verify(&conn)?;
        debug!(version = schema::SCHEMA_VERSION, "task store ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` against the underlying connection.
    ///
    /// Intended for fixtures and maintenance; the engine only reads.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the connection lock is
    /// poisoned, or whatever `f` returns.
    pub fn with_connection<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, SourceError> {
        let conn = self.lock()?;
        Ok(f(&conn)?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SourceError> {
        self.conn
            .lock()
            .map_err(|_| SourceError::Unavailable("task store connection lock poisoned".into()))
    }
}

fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "query_only", "ON")?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}

impl SnapshotSource for SqliteActivityStore {
    fn fetch_completed_snapshots(
        &self,
        user: &UserId,
        project: &ProjectId,
        _team: &TeamId,
    ) -> Result<Vec<TaskSnapshot>, SourceError> {
        let rows = {
            let conn = self.lock()?;
            query::approved_rows(&conn, user, project)?
        };
        rows.into_iter().map(query::TaskRow::into_snapshot).collect()
    }
}

impl CommentSource for SqliteActivityStore {
    fn has_associated_comment(&self, task: &TaskId) -> Result<bool, SourceError> {
        let conn = self.lock()?;
        Ok(query::comment_exists(&conn, task)?)
    }
}

impl CancellationSource for SqliteActivityStore {
    fn was_ever_cancelled(&self, task: &TaskId) -> Result<bool, SourceError> {
        let conn = self.lock()?;
        Ok(query::cancellation_exists(&conn, task)?)
    }
}
