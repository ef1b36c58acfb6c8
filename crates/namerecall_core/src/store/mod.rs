//! Durable snapshot storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the key-value contract the repository persists through: one fixed
//!   namespaced key, one JSON document as the value.
//! - Keep SQL details out of the repository layer.
//!
//! # Invariants
//! - A missing key reads as `None` ("no data yet"), never as an error.
//! - A snapshot write replaces the prior value in a single statement.
//! - Write failures propagate unchanged; there is no retry.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the people collection snapshot.
pub const PEOPLE_SNAPSHOT_KEY: &str = "name-recall/people";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for snapshot reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value snapshot storage used by the person repository.
pub trait SnapshotStore {
    /// Reads the persisted snapshot, or `None` when nothing was saved yet.
    fn load_snapshot(&self) -> StoreResult<Option<String>>;
    /// Replaces the persisted snapshot with `payload` atomically.
    fn save_snapshot(&mut self, payload: &str) -> StoreResult<()>;
}

/// SQLite-backed snapshot store over the `snapshots` table.
#[derive(Debug)]
pub struct SqliteSnapshotStore<'conn> {
    conn: &'conn Connection,
    key: &'static str,
}

impl<'conn> SqliteSnapshotStore<'conn> {
    /// Constructs a store over a migrated connection using the fixed key.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            key: PEOPLE_SNAPSHOT_KEY,
        }
    }
}

impl SnapshotStore for SqliteSnapshotStore<'_> {
    fn load_snapshot(&self) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE key = ?1;",
                [self.key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_snapshot(&mut self, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO snapshots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, payload],
        )?;
        debug!(
            "event=snapshot_write module=store status=ok key={} bytes={}",
            self.key,
            payload.len()
        );
        Ok(())
    }
}
