//! State slot repository contract and SQLite implementation.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key holding the serialized application aggregate.
pub const STATE_SLOT_KEY: &str = "izin_app_state";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Backend refused the operation for a non-database reason.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(message) => write!(f, "state storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) => None,
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

/// Key/value slot storage.
pub trait StateRepository {
    /// Reads the raw value stored under `key`, if any.
    fn load_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Overwrites the value stored under `key`.
    fn save_slot(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository over the `state_slots` table.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM state_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn save_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO state_slots (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl<R: StateRepository + ?Sized> StateRepository for &R {
    fn load_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).load_slot(key)
    }

    fn save_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).save_slot(key, value)
    }
}
