//! Key-value slot repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide get/set/remove over named text slots.
//! - Back both storage scopes with one schema: a file database for durable
//!   slots and an in-memory database for session slots.
//!
//! # Invariants
//! - `set_slot` is an upsert; the last write wins.
//! - Handles are cheap clones sharing one connection.

use crate::db::{open_db, open_db_in_memory, DbError};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

/// Durable slot holding the JSON-encoded quote sequence.
pub const QUOTES_SLOT: &str = "dynamicQuotes";
/// Durable slot holding the selected category as plain text.
pub const SELECTED_CATEGORY_SLOT: &str = "selectedCategory";
/// Session slot holding the JSON-encoded last random quote.
pub const LAST_VIEWED_SLOT: &str = "lastViewedQuote";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
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

/// Storage lifetime of a slot repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotScope {
    /// Survives process restarts.
    Durable,
    /// Dropped with the process.
    Session,
}

impl SlotScope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Session => "session",
        }
    }
}

/// Repository interface for named text slots.
pub trait SlotRepository {
    fn scope(&self) -> SlotScope;
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>>;
    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    fn remove_slot(&self, key: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository.
#[derive(Clone)]
pub struct SqliteSlotRepository {
    conn: Arc<Mutex<Connection>>,
    scope: SlotScope,
}

impl SqliteSlotRepository {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection, scope: SlotScope) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            scope,
        }
    }

    /// Opens (or creates) the durable slot database at `path`.
    pub fn open_durable(path: impl AsRef<Path>) -> RepoResult<Self> {
        let conn = open_db(path)?;
        Ok(Self::new(conn, SlotScope::Durable))
    }

    /// Opens a fresh session slot store.
    pub fn open_session() -> RepoResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self::new(conn, SlotScope::Session))
    }
}

impl SlotRepository for SqliteSlotRepository {
    fn scope(&self) -> SlotScope {
        self.scope
    }

    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let conn = self.conn.lock();
        let value = conn
            .query_row(
                "SELECT value FROM storage_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO storage_slots (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM storage_slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SlotRepository, SlotScope, SqliteSlotRepository};

    #[test]
    fn set_get_remove_roundtrip() {
        let repo = SqliteSlotRepository::open_session().unwrap();
        assert_eq!(repo.scope(), SlotScope::Session);
        assert_eq!(repo.get_slot("k").unwrap(), None);

        repo.set_slot("k", "first").unwrap();
        repo.set_slot("k", "second").unwrap();
        assert_eq!(repo.get_slot("k").unwrap().as_deref(), Some("second"));

        repo.remove_slot("k").unwrap();
        assert_eq!(repo.get_slot("k").unwrap(), None);
    }

    #[test]
    fn clones_share_the_same_connection() {
        let repo = SqliteSlotRepository::open_session().unwrap();
        let other = repo.clone();
        repo.set_slot("shared", "yes").unwrap();
        assert_eq!(other.get_slot("shared").unwrap().as_deref(), Some("yes"));
    }

    #[test]
    fn separate_session_stores_are_isolated() {
        let first = SqliteSlotRepository::open_session().unwrap();
        let second = SqliteSlotRepository::open_session().unwrap();
        first.set_slot("k", "v").unwrap();
        assert_eq!(second.get_slot("k").unwrap(), None);
    }
}
