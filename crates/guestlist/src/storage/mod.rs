//! Storage layer for guestlist.
//!
//! This module provides `SQLite`-based persistence for events and guests.
//! [`Database`] is the connection manager: it holds the resolved file path,
//! ensures the schema exists, and hands out a fresh connection for every
//! repository call. The connection is dropped when the call returns, on every
//! path, and an uncommitted transaction rolls back with it.

mod events;
mod guests;
pub mod schema;

pub use events::EventRepository;
pub use guests::GuestRepository;

use std::ffi::OsString;
use std::io;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};
use crate::model::AttendanceStatus;

/// Storage format of the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format of the `time` column.
pub const TIME_FORMAT: &str = "%H:%M";

/// Connection manager for the registry database.
///
/// Cheap to clone; it only carries the path. Every repository obtained from
/// it opens its own connection per operation.
#[derive(Debug, Clone)]
pub struct Database {
    /// Path to the database file.
    path: PathBuf,
}

impl Database {
    /// Open or create the registry database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// then initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryCreate`] or [`Error::DatabaseOpen`] if the
    /// store cannot be reached or created, or a persistence error if schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Self::connect_at(&path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        schema::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a fresh connection with foreign keys enforced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseOpen`] if the file cannot be opened.
    pub fn connect(&self) -> Result<Connection> {
        Self::connect_at(&self.path)
    }

    fn connect_at(path: &Path) -> Result<Connection> {
        let open_error = |source| Error::DatabaseOpen {
            path: path.to_path_buf(),
            source,
        };

        let conn = Connection::open(path).map_err(open_error)?;
        // Opening is lazy; touch the file header so an unusable path fails here.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(open_error)?;
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA synchronous = NORMAL;")?;

        trace!("Connected to {}", path.display());
        Ok(conn)
    }

    /// Repository for event records.
    #[must_use]
    pub fn events(&self) -> EventRepository<'_> {
        EventRepository::new(self)
    }

    /// Repository for guest records.
    #[must_use]
    pub fn guests(&self) -> GuestRepository<'_> {
        GuestRepository::new(self)
    }

    /// Path of the write-ahead log that sits next to the database file.
    #[must_use]
    pub fn wal_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push("-wal");
        PathBuf::from(name)
    }

    /// Get record counts and on-disk size.
    ///
    /// The size covers the database file and its write-ahead log, which holds
    /// recent writes until they are checkpointed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails or a file's size
    /// cannot be read.
    pub fn stats(&self) -> Result<StorageStats> {
        let conn = self.connect()?;
        let db_size_bytes = file_size(&self.path)? + file_size(&self.wal_path())?;

        let events: i64 = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;

        let mut stats = StorageStats {
            events,
            guests: 0,
            pending: 0,
            present: 0,
            absent: 0,
            db_size_bytes,
        };

        let mut stmt = conn.prepare("SELECT status, COUNT(*) FROM guests GROUP BY status")?;
        let rows = stmt.query_map([], |row| {
            Ok((status_column(row, 0)?, row.get::<_, i64>(1)?))
        })?;
        for row in rows {
            let (status, count) = row?;
            stats.guests += count;
            match status {
                AttendanceStatus::Pending => stats.pending = count,
                AttendanceStatus::Present => stats.present = count,
                AttendanceStatus::Absent => stats.absent = count,
            }
        }

        Ok(stats)
    }
}

/// Statistics about the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Number of events.
    pub events: i64,
    /// Number of guests across all events.
    pub guests: i64,
    /// Guests still pending.
    pub pending: i64,
    /// Guests marked present.
    pub present: i64,
    /// Guests marked absent.
    pub absent: i64,
    /// Size of the database file plus its write-ahead log, in bytes.
    pub db_size_bytes: u64,
}

/// Size of a file in bytes; a file that does not exist counts as empty.
fn file_size(path: &Path) -> Result<u64> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!("No file at {}", path.display());
            Ok(0)
        }
        Err(e) => {
            warn!("Could not read size of {}: {}", path.display(), e);
            Err(e.into())
        }
    }
}

/// Extended result code of a constraint failure, if `err` is one.
pub(crate) fn constraint_code(err: &rusqlite::Error) -> Option<c_int> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            Some(failure.extended_code)
        }
        _ => None,
    }
}

fn conversion_error(
    idx: usize,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}

/// Read a nullable ISO date column. Unparsable text is an error.
pub(crate) fn date_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

/// Read a nullable `HH:MM` time column. Unparsable text is an error.
pub(crate) fn time_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<NaiveTime>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|s| NaiveTime::parse_from_str(&s, TIME_FORMAT).map_err(|e| conversion_error(idx, e)))
        .transpose()
}

/// Read a status column.
pub(crate) fn status_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<AttendanceStatus> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|_| conversion_error(idx, format!("unknown attendance status '{raw}'")))
}

#[cfg(test)]
pub(crate) mod testing {
    use tempfile::TempDir;

    use super::Database;

    /// A database in a fresh temporary directory. Keep the `TempDir` alive.
    pub(crate) fn test_database() -> (TempDir, Database) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let db = Database::open(dir.path().join("guestlist.db")).expect("failed to open database");
        (dir, db)
    }
}
