//! `SQLite` schema definitions for guestlist.
//!
//! This module contains the SQL statements for creating the database schema
//! and the idempotent [`initialize_schema`] entry point.

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

/// SQL statement to create the events table.
pub const CREATE_EVENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    location TEXT,
    date TEXT,
    time TEXT,
    description TEXT
)
";

/// SQL statement to create the guests table.
///
/// `contact` is unique when present; `SQLite` lets any number of rows hold NULL.
pub const CREATE_GUESTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS guests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    contact TEXT UNIQUE,
    phone TEXT,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK (status IN ('pending', 'present', 'absent')),
    FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
)
";

/// SQL statement to create an index on `event_id` for per-event listing and cascades.
pub const CREATE_GUEST_EVENT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_guests_event ON guests(event_id)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_EVENTS_TABLE,
    CREATE_GUESTS_TABLE,
    CREATE_GUEST_EVENT_INDEX,
];

/// Initialize the database schema.
///
/// Creates both tables and the guest index if they don't exist. Safe to call
/// any number of times.
///
/// # Errors
///
/// Returns an error if a schema statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    info!("Schema ready");
    Ok(())
}
