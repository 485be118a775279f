//! Event records.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{date_column, time_column, Database, DATE_FORMAT, TIME_FORMAT};
use crate::error::Result;
use crate::model::{non_blank, Event, EventDraft, EventId};

const SELECT_EVENT: &str = "SELECT id, name, location, date, time, description FROM events";

/// CRUD operations over event records.
#[derive(Debug, Clone, Copy)]
pub struct EventRepository<'db> {
    db: &'db Database,
}

impl<'db> EventRepository<'db> {
    pub(super) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Insert a new event and return its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a persistence error if
    /// the insert fails.
    pub fn create(&self, draft: &EventDraft) -> Result<EventId> {
        draft.validate()?;

        let conn = self.db.connect()?;
        conn.execute(
            r"
            INSERT INTO events (name, location, date, time, description)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                draft.name,
                non_blank(draft.location.as_deref()),
                draft.date.map(|d| d.format(DATE_FORMAT).to_string()),
                draft.time.map(|t| t.format(TIME_FORMAT).to_string()),
                non_blank(draft.description.as_deref()),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Inserted event {} ({})", id, draft.name);
        Ok(id)
    }

    /// All events, most recent date first, then latest time first.
    ///
    /// Events without a date sort last.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list(&self) -> Result<Vec<Event>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_EVENT} ORDER BY date DESC, time DESC, id DESC"
        ))?;

        let events = stmt
            .query_map([], row_to_event)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// Get an event by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_by_id(&self, id: EventId) -> Result<Option<Event>> {
        let conn = self.db.connect()?;
        let event = conn
            .query_row(&format!("{SELECT_EVENT} WHERE id = ?1"), [id], row_to_event)
            .optional()?;
        Ok(event)
    }

    /// Check whether an event exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn exists(&self, id: EventId) -> Result<bool> {
        let conn = self.db.connect()?;
        let found = conn
            .query_row("SELECT 1 FROM events WHERE id = ?1", [id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// Replace every mutable field of an event.
    ///
    /// Returns `true` if an event was updated, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a persistence error if
    /// the update fails.
    pub fn update(&self, id: EventId, draft: &EventDraft) -> Result<bool> {
        draft.validate()?;

        let conn = self.db.connect()?;
        let affected = conn.execute(
            r"
            UPDATE events
            SET name = ?1, location = ?2, date = ?3, time = ?4, description = ?5
            WHERE id = ?6
            ",
            params![
                draft.name,
                non_blank(draft.location.as_deref()),
                draft.date.map(|d| d.format(DATE_FORMAT).to_string()),
                draft.time.map(|t| t.format(TIME_FORMAT).to_string()),
                non_blank(draft.description.as_deref()),
                id,
            ],
        )?;

        debug!("Updated event {}: {} row(s)", id, affected);
        Ok(affected > 0)
    }

    /// Delete an event and, by cascade, all of its guests.
    ///
    /// Returns `true` if an event was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: EventId) -> Result<bool> {
        let conn = self.db.connect()?;
        let affected = conn.execute("DELETE FROM events WHERE id = ?1", [id])?;

        debug!("Deleted event {}: {} row(s)", id, affected);
        Ok(affected > 0)
    }
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        date: date_column(row, 3)?,
        time: time_column(row, 4)?,
        description: row.get(5)?,
    })
}
