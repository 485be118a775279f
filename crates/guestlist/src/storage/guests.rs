//! Guest records.
//!
//! Every guest belongs to exactly one event. Reads always join the owning
//! event so callers get its name without a second lookup.

use rusqlite::{ffi, params, OptionalExtension};
use tracing::{debug, warn};

use super::{constraint_code, status_column, Database};
use crate::error::{Error, Result};
use crate::model::{non_blank, EventId, Guest, GuestDraft, GuestId};

const SELECT_GUEST: &str = r"
SELECT g.id, g.event_id, e.name, g.name, g.contact, g.phone, g.status
FROM guests g
JOIN events e ON e.id = g.event_id
";

/// CRUD operations over guest records.
#[derive(Debug, Clone, Copy)]
pub struct GuestRepository<'db> {
    db: &'db Database,
}

impl<'db> GuestRepository<'db> {
    pub(super) fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// Register a guest for an event and return the new guest's id.
    ///
    /// The event check and the insert run in one transaction; nothing is
    /// written when either fails.
    ///
    /// # Errors
    ///
    /// - [`Error::EventNotFound`] if `event_id` does not exist.
    /// - [`Error::DuplicateContact`] if another guest has the same contact.
    /// - [`Error::Validation`] for a blank name.
    /// - [`Error::Persistence`] for any other store failure.
    pub fn create(&self, event_id: EventId, draft: &GuestDraft) -> Result<GuestId> {
        draft.validate()?;
        let contact = non_blank(draft.contact.as_deref());

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;

        let event_exists = tx
            .query_row("SELECT 1 FROM events WHERE id = ?1", [event_id], |_| Ok(()))
            .optional()?
            .is_some();
        if !event_exists {
            return Err(Error::EventNotFound { id: event_id });
        }

        tx.execute(
            r"
            INSERT INTO guests (event_id, name, contact, phone, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                event_id,
                draft.name,
                contact,
                non_blank(draft.phone.as_deref()),
                draft.status.as_str(),
            ],
        )
        .map_err(|err| translate(err, Some(event_id), contact))?;

        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!("Inserted guest {} ({}) for event {}", id, draft.name, event_id);
        Ok(id)
    }

    /// All guests of one event, by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_by_event(&self, event_id: EventId) -> Result<Vec<Guest>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_GUEST} WHERE g.event_id = ?1 ORDER BY g.name, g.id"
        ))?;

        let guests = stmt
            .query_map([event_id], row_to_guest)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(guests)
    }

    /// Every guest of every event, by event name and then guest name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_all(&self) -> Result<Vec<Guest>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(&format!(
            "{SELECT_GUEST} ORDER BY e.name, g.name, g.id"
        ))?;

        let guests = stmt
            .query_map([], row_to_guest)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(guests)
    }

    /// Get a guest by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_by_id(&self, id: GuestId) -> Result<Option<Guest>> {
        let conn = self.db.connect()?;
        let guest = conn
            .query_row(&format!("{SELECT_GUEST} WHERE g.id = ?1"), [id], row_to_guest)
            .optional()?;
        Ok(guest)
    }

    /// Replace a guest's name, contact, phone and status.
    ///
    /// The owning event never changes. Returns `true` if a guest was updated,
    /// `false` if not found.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateContact`] if a different guest has the new contact.
    /// - [`Error::Validation`] for a blank name.
    /// - [`Error::Persistence`] for any other store failure.
    pub fn update(&self, id: GuestId, draft: &GuestDraft) -> Result<bool> {
        draft.validate()?;
        let contact = non_blank(draft.contact.as_deref());

        let mut conn = self.db.connect()?;
        let tx = conn.transaction()?;
        let affected = tx
            .execute(
                r"
                UPDATE guests
                SET name = ?1, contact = ?2, phone = ?3, status = ?4
                WHERE id = ?5
                ",
                params![
                    draft.name,
                    contact,
                    non_blank(draft.phone.as_deref()),
                    draft.status.as_str(),
                    id,
                ],
            )
            .map_err(|err| translate(err, None, contact))?;
        tx.commit()?;

        debug!("Updated guest {}: {} row(s)", id, affected);
        Ok(affected > 0)
    }

    /// Delete a guest.
    ///
    /// Returns `true` if a guest was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: GuestId) -> Result<bool> {
        let conn = self.db.connect()?;
        let affected = conn.execute("DELETE FROM guests WHERE id = ?1", [id])?;

        debug!("Deleted guest {}: {} row(s)", id, affected);
        Ok(affected > 0)
    }
}

/// Map constraint failures on the guests table to their record errors.
///
/// `event_id` is the parent being referenced by an insert; updates never
/// change the parent and pass `None`.
fn translate(err: rusqlite::Error, event_id: Option<EventId>, contact: Option<&str>) -> Error {
    match (constraint_code(&err), event_id) {
        (Some(ffi::SQLITE_CONSTRAINT_UNIQUE), _) => {
            warn!("Contact {:?} already in use", contact);
            Error::DuplicateContact {
                contact: contact.unwrap_or_default().to_string(),
            }
        }
        (Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY), Some(id)) => Error::EventNotFound { id },
        (Some(ffi::SQLITE_CONSTRAINT_CHECK), _) => {
            Error::validation("status", "rejected by the store")
        }
        _ => Error::Persistence(err),
    }
}

fn row_to_guest(row: &rusqlite::Row) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        event_id: row.get(1)?,
        event_name: row.get(2)?,
        name: row.get(3)?,
        contact: row.get(4)?,
        phone: row.get(5)?,
        status: status_column(row, 6)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::model::{AttendanceStatus, EventDraft};
    use crate::storage::testing::test_database;

    use super::*;

    fn with_event(db: &Database, name: &str) -> EventId {
        db.events().create(&EventDraft::new(name)).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let draft = GuestDraft::new("Ana")
            .with_contact("ana@x.com")
            .with_phone("555-0100");

        let id = db.guests().create(event, &draft).unwrap();
        let guest = db.guests().get_by_id(id).unwrap().unwrap();

        assert_eq!(guest.id, id);
        assert_eq!(guest.event_id, event);
        assert_eq!(guest.event_name, "Launch");
        assert_eq!(guest.to_draft(), draft);
        assert_eq!(guest.status, AttendanceStatus::Pending);
    }

    #[test]
    fn test_round_trip_keeps_surrounding_whitespace() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let draft = GuestDraft::new("Ana ")
            .with_contact(" ana@x.com")
            .with_phone("555-0100 ");

        let id = db.guests().create(event, &draft).unwrap();
        assert_eq!(db.guests().get_by_id(id).unwrap().unwrap().to_draft(), draft);

        let edited = GuestDraft::new("  Ana Maria").with_contact("ana@x.com ");
        assert!(db.guests().update(id, &edited).unwrap());
        assert_eq!(db.guests().get_by_id(id).unwrap().unwrap().to_draft(), edited);
    }

    #[test]
    fn test_create_with_explicit_status() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");

        let id = db
            .guests()
            .create(
                event,
                &GuestDraft::new("Ana").with_status(AttendanceStatus::Present),
            )
            .unwrap();
        assert_eq!(
            db.guests().get_by_id(id).unwrap().unwrap().status,
            AttendanceStatus::Present
        );
    }

    #[test]
    fn test_create_for_missing_event_is_not_found() {
        let (_dir, db) = test_database();

        let err = db.guests().create(404, &GuestDraft::new("Ana")).unwrap_err();

        assert!(err.is_not_found());
        assert!(db.guests().list_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_duplicate_contact() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let first = db
            .guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();
        let before = db.guests().get_by_id(first).unwrap();

        let err = db
            .guests()
            .create(event, &GuestDraft::new("Impostor").with_contact("ana@x.com"))
            .unwrap_err();

        assert!(err.is_duplicate(), "unexpected error: {err}");
        assert_eq!(db.guests().get_by_id(first).unwrap(), before);
        assert_eq!(db.guests().list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_contact_across_events() {
        let (_dir, db) = test_database();
        let a = with_event(&db, "A");
        let b = with_event(&db, "B");
        db.guests()
            .create(a, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();

        let err = db
            .guests()
            .create(b, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_guests_without_contact_do_not_collide() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");

        db.guests().create(event, &GuestDraft::new("Ana")).unwrap();
        db.guests()
            .create(event, &GuestDraft::new("Bea").with_contact("  "))
            .unwrap();
        db.guests().create(event, &GuestDraft::new("Cid")).unwrap();

        assert_eq!(db.guests().list_by_event(event).unwrap().len(), 3);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");

        assert!(db
            .guests()
            .create(event, &GuestDraft::new(" "))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_list_by_event_sorted_by_name() {
        let (_dir, db) = test_database();
        let launch = with_event(&db, "Launch");
        let other = with_event(&db, "Other");
        db.guests().create(launch, &GuestDraft::new("Carla")).unwrap();
        db.guests().create(launch, &GuestDraft::new("Ana")).unwrap();
        db.guests().create(other, &GuestDraft::new("Bruno")).unwrap();

        let names: Vec<String> = db
            .guests()
            .list_by_event(launch)
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
    }

    #[test]
    fn test_list_by_event_empty() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        assert!(db.guests().list_by_event(event).unwrap().is_empty());
        assert!(db.guests().list_by_event(999).unwrap().is_empty());
    }

    #[test]
    fn test_list_all_sorted_by_event_then_name() {
        let (_dir, db) = test_database();
        let zeta = with_event(&db, "Zeta");
        let alpha = with_event(&db, "Alpha");
        db.guests().create(zeta, &GuestDraft::new("Ana")).unwrap();
        db.guests().create(alpha, &GuestDraft::new("Dora")).unwrap();
        db.guests().create(alpha, &GuestDraft::new("Bia")).unwrap();

        let rows: Vec<(String, String, EventId)> = db
            .guests()
            .list_all()
            .unwrap()
            .into_iter()
            .map(|g| (g.event_name, g.name, g.event_id))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Alpha".to_string(), "Bia".to_string(), alpha),
                ("Alpha".to_string(), "Dora".to_string(), alpha),
                ("Zeta".to_string(), "Ana".to_string(), zeta),
            ]
        );
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, db) = test_database();
        assert!(db.guests().get_by_id(99_999).unwrap().is_none());
    }

    #[test]
    fn test_update_status_any_direction() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let id = db.guests().create(event, &GuestDraft::new("Ana")).unwrap();

        for status in [
            AttendanceStatus::Present,
            AttendanceStatus::Absent,
            AttendanceStatus::Pending,
            AttendanceStatus::Absent,
        ] {
            let draft = GuestDraft::new("Ana").with_status(status);
            assert!(db.guests().update(id, &draft).unwrap());
            assert_eq!(db.guests().get_by_id(id).unwrap().unwrap().status, status);
        }
    }

    #[test]
    fn test_update_keeps_own_contact() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let id = db
            .guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();

        let draft = GuestDraft::new("Ana Maria").with_contact("ana@x.com");
        assert!(db.guests().update(id, &draft).unwrap());
        assert_eq!(db.guests().get_by_id(id).unwrap().unwrap().name, "Ana Maria");
    }

    #[test]
    fn test_update_duplicate_contact() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        db.guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();
        let bea = db
            .guests()
            .create(event, &GuestDraft::new("Bea").with_contact("bea@x.com"))
            .unwrap();
        let before = db.guests().get_by_id(bea).unwrap();

        let err = db
            .guests()
            .update(bea, &GuestDraft::new("Bea").with_contact("ana@x.com"))
            .unwrap_err();

        assert!(err.is_duplicate());
        assert_eq!(db.guests().get_by_id(bea).unwrap(), before);
    }

    #[test]
    fn test_update_with_invalid_status_leaves_record_unchanged() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let id = db.guests().create(event, &GuestDraft::new("Ana")).unwrap();
        let before = db.guests().get_by_id(id).unwrap();

        let result = "maybe"
            .parse::<AttendanceStatus>()
            .and_then(|status| {
                db.guests()
                    .update(id, &GuestDraft::new("Ana").with_status(status))
            });

        assert!(result.unwrap_err().is_validation());
        assert_eq!(db.guests().get_by_id(id).unwrap(), before);
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let id = db
            .guests()
            .create(
                event,
                &GuestDraft::new("Ana")
                    .with_contact("ana@x.com")
                    .with_phone("555"),
            )
            .unwrap();

        assert!(db.guests().update(id, &GuestDraft::new("Ana")).unwrap());
        let guest = db.guests().get_by_id(id).unwrap().unwrap();
        assert!(guest.contact.is_none());
        assert!(guest.phone.is_none());
    }

    #[test]
    fn test_update_nonexistent_returns_false() {
        let (_dir, db) = test_database();
        assert!(!db.guests().update(77, &GuestDraft::new("Ghost")).unwrap());
    }

    #[test]
    fn test_delete() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let id = db.guests().create(event, &GuestDraft::new("Ana")).unwrap();

        assert!(db.guests().delete(id).unwrap());
        assert!(db.guests().get_by_id(id).unwrap().is_none());
        assert!(db.events().get_by_id(event).unwrap().is_some());
    }

    #[test]
    fn test_delete_nonexistent() {
        let (_dir, db) = test_database();
        assert!(!db.guests().delete(99_999).unwrap());
    }

    #[test]
    fn test_contact_reusable_after_delete() {
        let (_dir, db) = test_database();
        let event = with_event(&db, "Launch");
        let id = db
            .guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();
        db.guests().delete(id).unwrap();

        assert!(db
            .guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .is_ok());
    }

    #[test]
    fn test_translate_passes_through_other_errors() {
        let err = translate(rusqlite::Error::QueryReturnedNoRows, Some(1), None);
        assert!(matches!(err, Error::Persistence(_)));
    }
}
