//! Interactive text menus.
//!
//! [`Console`] reads answers line by line from any [`BufRead`] and writes
//! menus and tables to any [`Write`], so the whole menu tree can be driven by
//! a script in tests. Repository errors are reported and the menu continues.
//! End of input leaves the console cleanly from any prompt.

pub mod tables;

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::error::{Error, Result};
use crate::invite::{InvitationService, QrPayload};
use crate::model::{
    display_date, is_valid_email, AttendanceStatus, Event, EventDraft, EventId, Guest,
    GuestDraft, GuestId,
};
use crate::storage::{Database, TIME_FORMAT};

/// How dates are typed at the prompt.
const INPUT_DATE_FORMAT: &str = "%d-%m-%Y";

type Parsed<T> = std::result::Result<T, String>;

fn parse_text(value: &str) -> Parsed<String> {
    Ok(value.to_string())
}

fn parse_date(value: &str) -> Parsed<NaiveDate> {
    NaiveDate::parse_from_str(value, INPUT_DATE_FORMAT)
        .map_err(|_| "expected DD-MM-YYYY".to_string())
}

fn parse_time(value: &str) -> Parsed<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| "expected HH:MM".to_string())
}

fn parse_email(value: &str) -> Parsed<String> {
    if is_valid_email(value) {
        Ok(value.to_string())
    } else {
        Err("expected an address like name@example.com".to_string())
    }
}

fn parse_status(value: &str) -> Parsed<AttendanceStatus> {
    value.parse().map_err(|e: Error| e.to_string())
}

fn is_end_of_input(err: &Error) -> bool {
    matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
}

/// `label [current]`, with `-` standing in for an absent value.
fn with_current(label: &str, current: Option<&str>) -> String {
    format!("{label} [{}]", current.unwrap_or("-"))
}

/// The interactive menu tree over one database.
#[derive(Debug)]
pub struct Console<'a, R, W> {
    db: &'a Database,
    invitations: &'a InvitationService,
    date_format: &'a str,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    /// Create a console. `date_format` is used when showing dates.
    pub fn new(
        db: &'a Database,
        invitations: &'a InvitationService,
        date_format: &'a str,
        input: R,
        output: W,
    ) -> Self {
        Self {
            db,
            invitations,
            date_format,
            input,
            output,
        }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the main menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal itself fails.
    pub fn run(&mut self) -> Result<()> {
        match self.main_menu() {
            Err(err) if is_end_of_input(&err) => {
                debug!("Input closed, leaving console");
                writeln!(self.output)?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            self.header("Guest List")?;
            writeln!(self.output, "1. Manage events")?;
            writeln!(self.output, "2. Manage guests and invitations")?;
            writeln!(self.output, "0. Exit")?;
            writeln!(self.output)?;

            match self.ask("Choose an option: ")?.as_str() {
                "1" => self.events_menu()?,
                "2" => self.guests_menu()?,
                "0" => {
                    writeln!(self.output, "Goodbye.")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid option. Try again.")?,
            }
        }
    }

    fn events_menu(&mut self) -> Result<()> {
        loop {
            self.header("Events")?;
            writeln!(self.output, "1. Create event")?;
            writeln!(self.output, "2. List events")?;
            writeln!(self.output, "3. Edit event")?;
            writeln!(self.output, "4. Delete event")?;
            writeln!(self.output, "0. Back")?;
            writeln!(self.output)?;

            let result = match self.ask("Choose an option: ")?.as_str() {
                "1" => self.create_event(),
                "2" => self.list_events(),
                "3" => self.edit_event(),
                "4" => self.delete_event(),
                "0" => return Ok(()),
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    continue;
                }
            };
            self.report(result)?;
        }
    }

    fn guests_menu(&mut self) -> Result<()> {
        loop {
            self.header("Guests and invitations")?;
            writeln!(self.output, "1. Add guest and generate invitation")?;
            writeln!(self.output, "2. List guests of an event")?;
            writeln!(self.output, "3. List all guests")?;
            writeln!(self.output, "4. Edit guest")?;
            writeln!(self.output, "5. Delete guest")?;
            writeln!(self.output, "0. Back")?;
            writeln!(self.output)?;

            let result = match self.ask("Choose an option: ")?.as_str() {
                "1" => self.add_guest(),
                "2" => self.list_event_guests(),
                "3" => self.list_all_guests(),
                "4" => self.edit_guest(),
                "5" => self.delete_guest(),
                "0" => return Ok(()),
                _ => {
                    writeln!(self.output, "Invalid option. Try again.")?;
                    continue;
                }
            };
            self.report(result)?;
        }
    }

    // === Events ===

    fn create_event(&mut self) -> Result<()> {
        self.header("New event")?;
        let draft = EventDraft {
            name: self.required("Event name")?,
            location: self.optional("Location", None)?,
            date: self.optional_with("Date (DD-MM-YYYY)", None, parse_date)?,
            time: self.optional_with("Time (HH:MM)", None, parse_time)?,
            description: self.optional("Description", None)?,
        };

        let id = self.db.events().create(&draft)?;
        writeln!(self.output, "Event '{}' created (id {id}).", draft.name)?;
        Ok(())
    }

    fn list_events(&mut self) -> Result<()> {
        let events = self.db.events().list()?;
        if events.is_empty() {
            writeln!(self.output, "No events registered.")?;
            return Ok(());
        }
        tables::write_events(&mut self.output, &events, self.date_format)?;
        Ok(())
    }

    fn edit_event(&mut self) -> Result<()> {
        let Some(event) = self.select_event()? else {
            return self.cancelled();
        };

        writeln!(self.output, "Editing event: {}", event.name)?;
        writeln!(self.output, "Leave blank to keep the current value.")?;

        let current_date = event.date.map(|d| display_date(d, INPUT_DATE_FORMAT));
        let current_time = event.time.map(|t| t.format(TIME_FORMAT).to_string());
        let draft = EventDraft {
            name: self
                .optional(&with_current("Name", Some(&event.name)), None)?
                .unwrap_or_else(|| event.name.clone()),
            location: self.optional(
                &with_current("Location", event.location.as_deref()),
                event.location.clone(),
            )?,
            date: self.optional_with(
                &with_current("Date (DD-MM-YYYY)", current_date.as_deref()),
                event.date,
                parse_date,
            )?,
            time: self.optional_with(
                &with_current("Time (HH:MM)", current_time.as_deref()),
                event.time,
                parse_time,
            )?,
            description: self.optional(
                &with_current("Description", event.description.as_deref()),
                event.description.clone(),
            )?,
        };

        if self.db.events().update(event.id, &draft)? {
            writeln!(self.output, "Event updated.")?;
        } else {
            writeln!(self.output, "Event {} no longer exists.", event.id)?;
        }
        Ok(())
    }

    fn delete_event(&mut self) -> Result<()> {
        let Some(event) = self.select_event()? else {
            return self.cancelled();
        };

        let question = format!(
            "Delete event '{}' (id {}) and ALL of its guests? (y/N): ",
            event.name, event.id
        );
        if !self.confirm(&question)? {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(());
        }

        if self.db.events().delete(event.id)? {
            writeln!(self.output, "Event deleted.")?;
        } else {
            writeln!(self.output, "Event {} no longer exists.", event.id)?;
        }
        Ok(())
    }

    // === Guests ===

    fn add_guest(&mut self) -> Result<()> {
        writeln!(self.output, "Select the event for the new guest:")?;
        let Some(event) = self.select_event()? else {
            return self.cancelled();
        };

        writeln!(self.output, "Adding a guest to: {}", event.name)?;
        let draft = GuestDraft {
            name: self.required("Guest name")?,
            contact: self.optional_with("Email", None, parse_email)?,
            phone: self.optional("Phone", None)?,
            status: self
                .optional_with("Attendance (pending/present/absent) [pending]", None, parse_status)?
                .unwrap_or_default(),
        };

        let id = self.db.guests().create(event.id, &draft)?;
        writeln!(self.output, "Guest '{}' created (id {id}).", draft.name)?;

        if self.confirm("Generate the PDF invitation with QR code now? (y/N): ")? {
            self.generate_invitation(&event, id)?;
        }
        Ok(())
    }

    fn generate_invitation(&mut self, event: &Event, guest_id: GuestId) -> Result<()> {
        let Some(guest) = self.db.guests().get_by_id(guest_id)? else {
            writeln!(self.output, "Guest {guest_id} no longer exists.")?;
            return Ok(());
        };

        let kind = self.ask("QR code content (details/url) [details]: ")?;
        let payload = if kind.eq_ignore_ascii_case("url") {
            QrPayload::Url(self.required("URL for the QR code")?)
        } else {
            let text = QrPayload::Details.text(event, &guest).replace('\n', " | ");
            writeln!(self.output, "Using guest details for the QR code: {text}")?;
            QrPayload::Details
        };

        writeln!(self.output, "Generating invitation...")?;
        let files = self.invitations.generate(event, &guest, &payload)?;
        writeln!(self.output, "QR code:    {}", files.image.display())?;
        writeln!(self.output, "Invitation: {}", files.document.display())?;
        Ok(())
    }

    fn list_event_guests(&mut self) -> Result<()> {
        writeln!(self.output, "Select the event to list:")?;
        let Some(event) = self.select_event()? else {
            return self.cancelled();
        };

        let guests = self.db.guests().list_by_event(event.id)?;
        if guests.is_empty() {
            writeln!(self.output, "No guests registered for this event.")?;
            return Ok(());
        }
        writeln!(self.output, "Guests of {}:", event.name)?;
        tables::write_guests(&mut self.output, &guests)?;
        Ok(())
    }

    fn list_all_guests(&mut self) -> Result<()> {
        let guests = self.db.guests().list_all()?;
        if guests.is_empty() {
            writeln!(self.output, "No guests registered.")?;
            return Ok(());
        }
        tables::write_all_guests(&mut self.output, &guests)?;
        Ok(())
    }

    fn edit_guest(&mut self) -> Result<()> {
        let Some(guest) = self.select_guest()? else {
            return self.cancelled();
        };

        writeln!(
            self.output,
            "Editing guest: {} (event: {})",
            guest.name, guest.event_name
        )?;
        writeln!(self.output, "Leave blank to keep the current value.")?;

        let draft = GuestDraft {
            name: self
                .optional(&with_current("Name", Some(&guest.name)), None)?
                .unwrap_or_else(|| guest.name.clone()),
            contact: self.optional_with(
                &with_current("Email", guest.contact.as_deref()),
                guest.contact.clone(),
                parse_email,
            )?,
            phone: self.optional(
                &with_current("Phone", guest.phone.as_deref()),
                guest.phone.clone(),
            )?,
            status: self
                .optional_with(
                    &with_current(
                        "Attendance (pending/present/absent)",
                        Some(guest.status.as_str()),
                    ),
                    Some(guest.status),
                    parse_status,
                )?
                .unwrap_or(guest.status),
        };

        if self.db.guests().update(guest.id, &draft)? {
            writeln!(self.output, "Guest updated.")?;
        } else {
            writeln!(self.output, "Guest {} no longer exists.", guest.id)?;
        }
        Ok(())
    }

    fn delete_guest(&mut self) -> Result<()> {
        let Some(guest) = self.select_guest()? else {
            return self.cancelled();
        };

        let question = format!(
            "Delete guest '{}' (id {}) from event '{}'? (y/N): ",
            guest.name, guest.id, guest.event_name
        );
        if !self.confirm(&question)? {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(());
        }

        if self.db.guests().delete(guest.id)? {
            writeln!(self.output, "Guest deleted.")?;
        } else {
            writeln!(self.output, "Guest {} no longer exists.", guest.id)?;
        }
        Ok(())
    }

    // === Selection ===

    fn select_event(&mut self) -> Result<Option<Event>> {
        let events = self.db.events().list()?;
        if events.is_empty() {
            writeln!(self.output, "No events registered.")?;
            return Ok(None);
        }
        tables::write_events(&mut self.output, &events, self.date_format)?;

        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let chosen = self.select_id("Event id (0 to cancel): ", &ids)?;
        Ok(chosen.and_then(|id| events.into_iter().find(|e| e.id == id)))
    }

    fn select_guest(&mut self) -> Result<Option<Guest>> {
        let guests = self.db.guests().list_all()?;
        if guests.is_empty() {
            writeln!(self.output, "No guests registered.")?;
            return Ok(None);
        }
        tables::write_all_guests(&mut self.output, &guests)?;

        let ids: Vec<GuestId> = guests.iter().map(|g| g.id).collect();
        let chosen = self.select_id("Guest id (0 to cancel): ", &ids)?;
        Ok(chosen.and_then(|id| guests.into_iter().find(|g| g.id == id)))
    }

    /// Ask for one of `ids`; `0` cancels.
    fn select_id(&mut self, prompt: &str, ids: &[i64]) -> Result<Option<i64>> {
        loop {
            match self.ask(prompt)?.parse::<i64>() {
                Ok(0) => return Ok(None),
                Ok(id) if ids.contains(&id) => return Ok(Some(id)),
                Ok(_) => writeln!(self.output, "Invalid id.")?,
                Err(_) => writeln!(self.output, "The id must be a number.")?,
            }
        }
    }

    // === Prompts ===

    fn required(&mut self, label: &str) -> Result<String> {
        loop {
            if let Some(value) = self.ask_until(label, parse_text)? {
                return Ok(value);
            }
            writeln!(self.output, "This field is required.")?;
        }
    }

    fn optional(&mut self, label: &str, current: Option<String>) -> Result<Option<String>> {
        self.optional_with(label, current, parse_text)
    }

    /// Empty input keeps `current`.
    fn optional_with<T>(
        &mut self,
        label: &str,
        current: Option<T>,
        parse: impl Fn(&str) -> Parsed<T>,
    ) -> Result<Option<T>> {
        Ok(self.ask_until(label, parse)?.or(current))
    }

    /// Re-prompt until `parse` accepts the input; `None` for empty input.
    fn ask_until<T>(
        &mut self,
        label: &str,
        parse: impl Fn(&str) -> Parsed<T>,
    ) -> Result<Option<T>> {
        loop {
            let value = self.ask(&format!("{label}: "))?;
            if value.is_empty() {
                return Ok(None);
            }
            match parse(&value) {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(message) => writeln!(self.output, "Invalid input ({message}). Try again.")?,
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(question)?.to_lowercase();
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(line.trim().to_string())
    }

    // === Output ===

    fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", "=".repeat(40))?;
        writeln!(self.output, "{title:^40}")?;
        writeln!(self.output, "{}", "=".repeat(40))
    }

    fn cancelled(&mut self) -> Result<()> {
        writeln!(self.output, "Cancelled.")?;
        Ok(())
    }

    /// Print a failed action and carry on; only end of input propagates.
    fn report(&mut self, result: Result<()>) -> Result<()> {
        match result {
            Err(err) if is_end_of_input(&err) => Err(err),
            Err(err) => {
                debug!("Console action failed: {err}");
                writeln!(self.output, "Error: {err}")?;
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::Path;

    use crate::config::Config;
    use crate::storage::testing::test_database;

    use super::*;

    fn run_script(db: &Database, output_dir: &Path, script: &str) -> String {
        let mut config = Config::default();
        config.invitations.output_dir = Some(output_dir.to_path_buf());
        config.invitations.qr_module_pixels = 2;
        let service = InvitationService::from_config(&config);

        let mut console = Console::new(
            db,
            &service,
            "%d/%m/%Y",
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
        );
        console.run().unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_create_then_list_event() {
        let (dir, db) = test_database();
        let out = run_script(
            &db,
            dir.path(),
            "1\n1\nLaunch\nMain hall\n01-08-2025\n19:30\n\n2\n0\n0\n",
        );

        assert!(out.contains("Event 'Launch' created"));
        assert!(out.contains("01/08/2025"));
        assert!(out.contains("Goodbye."));

        let events = db.events().list().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 8, 1));
        assert_eq!(events[0].time, NaiveTime::from_hms_opt(19, 30, 0));
        assert_eq!(events[0].location.as_deref(), Some("Main hall"));
        assert!(events[0].description.is_none());
    }

    #[test]
    fn test_invalid_menu_option_continues() {
        let (dir, db) = test_database();
        let out = run_script(&db, dir.path(), "9\n1\n7\n0\n0\n");

        assert_eq!(out.matches("Invalid option").count(), 2);
        assert!(out.contains("Goodbye."));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let (dir, db) = test_database();
        let out = run_script(&db, dir.path(), "");
        assert!(out.contains("Choose an option"));

        // Mid-form: nothing is written
        run_script(&db, dir.path(), "1\n1\nLaunch\n");
        assert!(db.events().list().unwrap().is_empty());
    }

    #[test]
    fn test_required_field_reprompts() {
        let (dir, db) = test_database();
        let out = run_script(&db, dir.path(), "1\n1\n\n  \nLaunch\n\n\n\n\n0\n0\n");

        assert_eq!(out.matches("This field is required.").count(), 2);
        assert_eq!(db.events().list().unwrap()[0].name, "Launch");
    }

    #[test]
    fn test_invalid_date_and_time_reprompt() {
        let (dir, db) = test_database();
        let out = run_script(
            &db,
            dir.path(),
            "1\n1\nLaunch\n\n2025-08-01\n01-08-2025\n7pm\n19:00\n\n0\n0\n",
        );

        assert!(out.contains("expected DD-MM-YYYY"));
        assert!(out.contains("expected HH:MM"));
        let event = &db.events().list().unwrap()[0];
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 8, 1));
        assert_eq!(event.time, NaiveTime::from_hms_opt(19, 0, 0));
    }

    #[test]
    fn test_edit_event_keeps_blank_fields() {
        let (dir, db) = test_database();
        let id = db
            .events()
            .create(&EventDraft::new("Launch").with_location("Hall"))
            .unwrap();

        run_script(&db, dir.path(), &format!("1\n3\n{id}\nRelaunch\n\n\n\n\n0\n0\n"));

        let event = db.events().get_by_id(id).unwrap().unwrap();
        assert_eq!(event.name, "Relaunch");
        assert_eq!(event.location.as_deref(), Some("Hall"));
    }

    #[test]
    fn test_select_rejects_unknown_id_and_cancels() {
        let (dir, db) = test_database();
        db.events().create(&EventDraft::new("Launch")).unwrap();

        let out = run_script(&db, dir.path(), "1\n3\n999\nabc\n0\n0\n0\n");

        assert!(out.contains("Invalid id."));
        assert!(out.contains("The id must be a number."));
        assert!(out.contains("Cancelled."));
    }

    #[test]
    fn test_delete_event_requires_confirmation() {
        let (dir, db) = test_database();
        let id = db.events().create(&EventDraft::new("Launch")).unwrap();

        let out = run_script(&db, dir.path(), &format!("1\n4\n{id}\n\n0\n0\n"));
        assert!(out.contains("ALL of its guests"));
        assert!(out.contains("Deletion cancelled."));
        assert!(db.events().exists(id).unwrap());

        run_script(&db, dir.path(), &format!("1\n4\n{id}\ny\n0\n0\n"));
        assert!(!db.events().exists(id).unwrap());
    }

    #[test]
    fn test_add_guest_without_invitation() {
        let (dir, db) = test_database();
        let event = db.events().create(&EventDraft::new("Launch")).unwrap();

        let out = run_script(
            &db,
            dir.path(),
            &format!(
                "2\n1\n{event}\nAna\nnot-an-email\nana@x.com\n555-0100\nmaybe\npresent\nn\n0\n0\n"
            ),
        );

        assert!(out.contains("Invalid input (expected an address"));
        assert!(out.contains("'maybe' is not one of"));
        let guests = db.guests().list_by_event(event).unwrap();
        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].contact.as_deref(), Some("ana@x.com"));
        assert_eq!(guests[0].phone.as_deref(), Some("555-0100"));
        assert_eq!(guests[0].status, AttendanceStatus::Present);
    }

    #[test]
    fn test_add_guest_with_invitation() {
        let (dir, db) = test_database();
        let event = db.events().create(&EventDraft::new("Launch")).unwrap();

        let out = run_script(
            &db,
            dir.path(),
            &format!("2\n1\n{event}\nAna Souza\n\n\n\ny\n\n0\n0\n"),
        );

        let guest = &db.guests().list_by_event(event).unwrap()[0];
        assert_eq!(guest.status, AttendanceStatus::Pending);
        assert!(out.contains(
            "Using guest details for the QR code: Event: Launch | Guest: Ana Souza"
        ));

        let stem = format!("event_{event}_guest_{}_ana_souza", guest.id);
        assert!(dir.path().join("qrcodes").join(format!("{stem}.png")).exists());
        assert!(dir.path().join("invitations").join(format!("{stem}.pdf")).exists());
    }

    #[test]
    fn test_duplicate_contact_is_reported_and_loop_continues() {
        let (dir, db) = test_database();
        let event = db.events().create(&EventDraft::new("Launch")).unwrap();
        db.guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();

        let out = run_script(
            &db,
            dir.path(),
            &format!("2\n1\n{event}\nBea\nana@x.com\n\n\n3\n0\n0\n"),
        );

        assert!(out.contains("Error: contact 'ana@x.com' is already registered"));
        assert!(out.contains("Ana"));
        assert_eq!(db.guests().list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_edit_guest_status() {
        let (dir, db) = test_database();
        let event = db.events().create(&EventDraft::new("Launch")).unwrap();
        let id = db
            .guests()
            .create(event, &GuestDraft::new("Ana").with_contact("ana@x.com"))
            .unwrap();

        run_script(&db, dir.path(), &format!("2\n4\n{id}\n\n\n\nABSENT\n0\n0\n"));

        let guest = db.guests().get_by_id(id).unwrap().unwrap();
        assert_eq!(guest.status, AttendanceStatus::Absent);
        assert_eq!(guest.contact.as_deref(), Some("ana@x.com"));
        assert_eq!(guest.name, "Ana");
    }

    #[test]
    fn test_list_guests_of_event_and_delete_guest() {
        let (dir, db) = test_database();
        let event = db.events().create(&EventDraft::new("Launch")).unwrap();
        let id = db.guests().create(event, &GuestDraft::new("Ana")).unwrap();

        let out = run_script(
            &db,
            dir.path(),
            &format!("2\n2\n{event}\n5\n{id}\nyes\n2\n{event}\n0\n0\n"),
        );

        assert!(out.contains("Guests of Launch:"));
        assert!(out.contains("Guest deleted."));
        assert!(out.contains("No guests registered for this event."));
    }

    #[test]
    fn test_empty_registry_messages() {
        let (dir, db) = test_database();
        let out = run_script(&db, dir.path(), "1\n2\n0\n2\n3\n1\n0\n0\n");

        assert!(out.contains("No events registered."));
        assert!(out.contains("No guests registered."));
        assert!(out.contains("Cancelled."));
    }

    #[test]
    fn test_with_current() {
        assert_eq!(with_current("Phone", None), "Phone [-]");
        assert_eq!(with_current("Name", Some("Ana")), "Name [Ana]");
    }
}
