//! Core record types for guestlist.
//!
//! This module defines the plain data structures exchanged between the
//! repositories and their callers: persisted [`Event`] and [`Guest`] records,
//! the [`EventDraft`] and [`GuestDraft`] inputs used for create and update,
//! and the [`AttendanceStatus`] enumeration.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier assigned to an event by the store.
pub type EventId = i64;

/// Identifier assigned to a guest by the store.
pub type GuestId = i64;

/// Whether a guest has shown up.
///
/// Any status may move to any other through an update; `Pending` is the
/// default for new guests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// No answer yet.
    #[default]
    Pending,
    /// The guest attended.
    Present,
    /// The guest did not attend.
    Absent,
}

impl AttendanceStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Present, Self::Absent];

    /// The spelling persisted in the `status` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = Error;

    /// Parse a status, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::validation(
                    "status",
                    format!("'{s}' is not one of pending, present, absent"),
                )
            })
    }
}

/// Treat blank optional text as absent. Anything else is kept as given.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Shape accepted for guest emails: `local@domain.tld`.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s.]+$";

/// Check that `value` looks like an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("Invalid regex pattern"))
        .is_match(value.trim())
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("name", "must not be empty"));
    }
    Ok(())
}

/// Format a date for people, falling back to ISO form if `format` is unusable.
#[must_use]
pub fn display_date(date: NaiveDate, format: &str) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        return date.to_string();
    }
    out
}

/// Drop seconds and sub-seconds; times are kept at minute precision.
fn minute_precision(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// The mutable fields of an event, used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Event name (required, non-blank).
    pub name: String,
    /// Where the event takes place.
    pub location: Option<String>,
    /// Calendar date.
    pub date: Option<NaiveDate>,
    /// Time of day, minute precision.
    pub time: Option<NaiveTime>,
    /// Free-form description.
    pub description: Option<String>,
}

impl EventDraft {
    /// Start a draft with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the time of day. Seconds are discarded.
    #[must_use]
    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(minute_precision(time));
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the draft can be persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name is blank or the time carries
    /// seconds, which the store cannot keep.
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)?;
        match self.time {
            Some(time) if time != minute_precision(time) => Err(Error::validation(
                "time",
                format!("{time} has seconds; use HH:MM"),
            )),
            _ => Ok(()),
        }
    }
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Store-assigned identifier.
    pub id: EventId,
    /// Event name.
    pub name: String,
    /// Where the event takes place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Calendar date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Time of day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Copy the mutable fields into a draft, e.g. to edit a few of them.
    #[must_use]
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            location: self.location.clone(),
            date: self.date,
            time: self.time,
            description: self.description.clone(),
        }
    }
}

/// The mutable fields of a guest, used for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDraft {
    /// Guest name (required, non-blank).
    pub name: String,
    /// Contact identifier, usually an email. Unique across all guests.
    pub contact: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Attendance status.
    pub status: AttendanceStatus,
}

impl GuestDraft {
    /// Start a pending guest draft with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the contact identifier.
    #[must_use]
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Set the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the attendance status.
    #[must_use]
    pub fn with_status(mut self, status: AttendanceStatus) -> Self {
        self.status = status;
        self
    }

    /// Check the draft can be persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the name is blank.
    pub fn validate(&self) -> Result<()> {
        require_name(&self.name)
    }
}

/// A persisted guest, annotated with its owning event's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    /// Store-assigned identifier.
    pub id: GuestId,
    /// Owning event.
    pub event_id: EventId,
    /// Name of the owning event, joined on read.
    pub event_name: String,
    /// Guest name.
    pub name: String,
    /// Contact identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Attendance status.
    pub status: AttendanceStatus,
}

impl Guest {
    /// Copy the mutable fields into a draft.
    #[must_use]
    pub fn to_draft(&self) -> GuestDraft {
        GuestDraft {
            name: self.name.clone(),
            contact: self.contact.clone(),
            phone: self.phone.clone(),
            status: self.status,
        }
    }
}
