//! Fixed-width tables shared by the console and the CLI.

use std::io::{self, Write};

use crate::model::{display_date, Event, Guest};
use crate::storage::TIME_FORMAT;

const NOT_SET: &str = "-";

/// Write events as `ID  Name  Location  Date  Time`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_events(out: &mut impl Write, events: &[Event], date_format: &str) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<30} {:<20} {:<12} {:<6}",
        "ID", "Name", "Location", "Date", "Time"
    )?;
    writeln!(out, "{}", "-".repeat(77))?;
    for event in events {
        let date = event
            .date
            .map_or_else(|| NOT_SET.to_string(), |d| display_date(d, date_format));
        let time = event
            .time
            .map_or_else(|| NOT_SET.to_string(), |t| t.format(TIME_FORMAT).to_string());
        writeln!(
            out,
            "{:<5} {:<30} {:<20} {:<12} {:<6}",
            event.id,
            event.name,
            event.location.as_deref().unwrap_or(NOT_SET),
            date,
            time
        )?;
    }
    Ok(())
}

/// Write guests of a single event as `ID  Name  Email  Phone  Status`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_guests(out: &mut impl Write, guests: &[Guest]) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<30} {:<30} {:<15} {:<8}",
        "ID", "Name", "Email", "Phone", "Status"
    )?;
    writeln!(out, "{}", "-".repeat(92))?;
    for guest in guests {
        writeln!(
            out,
            "{:<5} {:<30} {:<30} {:<15} {:<8}",
            guest.id,
            guest.name,
            guest.contact.as_deref().unwrap_or(NOT_SET),
            guest.phone.as_deref().unwrap_or(NOT_SET),
            guest.status
        )?;
    }
    Ok(())
}

/// Write guests across events, adding the owning event's name.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_all_guests(out: &mut impl Write, guests: &[Guest]) -> io::Result<()> {
    writeln!(
        out,
        "{:<5} {:<25} {:<25} {:<15} {:<8} {:<20}",
        "ID", "Name", "Email", "Phone", "Status", "Event"
    )?;
    writeln!(out, "{}", "-".repeat(103))?;
    for guest in guests {
        writeln!(
            out,
            "{:<5} {:<25} {:<25} {:<15} {:<8} {:<20}",
            guest.id,
            guest.name,
            guest.contact.as_deref().unwrap_or(NOT_SET),
            guest.phone.as_deref().unwrap_or(NOT_SET),
            guest.status,
            format!("{} (#{})", guest.event_name, guest.event_id)
        )?;
    }
    Ok(())
}

/// Write one event as `label: value` lines.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_event_details(
    out: &mut impl Write,
    event: &Event,
    date_format: &str,
) -> io::Result<()> {
    writeln!(out, "ID:          {}", event.id)?;
    writeln!(out, "Name:        {}", event.name)?;
    writeln!(
        out,
        "Location:    {}",
        event.location.as_deref().unwrap_or(NOT_SET)
    )?;
    writeln!(
        out,
        "Date:        {}",
        event
            .date
            .map_or_else(|| NOT_SET.to_string(), |d| display_date(d, date_format))
    )?;
    writeln!(
        out,
        "Time:        {}",
        event
            .time
            .map_or_else(|| NOT_SET.to_string(), |t| t.format(TIME_FORMAT).to_string())
    )?;
    writeln!(
        out,
        "Description: {}",
        event.description.as_deref().unwrap_or(NOT_SET)
    )
}

/// Write one guest as `label: value` lines.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_guest_details(out: &mut impl Write, guest: &Guest) -> io::Result<()> {
    writeln!(out, "ID:     {}", guest.id)?;
    writeln!(out, "Name:   {}", guest.name)?;
    writeln!(out, "Event:  {} (#{})", guest.event_name, guest.event_id)?;
    writeln!(out, "Email:  {}", guest.contact.as_deref().unwrap_or(NOT_SET))?;
    writeln!(out, "Phone:  {}", guest.phone.as_deref().unwrap_or(NOT_SET))?;
    writeln!(out, "Status: {}", guest.status)
}
