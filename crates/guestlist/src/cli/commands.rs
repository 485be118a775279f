//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::model::{is_valid_email, AttendanceStatus, EventId, GuestId};

/// Event commands.
#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Create a new event
    Create {
        /// Event name
        name: String,

        /// Where the event takes place
        #[arg(short, long)]
        location: Option<String>,

        /// Date (YYYY-MM-DD or DD-MM-YYYY)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Time of day (HH:MM)
        #[arg(short, long, value_parser = parse_time)]
        time: Option<NaiveTime>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// List all events, most recent first
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one event
    Show {
        /// Event id
        id: EventId,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Change fields of an event; omitted fields keep their value
    Update {
        /// Event id
        id: EventId,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New location (empty string clears it)
        #[arg(short, long)]
        location: Option<String>,

        /// New date (YYYY-MM-DD or DD-MM-YYYY)
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// New time of day (HH:MM)
        #[arg(short, long, value_parser = parse_time)]
        time: Option<NaiveTime>,

        /// New description (empty string clears it)
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an event and all of its guests
    Delete {
        /// Event id
        id: EventId,
    },
}

/// Guest commands.
#[derive(Debug, Subcommand)]
pub enum GuestCommand {
    /// Add a guest to an event
    Add {
        /// Owning event id
        #[arg(short, long)]
        event: EventId,

        /// Guest name
        name: String,

        /// Email address, unique across all guests
        #[arg(long, value_parser = parse_email)]
        email: Option<String>,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Attendance status
        #[arg(short, long, value_parser = parse_status, default_value = "pending")]
        status: AttendanceStatus,

        /// Also generate the QR code and PDF invitation
        #[arg(short, long)]
        invite: bool,

        /// Encode this URL in the QR code instead of the guest details
        #[arg(long, requires = "invite")]
        url: Option<String>,
    },

    /// List guests, of one event or of all events
    List {
        /// Only guests of this event
        #[arg(short, long)]
        event: Option<EventId>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one guest
    Show {
        /// Guest id
        id: GuestId,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Change fields of a guest; omitted fields keep their value
    Update {
        /// Guest id
        id: GuestId,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New email address
        #[arg(long, value_parser = parse_email)]
        email: Option<String>,

        /// New phone number (empty string clears it)
        #[arg(short, long)]
        phone: Option<String>,

        /// New attendance status
        #[arg(short, long, value_parser = parse_status)]
        status: Option<AttendanceStatus>,
    },

    /// Delete a guest
    Delete {
        /// Guest id
        id: GuestId,
    },

    /// Generate the QR code and PDF invitation for a guest
    Invite {
        /// Guest id
        id: GuestId,

        /// Encode this URL in the QR code instead of the guest details
        #[arg(long)]
        url: Option<String>,
    },
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .map_err(|_| format!("'{value}' is not a date (use YYYY-MM-DD or DD-MM-YYYY)"))
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("'{value}' is not a time (use HH:MM)"))
}

fn parse_email(value: &str) -> Result<String, String> {
    if is_valid_email(value) {
        Ok(value.trim().to_string())
    } else {
        Err(format!("'{value}' is not an email address"))
    }
}

fn parse_status(value: &str) -> Result<AttendanceStatus, String> {
    value.parse().map_err(|e: crate::Error| e.to_string())
}
