//! `guestlist` - A terminal registry for events and their guests
//!
//! This library provides the event and guest repositories over a local SQLite
//! file, QR-code PDF invitations, and the interactive console used by the
//! `guestlist` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod invite;
pub mod logging;
pub mod model;
pub mod storage;

pub use config::Config;
pub use console::Console;
pub use error::{Error, Result};
pub use invite::{InvitationFiles, InvitationService, QrPayload};
pub use logging::init_logging;
pub use model::{AttendanceStatus, Event, EventDraft, EventId, Guest, GuestDraft, GuestId};
pub use storage::{Database, EventRepository, GuestRepository, StorageStats};
