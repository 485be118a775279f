//! Command-line interface for guestlist.
//!
//! This module provides the CLI structure for the `guestlist` binary. The
//! handlers live in the binary itself.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, EventCommand, GuestCommand, OutputFormat, StatusCommand};

/// guestlist - Keep track of events and who is coming
///
/// A single-user registry of events and their guests, with QR-code PDF
/// invitations and an interactive menu.
#[derive(Debug, Parser)]
#[command(name = "guestlist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage events
    #[command(subcommand)]
    Event(EventCommand),

    /// Manage guests and invitations
    #[command(subcommand)]
    Guest(GuestCommand),

    /// Open the interactive menu
    Menu,

    /// Show database location and record counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
