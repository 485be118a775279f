//! Error types for guestlist.
//!
//! This module defines all error types used throughout the guestlist crate.
//! Repository operations never leak a raw store failure for a business-rule
//! violation: unique, foreign-key and check constraint failures are translated
//! into [`Error::DuplicateContact`], [`Error::EventNotFound`] and
//! [`Error::Validation`] before they reach the caller.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for guestlist operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Connection Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Record Errors ===
    /// A value is outside its allowed domain.
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Description of the validation failure.
        message: String,
    },

    /// The referenced event does not exist.
    #[error("event {id} not found")]
    EventNotFound {
        /// The event id that was looked up.
        id: i64,
    },

    /// Another guest already uses this contact.
    #[error("contact '{contact}' is already registered to another guest")]
    DuplicateContact {
        /// The colliding contact identifier.
        contact: String,
    },

    /// Any other store-level failure.
    #[error("database query failed: {0}")]
    Persistence(#[from] rusqlite::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Invitation Errors ===
    /// The QR image could not be produced.
    #[error("failed to encode QR image '{name}': {message}")]
    ImageEncode {
        /// Base name of the image being written.
        name: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The invitation document could not be produced.
    #[error("failed to render invitation '{name}': {message}")]
    DocumentRender {
        /// Base name of the document being written.
        name: String,
        /// Description of what went wrong.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for guestlist operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create an image encoding error.
    #[must_use]
    pub fn image_encode(name: impl Into<String>, message: impl ToString) -> Self {
        Self::ImageEncode {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Create a document rendering error.
    #[must_use]
    pub fn document_render(name: impl Into<String>, message: impl ToString) -> Self {
        Self::DocumentRender {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Check if this error reports a missing parent event.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EventNotFound { .. })
    }

    /// Check if this error is a unique-contact collision.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateContact { .. })
    }

    /// Check if this error is a rejected value.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the store could not be reached or created.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::DatabaseOpen { .. } | Self::DirectoryCreate { .. })
    }
}
