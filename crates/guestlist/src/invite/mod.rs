//! Invitation artifacts for guests.
//!
//! An invitation is two files: a QR image that identifies the guest at the
//! door, and a one-page document that embeds the image next to the event
//! details. Both are produced behind small traits so the backends can be
//! swapped or faked:
//!
//! - [`ImageEncoder`] turns a text payload into an image file.
//! - [`DocumentRenderer`] lays out the invitation around that image.
//!
//! [`InvitationService`] wires the two together and derives the file names.
//!
//! # Example
//!
//! ```no_run
//! use guestlist::invite::{InvitationService, QrPayload};
//! use guestlist::{Config, Database};
//!
//! # fn main() -> guestlist::Result<()> {
//! let config = Config::load()?;
//! let db = Database::open(config.database_path())?;
//! let service = InvitationService::from_config(&config);
//!
//! if let Some(guest) = db.guests().get_by_id(1)? {
//!     if let Some(event) = db.events().get_by_id(guest.event_id)? {
//!         let files = service.generate(&event, &guest, &QrPayload::Details)?;
//!         println!("{}", files.document.display());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod pdf;
mod qr;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Event, Guest};

pub use pdf::PdfRenderer;
pub use qr::QrCodeEncoder;

/// Produces an image file from a text payload.
pub trait ImageEncoder: fmt::Debug {
    /// Encode `payload` and write it as `<output_name>` plus the encoder's
    /// extension. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImageEncode`] if the payload cannot be encoded or the
    /// file cannot be written.
    fn encode(&self, payload: &str, output_name: &str) -> Result<PathBuf>;
}

/// Produces an invitation document for one guest.
pub trait DocumentRenderer: fmt::Debug {
    /// Render the invitation, embedding the image at `image_path`. Returns the
    /// path written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentRender`] if the document cannot be written.
    fn render(
        &self,
        event: &Event,
        guest: &Guest,
        image_path: &Path,
        output_name: &str,
    ) -> Result<PathBuf>;
}

/// What the QR code carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayload {
    /// Event name, guest name and guest id, one per line.
    Details,
    /// A URL, e.g. a check-in link.
    Url(String),
}

impl QrPayload {
    /// The text to encode for this guest.
    #[must_use]
    pub fn text(&self, event: &Event, guest: &Guest) -> String {
        match self {
            Self::Details => format!(
                "Event: {}\nGuest: {}\nGuest ID: {}",
                event.name, guest.name, guest.id
            ),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Paths of the files produced for one invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvitationFiles {
    /// The QR image.
    pub image: PathBuf,
    /// The invitation document.
    pub document: PathBuf,
}

/// Generates QR images and invitation documents.
#[derive(Debug)]
pub struct InvitationService {
    encoder: Box<dyn ImageEncoder>,
    renderer: Box<dyn DocumentRenderer>,
}

impl InvitationService {
    /// Create a service from explicit backends.
    #[must_use]
    pub fn new(encoder: Box<dyn ImageEncoder>, renderer: Box<dyn DocumentRenderer>) -> Self {
        Self { encoder, renderer }
    }

    /// Create the QR + PDF service described by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let output_dir = config.output_dir();
        Self::new(
            Box::new(QrCodeEncoder::new(
                output_dir.join("qrcodes"),
                config.invitations.qr_module_pixels,
            )),
            Box::new(PdfRenderer::new(
                output_dir.join("invitations"),
                config.display.date_format.clone(),
            )),
        )
    }

    /// Produce the QR image and the invitation document for `guest`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `guest` does not belong to `event`, or
    /// the encoder's or renderer's error.
    pub fn generate(
        &self,
        event: &Event,
        guest: &Guest,
        payload: &QrPayload,
    ) -> Result<InvitationFiles> {
        if guest.event_id != event.id {
            return Err(Error::validation(
                "guest",
                format!("guest {} belongs to event {}, not {}", guest.id, guest.event_id, event.id),
            ));
        }

        if let QrPayload::Url(url) = payload {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                warn!("QR payload {:?} does not look like an http(s) URL", url);
            }
        }

        let name = file_stem(event, guest);
        let image = self.encoder.encode(&payload.text(event, guest), &name)?;
        let document = self.renderer.render(event, guest, &image, &name)?;

        info!("Generated invitation for guest {} ({})", guest.id, guest.name);
        Ok(InvitationFiles { image, document })
    }
}

/// Base name shared by a guest's image and document.
///
/// `event_<event id>_guest_<guest id>_<name>` with the name lowercased and
/// whitespace replaced by underscores. Path separators are replaced too so the
/// name always stays inside the output directory.
#[must_use]
pub fn file_stem(event: &Event, guest: &Guest) -> String {
    let slug: String = guest
        .name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("event_{}_guest_{}_{slug}", event.id, guest.id)
}

/// Create `dir` if needed, mapping failure the way the store does.
fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
        path: dir.to_path_buf(),
        source,
    })
}
