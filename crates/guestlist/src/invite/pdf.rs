//! One-page PDF invitations.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rgb,
};
use tracing::{debug, warn};

use super::{ensure_dir, DocumentRenderer};
use crate::error::{Error, Result};
use crate::model::{display_date, Event, Guest};
use crate::storage::TIME_FORMAT;

/// US letter, in millimetres.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;

const INCH: f32 = 25.4;
const LINE_HEIGHT: f32 = 0.25 * INCH;
const QR_SIZE: f32 = 2.0 * INCH;
const IMAGE_DPI: f32 = 300.0;

/// Bottom-left corner of the QR code, bottom right of the page.
const QR_ORIGIN: (f32, f32) = (PAGE_WIDTH - 3.0 * INCH, INCH);
/// Where the error line goes when the QR image cannot be read.
const MISSING_IMAGE_ORIGIN: (f32, f32) = (INCH, INCH);

/// Millimetres per typographic point.
const MM_PER_PT: f32 = 0.3528;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

/// Lays out invitations as single-page PDF documents.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    output_dir: PathBuf,
    date_format: String,
}

impl PdfRenderer {
    /// Write documents into `output_dir`, showing dates with `date_format`.
    #[must_use]
    pub fn new(output_dir: PathBuf, date_format: String) -> Self {
        Self {
            output_dir,
            date_format,
        }
    }

    fn date_line(&self, event: &Event) -> String {
        match event.date {
            Some(date) => format!("Date: {}", display_date(date, &self.date_format)),
            None => "Date: Date not set".to_string(),
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    #[allow(clippy::cast_precision_loss)]
    fn render(
        &self,
        event: &Event,
        guest: &Guest,
        image_path: &Path,
        output_name: &str,
    ) -> Result<PathBuf> {
        ensure_dir(&self.output_dir)?;
        let fail = |e: printpdf::Error| Error::document_render(output_name, e);

        let (doc, page, layer) = PdfDocument::new(
            format!("Invitation - {}", event.name),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            "Invitation",
        );
        let layer = doc.get_page(page).get_layer(layer);
        let fonts = load_fonts(&doc).map_err(fail)?;

        // Title
        let title_size = 24.0;
        layer.use_text(
            event.name.as_str(),
            title_size,
            Mm(centered_x(&event.name, title_size)),
            Mm(PAGE_HEIGHT - 1.5 * INCH),
            &fonts.bold,
        );

        // Details
        let time = event.time.map_or_else(
            || "Time not set".to_string(),
            |t| t.format(TIME_FORMAT).to_string(),
        );
        let location = event.location.as_deref().unwrap_or("Location not set");
        let mut y = PAGE_HEIGHT - 2.5 * INCH;
        for line in [
            self.date_line(event),
            format!("Time: {time}"),
            format!("Location: {location}"),
        ] {
            layer.use_text(line, 12.0, Mm(INCH), Mm(y), &fonts.regular);
            y -= LINE_HEIGHT;
        }

        // Guest
        y -= 0.5 * LINE_HEIGHT;
        layer.use_text("Guest:", 14.0, Mm(INCH), Mm(y), &fonts.oblique);
        y -= 0.8 * LINE_HEIGHT;
        layer.use_text(guest.name.as_str(), 16.0, Mm(1.2 * INCH), Mm(y), &fonts.bold);

        // QR code
        let (qr_x, qr_y) = QR_ORIGIN;
        match image::open(image_path) {
            Ok(qr) => {
                let scale = QR_SIZE / (qr.width() as f32 / IMAGE_DPI * INCH);
                Image::from_dynamic_image(&qr).add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(qr_x)),
                        translate_y: Some(Mm(qr_y)),
                        scale_x: Some(scale),
                        scale_y: Some(scale),
                        dpi: Some(IMAGE_DPI),
                        ..Default::default()
                    },
                );
                let caption = "Present this QR code at the entrance";
                let caption_size = 8.0;
                layer.use_text(
                    caption,
                    caption_size,
                    Mm(PAGE_WIDTH - INCH - text_width(caption, caption_size)),
                    Mm(0.8 * INCH),
                    &fonts.regular,
                );
            }
            Err(e) => {
                warn!("Could not load QR image {}: {}", image_path.display(), e);
                draw_missing_image(&layer, &fonts.regular);
            }
        }

        // Footer
        let footer = "This invitation is personal and non-transferable.";
        let footer_size = 9.0;
        layer.use_text(
            footer,
            footer_size,
            Mm(centered_x(footer, footer_size)),
            Mm(0.75 * INCH),
            &fonts.oblique,
        );

        let path = self.output_dir.join(format!("{output_name}.pdf"));
        let file = File::create(&path).map_err(|e| Error::document_render(output_name, e))?;
        doc.save(&mut BufWriter::new(file)).map_err(fail)?;

        debug!("Wrote invitation {}", path.display());
        Ok(path)
    }
}

fn load_fonts(doc: &PdfDocumentReference) -> std::result::Result<Fonts, printpdf::Error> {
    Ok(Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        oblique: doc.add_builtin_font(BuiltinFont::HelveticaOblique)?,
    })
}

fn draw_missing_image(layer: &PdfLayerReference, font: &IndirectFontRef) {
    let (x, y) = MISSING_IMAGE_ORIGIN;
    layer.set_fill_color(Color::Rgb(Rgb::new(1.0, 0.0, 0.0, None)));
    layer.use_text("Could not load QR code.", 10.0, Mm(x), Mm(y), font);
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
}

/// Rough Helvetica width: half an em per character.
#[allow(clippy::cast_precision_loss)]
fn text_width(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.5 * MM_PER_PT
}

fn centered_x(text: &str, size_pt: f32) -> f32 {
    ((PAGE_WIDTH - text_width(text, size_pt)) / 2.0).max(INCH / 2.0)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::super::testing::{sample_event, sample_guest};
    use super::super::{ImageEncoder, QrCodeEncoder};
    use super::*;

    fn renderer(dir: &TempDir) -> PdfRenderer {
        PdfRenderer::new(dir.path().join("invitations"), "%d/%m/%Y".to_string())
    }

    #[test]
    fn test_render_with_image() {
        let dir = TempDir::new().unwrap();
        let image = QrCodeEncoder::new(dir.path().join("qrcodes"), 4)
            .encode("Guest ID: 4", "event_1_guest_4_ana_souza")
            .unwrap();

        let path = renderer(&dir)
            .render(
                &sample_event(),
                &sample_guest(),
                &image,
                "event_1_guest_4_ana_souza",
            )
            .unwrap();

        assert_eq!(
            path,
            dir.path()
                .join("invitations")
                .join("event_1_guest_4_ana_souza.pdf")
        );
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_without_image_still_writes_document() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.png");

        let path = renderer(&dir)
            .render(&sample_event(), &sample_guest(), &missing, "no_image")
            .unwrap();

        assert!(std::fs::read(path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_event_without_details() {
        let dir = TempDir::new().unwrap();
        let mut event = sample_event();
        event.date = None;
        event.time = None;
        event.location = None;

        let path = renderer(&dir)
            .render(&event, &sample_guest(), &dir.path().join("nope.png"), "bare")
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_date_line_uses_configured_format() {
        let dir = TempDir::new().unwrap();
        let mut event = sample_event();
        assert_eq!(renderer(&dir).date_line(&event), "Date: 01/08/2025");

        event.date = None;
        assert_eq!(renderer(&dir).date_line(&event), "Date: Date not set");
    }

    #[test]
    fn test_missing_image_line_sits_at_bottom_left_margin() {
        assert_eq!(MISSING_IMAGE_ORIGIN, (INCH, INCH));
        assert!(MISSING_IMAGE_ORIGIN.0 + text_width("Could not load QR code.", 10.0) < QR_ORIGIN.0);
        assert_eq!(QR_ORIGIN.1, MISSING_IMAGE_ORIGIN.1);
    }

    #[test]
    fn test_centered_x_stays_on_page() {
        assert!(centered_x("Launch", 24.0) > INCH);
        assert!((centered_x(&"W".repeat(500), 24.0) - INCH / 2.0).abs() < f32::EPSILON);
    }
}
