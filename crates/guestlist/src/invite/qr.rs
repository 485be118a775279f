//! QR image encoding.

use std::path::PathBuf;

use image::Luma;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use super::{ensure_dir, ImageEncoder};
use crate::error::{Error, Result};

/// Writes QR codes as grayscale PNG files.
#[derive(Debug, Clone)]
pub struct QrCodeEncoder {
    output_dir: PathBuf,
    module_pixels: u32,
}

impl QrCodeEncoder {
    /// Write images into `output_dir`, drawing each module as a
    /// `module_pixels` square.
    #[must_use]
    pub fn new(output_dir: PathBuf, module_pixels: u32) -> Self {
        Self {
            output_dir,
            module_pixels: module_pixels.max(1),
        }
    }
}

impl ImageEncoder for QrCodeEncoder {
    fn encode(&self, payload: &str, output_name: &str) -> Result<PathBuf> {
        ensure_dir(&self.output_dir)?;

        // Low error correction keeps the symbol small for short payloads
        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)
            .map_err(|e| Error::image_encode(output_name, e))?;

        let image = code
            .render::<Luma<u8>>()
            .quiet_zone(true)
            .module_dimensions(self.module_pixels, self.module_pixels)
            .build();

        let path = self.output_dir.join(format!("{output_name}.png"));
        image
            .save(&path)
            .map_err(|e| Error::image_encode(output_name, e))?;

        debug!(
            "Wrote QR image {} ({}x{} px)",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(path)
    }
}
