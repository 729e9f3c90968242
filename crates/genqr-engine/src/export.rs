//! Lossless PNG export of a finished surface.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::EncodingError;

/// Encode the surface as PNG bytes.
pub fn encode(surface: RgbaImage) -> Result<Vec<u8>, EncodingError> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodingError::EmptySurface { width, height });
    }

    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(surface).write_to(&mut cursor, ImageFormat::Png)?;
    let bytes = cursor.into_inner();
    debug!(width, height, bytes = bytes.len(), "Encoded PNG");
    Ok(bytes)
}
