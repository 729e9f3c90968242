//! Profile photo acquisition: decoding, cover cropping and the placeholder.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut};
use tracing::{debug, warn};

use crate::ResourceError;
use crate::config::PhotoSource;

const PLACEHOLDER_SIZE: u32 = 160;
const PLACEHOLDER_DISC: Rgba<u8> = Rgba([0xe2, 0xe8, 0xf0, 255]);
const PLACEHOLDER_FIGURE: Rgba<u8> = Rgba([0x94, 0xa3, 0xb8, 255]);

/// Source rectangle selected by a cover crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Decode a photo, sniffing PNG/JPEG/WebP from the bytes.
pub fn decode(source: &PhotoSource) -> Result<DynamicImage, ResourceError> {
    let bytes = match source {
        PhotoSource::Bytes(b) => std::borrow::Cow::Borrowed(b.as_slice()),
        PhotoSource::DataUri(uri) => std::borrow::Cow::Owned(decode_data_uri(uri)?),
    };
    image::load_from_memory(&bytes).map_err(|e| ResourceError::PhotoDecode(e.to_string()))
}

/// Decode `source`, substituting the placeholder silhouette on any failure.
pub fn load_or_placeholder(source: Option<&PhotoSource>) -> DynamicImage {
    let Some(source) = source else {
        return placeholder();
    };
    match decode(source) {
        Ok(img) => {
            debug!(w = img.width(), h = img.height(), "Decoded profile photo");
            img
        }
        Err(e) => {
            warn!("Using placeholder photo: {e}");
            placeholder()
        }
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ResourceError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ResourceError::PhotoDecode("not a data URI".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ResourceError::PhotoDecode("data URI has no payload".into()))?;
    if !meta.ends_with(";base64") {
        return Err(ResourceError::PhotoDecode(
            "only base64 data URIs are supported".into(),
        ));
    }
    BASE64
        .decode(payload.trim())
        .map_err(|e| ResourceError::PhotoDecode(format!("invalid base64: {e}")))
}

/// Built-in silhouette used when no usable photo is supplied.
pub fn placeholder() -> DynamicImage {
    let mut img = RgbaImage::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE);
    draw_filled_circle_mut(&mut img, (80, 80), 80, PLACEHOLDER_DISC);
    draw_filled_circle_mut(&mut img, (80, 60), 25, PLACEHOLDER_FIGURE);
    draw_filled_ellipse_mut(&mut img, (80, 130), 45, 35, PLACEHOLDER_FIGURE);
    DynamicImage::ImageRgba8(img)
}

/// Largest centered source rectangle with the destination's aspect ratio.
///
/// A source wider than the target keeps its full height and loses its left
/// and right edges; otherwise the full width is kept and top and bottom are
/// cropped.
pub fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> CropRect {
    let (sw, sh) = (src_w as u64, src_h as u64);
    let (dw, dh) = (dst_w.max(1) as u64, dst_h.max(1) as u64);

    if sw * dh > sh * dw {
        let width = ((sh * dw + dh / 2) / dh).clamp(1, sw) as u32;
        CropRect {
            x: (src_w - width) / 2,
            y: 0,
            width,
            height: src_h,
        }
    } else {
        let height = ((sw * dh + dw / 2) / dw).clamp(1, sh) as u32;
        CropRect {
            x: 0,
            y: (src_h - height) / 2,
            width: src_w,
            height,
        }
    }
}

/// Cover-crop `img` and scale it to exactly `width` × `height`.
pub fn fit_cover(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    let crop = cover_crop(img.width(), img.height(), width, height);
    let cropped = img.crop_imm(crop.x, crop.y, crop.width, crop.height);
    imageops::resize(&cropped.to_rgba8(), width, height, FilterType::Lanczos3)
}
