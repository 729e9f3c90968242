//! Text measurement, fitting and drawing.
//!
//! Provides kerned width measurement, convergent ellipsis truncation,
//! display-name parsing, and centered text drawing on RGBA surfaces.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

/// Marker appended to text that had to be shortened.
pub const ELLIPSIS: &str = "...";

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &impl Font, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Height of the glyph box (ascent to descent) at the given scale.
pub fn text_height(font: &impl Font, scale: PxScale) -> f32 {
    let scaled = font.as_scaled(scale);
    scaled.ascent() - scaled.descent()
}

/// Shorten `text` until it fits `max_width`, appending [`ELLIPSIS`].
///
/// Text that already fits is returned unchanged. Otherwise trailing
/// characters are dropped until the prefix plus ellipsis fits; if not even
/// the bare ellipsis fits the result is empty. Because the ellipsis is part
/// of the measured string, truncating a result again returns it unchanged.
pub fn truncate_to_width(font: &impl Font, scale: PxScale, text: &str, max_width: u32) -> String {
    if measure_text_width(font, scale, text) <= max_width {
        return text.to_string();
    }

    let mut prefix = text.to_string();
    while prefix.pop().is_some() {
        let candidate = format!("{}{ELLIPSIS}", prefix.trim_end());
        if measure_text_width(font, scale, &candidate) <= max_width {
            debug!(text = %text, truncated = %candidate, max_width, "Truncated text");
            return candidate;
        }
    }

    debug!(text = %text, max_width, "Text does not fit at all");
    String::new()
}

/// A display name split into its first token and the joined remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub first: String,
    pub rest: String,
}

impl ParsedName {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn has_rest(&self) -> bool {
        !self.rest.is_empty()
    }
}

/// Split a trimmed display name on whitespace runs.
pub fn parse_name(full_name: &str) -> ParsedName {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    ParsedName { first, rest }
}

/// Draw `text` horizontally centered on `center_x` with its glyph box
/// vertically centered on `center_y`.
pub fn draw_text_centered_at(
    img: &mut RgbaImage,
    font: &impl Font,
    scale: PxScale,
    center_x: f32,
    center_y: f32,
    text: &str,
    color: Rgba<u8>,
) {
    if text.is_empty() {
        return;
    }
    let width = measure_text_width(font, scale, text) as f32;
    let x = (center_x - width / 2.0).round() as i32;
    let y = (center_y - text_height(font, scale) / 2.0).round() as i32;
    draw_text_mut(img, color, x, y, scale, font, text);
}
