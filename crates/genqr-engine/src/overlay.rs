//! Readable label plate composited over a standalone QR code.
//!
//! The plate covers part of the symbol, which QR readers must recover through
//! error correction. The engine never raises the level on its own: callers
//! enabling a label are responsible for choosing a high enough level. Level H
//! tolerates up to roughly 30% obstruction, and the plate stays within a
//! central region bounded by the label width (60% of the QR edge plus
//! padding) and height (21.6% of the edge). Level L leaves too little
//! redundancy: a short URL with a seven-letter label on a 300 px code no
//! longer scans, while Q and H do.

use ab_glyph::PxScale;
use image::RgbaImage;
use tracing::debug;

use crate::compose;
use crate::config::QrConfig;
use crate::fonts::FontSet;
use crate::layout::{self, LabelMetrics, PlateRect, Rect};
use crate::text;

/// Label font size as a fraction of the QR edge.
pub const LABEL_FONT_RATIO: f32 = 0.12;
/// Maximum label text width as a fraction of the QR edge.
pub const LABEL_MAX_WIDTH_RATIO: f32 = 0.6;
/// Plate opacity used on a pure white background.
const WHITE_PLATE_ALPHA: f32 = 0.95;

/// Fitted label text and its plate.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub text: String,
    pub font_size: f32,
    pub text_width: u32,
    pub plate: PlateRect,
}

impl LabelLayout {
    pub fn metrics(&self) -> LabelMetrics {
        LabelMetrics {
            text_width: self.text_width,
            font_size: self.font_size,
        }
    }
}

/// Fit `label` to the QR rectangle and compute its plate.
pub fn layout_label(fonts: &FontSet, label: &str, qr: Rect) -> LabelLayout {
    let side = qr.width.min(qr.height) as f32;
    let font_size = side * LABEL_FONT_RATIO;
    let scale = PxScale::from(font_size);
    let max_width = (side * LABEL_MAX_WIDTH_RATIO) as u32;

    let fitted = text::truncate_to_width(&fonts.bold, scale, label, max_width);
    let text_width = text::measure_text_width(&fonts.bold, scale, &fitted);
    let plate = layout::label_plate(
        qr,
        LabelMetrics {
            text_width,
            font_size,
        },
    );

    LabelLayout {
        text: fitted,
        font_size,
        text_width,
        plate,
    }
}

/// Paint the label plate and text over the QR pixels already on `surface`.
///
/// Does nothing unless the config enables a non-empty label.
pub fn overlay_label(surface: &mut RgbaImage, qr: Rect, config: &QrConfig, fonts: &FontSet) {
    let Some(label) = config.active_label() else {
        return;
    };
    let layout = layout_label(fonts, label, qr);
    paint_label(surface, &layout, qr, config, fonts);
}

/// Paint an already fitted label centered on `qr`.
fn paint_label(
    surface: &mut RgbaImage,
    layout: &LabelLayout,
    qr: Rect,
    config: &QrConfig,
    fonts: &FontSet,
) {
    debug!(
        label = %layout.text,
        font_size = layout.font_size,
        plate_w = layout.plate.width,
        plate_h = layout.plate.height,
        "Overlaying QR label"
    );

    let alpha = if config.bg_color.is_white() {
        (WHITE_PLATE_ALPHA * 255.0).round() as u8
    } else {
        255
    };
    compose::fill_rounded_rect(surface, layout.plate, config.bg_color.with_alpha(alpha));

    let (cx, cy) = qr.center();
    text::draw_text_centered_at(
        surface,
        &fonts.bold,
        PxScale::from(layout.font_size),
        cx,
        cy,
        &layout.text,
        config.fg_color.to_rgba(),
    );
}
