//! Layer rasterizer: paints a layout plan onto an RGBA surface.
//!
//! Band fills go down first, top to bottom, followed by the foreground
//! layers (photo, name text, QR modules). A missing or undecodable photo is
//! replaced by the placeholder silhouette; painting itself never fails.

use ab_glyph::PxScale;
use image::{Rgba, RgbaImage};

use crate::ValidationError;
use crate::compose;
use crate::config::{BadgeConfig, Color, QrConfig, RenderConfig};
use crate::fonts::FontSet;
use crate::layout::{BadgePlan, LayoutPlan, NameAnchors, Rect, StandalonePlan};
use crate::photo;
use crate::qr::QrMatrix;
use crate::text::{self, ParsedName};

/// Shown in the name band when no name is configured.
pub const NAME_PLACEHOLDER: &str = "Add your name";

/// Final text content of the name band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLayout {
    Placeholder,
    Lines {
        primary: String,
        secondary: Option<String>,
    },
}

/// Paint every planned layer for `config` onto `surface`.
///
/// The plan must have been built for the same variant as `config`; a
/// mismatch is rejected before any pixel is touched.
pub fn paint(
    surface: &mut RgbaImage,
    plan: &LayoutPlan,
    config: &RenderConfig,
    matrix: &QrMatrix,
    fonts: &FontSet,
) -> Result<(), ValidationError> {
    match (plan, config) {
        (LayoutPlan::Badge(plan), RenderConfig::Badge(cfg)) => {
            paint_badge(surface, plan, cfg, matrix, fonts)
        }
        (LayoutPlan::Standalone(plan), RenderConfig::Qr(cfg)) => {
            paint_standalone(surface, plan, cfg, matrix)
        }
        (LayoutPlan::Badge(_), RenderConfig::Qr(_)) => {
            return Err(ValidationError::VariantMismatch {
                plan: "badge",
                config: "qr",
            });
        }
        (LayoutPlan::Standalone(_), RenderConfig::Badge(_)) => {
            return Err(ValidationError::VariantMismatch {
                plan: "standalone",
                config: "badge",
            });
        }
    }
    Ok(())
}

/// Background fill plus the QR filling the whole canvas.
pub fn paint_standalone(
    surface: &mut RgbaImage,
    plan: &StandalonePlan,
    cfg: &QrConfig,
    matrix: &QrMatrix,
) {
    compose::fill_rect(surface, plan.canvas, cfg.bg_color.to_rgba());
    paint_qr(surface, plan.qr, matrix, cfg.fg_color, cfg.bg_color);
}

pub fn paint_badge(
    surface: &mut RgbaImage,
    plan: &BadgePlan,
    cfg: &BadgeConfig,
    matrix: &QrMatrix,
    fonts: &FontSet,
) {
    let fills = [cfg.top_section_color, cfg.badge_color, cfg.badge_color];
    for (band, color) in plan.bands().into_iter().zip(fills) {
        compose::fill_rect(surface, band, color.to_rgba());
    }

    paint_photo(surface, plan.photo, cfg);
    paint_name(surface, &plan.name, cfg, fonts);
    paint_qr(surface, plan.qr, matrix, cfg.qr_fg_color, cfg.qr_bg_color);
}

fn paint_photo(surface: &mut RgbaImage, rect: Rect, cfg: &BadgeConfig) {
    if rect.width == 0 {
        return;
    }
    let source = photo::load_or_placeholder(cfg.profile_photo.as_ref());
    let fitted = photo::fit_cover(&source, rect.width, rect.height);
    compose::blit_circle(surface, &fitted, rect.x, rect.y);
    compose::stroke_ring(
        surface,
        rect,
        cfg.photo_border_width,
        cfg.photo_border_color.to_rgba(),
    );
}

/// Decide the name band text: uppercase first token plus optional remainder,
/// each truncated to the anchors' maximum width.
pub fn layout_name(fonts: &FontSet, full_name: &str, anchors: &NameAnchors) -> NameLayout {
    let ParsedName { first, rest } = text::parse_name(full_name);
    if first.is_empty() {
        return NameLayout::Placeholder;
    }

    let primary = text::truncate_to_width(
        &fonts.bold,
        PxScale::from(anchors.primary_px),
        &first.to_uppercase(),
        anchors.max_width,
    );
    let secondary = (!rest.is_empty()).then(|| {
        text::truncate_to_width(
            &fonts.regular,
            PxScale::from(anchors.secondary_px),
            &rest,
            anchors.max_width,
        )
    });

    NameLayout::Lines { primary, secondary }
}

fn paint_name(surface: &mut RgbaImage, anchors: &NameAnchors, cfg: &BadgeConfig, fonts: &FontSet) {
    let color = cfg.text_color.to_rgba();
    match layout_name(fonts, &cfg.full_name, anchors) {
        NameLayout::Placeholder => {
            let muted = compose::blend_pixel(&cfg.badge_color.to_rgba(), &color, 0.5);
            text::draw_text_centered_at(
                surface,
                &fonts.regular,
                PxScale::from(anchors.secondary_px),
                anchors.center_x,
                anchors.solo_y,
                NAME_PLACEHOLDER,
                muted,
            );
        }
        NameLayout::Lines { primary, secondary } => {
            let primary_y = if secondary.is_some() {
                anchors.primary_y
            } else {
                anchors.solo_y
            };
            text::draw_text_centered_at(
                surface,
                &fonts.bold,
                PxScale::from(anchors.primary_px),
                anchors.center_x,
                primary_y,
                &primary,
                color,
            );
            if let Some(secondary) = secondary {
                text::draw_text_centered_at(
                    surface,
                    &fonts.regular,
                    PxScale::from(anchors.secondary_px),
                    anchors.center_x,
                    anchors.secondary_y,
                    &secondary,
                    color,
                );
            }
        }
    }
}

/// Scale the module grid into `rect` with nearest-neighbor sampling and no
/// quiet zone, so every pixel of the rectangle belongs to some module.
pub fn paint_qr(surface: &mut RgbaImage, rect: Rect, matrix: &QrMatrix, fg: Color, bg: Color) {
    let n = matrix.width() as u64;
    let (w, h) = (rect.width as u64, rect.height as u64);
    if w == 0 || h == 0 {
        return;
    }
    let (dark, light): (Rgba<u8>, Rgba<u8>) = (fg.to_rgba(), bg.to_rgba());

    for py in 0..rect.height {
        let my = (py as u64 * n / h) as usize;
        let y = rect.y + py;
        if y >= surface.height() {
            break;
        }
        for px in 0..rect.width {
            let x = rect.x + px;
            if x >= surface.width() {
                break;
            }
            let mx = (px as u64 * n / w) as usize;
            let color = if matrix.is_dark(mx, my) { dark } else { light };
            surface.put_pixel(x, y, color);
        }
    }
}
