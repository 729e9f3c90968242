//! Geometry planning: pixel rectangles for every visual layer.
//!
//! Pure arithmetic over the canvas size and fixed proportions. Badge bands
//! partition the canvas top to bottom; the last band absorbs rounding so the
//! heights always sum to the canvas height.

use tracing::debug;

use crate::config::LayoutStyle;

/// Canvas width the badge text metrics were tuned at.
const REFERENCE_WIDTH: f32 = 600.0;
const PRIMARY_FONT_PX: f32 = 38.0;
const SECONDARY_FONT_PX: f32 = 22.0;
const PRIMARY_OFFSET_PX: f32 = -15.0;
const SECONDARY_OFFSET_PX: f32 = 10.0;
/// Fraction of the canvas width available to a name line.
pub const NAME_MAX_WIDTH_RATIO: f32 = 0.85;

/// Label plate padding as a fraction of the font size.
pub const PLATE_PAD_X_RATIO: f32 = 0.3;
pub const PLATE_PAD_Y_RATIO: f32 = 0.4;
/// Plate corner radius as a fraction of the plate height.
pub const PLATE_RADIUS_RATIO: f32 = 0.2;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Square of side `side` centered inside this rectangle.
    fn centered_square(&self, side: u32) -> Rect {
        Rect::new(
            self.x + self.width.saturating_sub(side) / 2,
            self.y + self.height.saturating_sub(side) / 2,
            side,
            side,
        )
    }
}

/// Rounded label rectangle in sub-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

/// Proportions for one badge band split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleProportions {
    pub top_percent: u32,
    pub name_percent: u32,
    /// Photo diameter as a fraction of canvas width.
    pub photo_ratio: f32,
    /// QR edge as a fraction of canvas width.
    pub qr_ratio: f32,
}

impl LayoutStyle {
    pub fn proportions(self) -> StyleProportions {
        match self {
            LayoutStyle::Compact => StyleProportions {
                top_percent: 30,
                name_percent: 15,
                photo_ratio: 0.25,
                qr_ratio: 0.586,
            },
            LayoutStyle::Spacious => StyleProportions {
                top_percent: 50,
                name_percent: 25,
                photo_ratio: 0.4,
                qr_ratio: 0.3,
            },
        }
    }
}

/// Vertical anchors and sizes for the two name lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameAnchors {
    pub center_x: f32,
    /// Center of the primary line when it stands alone.
    pub solo_y: f32,
    /// Center of the primary line when a secondary line follows.
    pub primary_y: f32,
    pub secondary_y: f32,
    pub primary_px: f32,
    pub secondary_px: f32,
    pub max_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BadgePlan {
    pub canvas: Rect,
    pub top_band: Rect,
    pub name_band: Rect,
    pub qr_band: Rect,
    /// Bounding square of the photo circle.
    pub photo: Rect,
    pub qr: Rect,
    pub name: NameAnchors,
}

impl BadgePlan {
    /// Bands in paint order.
    pub fn bands(&self) -> [Rect; 3] {
        [self.top_band, self.name_band, self.qr_band]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StandalonePlan {
    pub canvas: Rect,
    pub qr: Rect,
    pub label: Option<PlateRect>,
}

/// Computed rectangles for one render.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutPlan {
    Badge(BadgePlan),
    Standalone(StandalonePlan),
}

/// Measured label text feeding the plate geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub text_width: u32,
    pub font_size: f32,
}

/// Layout variant selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variant {
    Badge {
        style: LayoutStyle,
        /// Explicit QR edge in pixels, overriding the style ratio.
        qr_size: Option<u32>,
    },
    Standalone {
        label: Option<LabelMetrics>,
    },
}

/// Plan every layer rectangle for a canvas of `width` × `height`.
pub fn plan(width: u32, height: u32, variant: &Variant) -> LayoutPlan {
    match *variant {
        Variant::Badge { style, qr_size } => {
            LayoutPlan::Badge(plan_badge(width, height, style, qr_size))
        }
        Variant::Standalone { label } => {
            let canvas = Rect::new(0, 0, width, height);
            let qr = canvas.centered_square(width.min(height));
            LayoutPlan::Standalone(StandalonePlan {
                canvas,
                qr,
                label: label.map(|m| label_plate(qr, m)),
            })
        }
    }
}

fn plan_badge(width: u32, height: u32, style: LayoutStyle, qr_size: Option<u32>) -> BadgePlan {
    let p = style.proportions();
    let top_h = percent_of(height, p.top_percent);
    let name_h = percent_of(height, p.name_percent);
    let qr_h = height - top_h - name_h;

    let top_band = Rect::new(0, 0, width, top_h);
    let name_band = Rect::new(0, top_h, width, name_h);
    let qr_band = Rect::new(0, top_h + name_h, width, qr_h);

    let diameter = ((width as f32 * p.photo_ratio).round() as u32).min(top_h);
    let photo = top_band.centered_square(diameter);

    let qr_side = qr_size
        .unwrap_or_else(|| (width as f32 * p.qr_ratio).round() as u32)
        .min(qr_h)
        .min(width);
    let qr = qr_band.centered_square(qr_side);

    let s = width as f32 / REFERENCE_WIDTH;
    let (center_x, center_y) = name_band.center();
    let name = NameAnchors {
        center_x,
        solo_y: center_y,
        primary_y: center_y + PRIMARY_OFFSET_PX * s,
        secondary_y: center_y + SECONDARY_OFFSET_PX * s,
        primary_px: PRIMARY_FONT_PX * s,
        secondary_px: SECONDARY_FONT_PX * s,
        max_width: (width as f32 * NAME_MAX_WIDTH_RATIO) as u32,
    };

    debug!(?style, top_h, name_h, qr_h, diameter, qr_side, "Planned badge layout");

    BadgePlan {
        canvas: Rect::new(0, 0, width, height),
        top_band,
        name_band,
        qr_band,
        photo,
        qr,
        name,
    }
}

/// `value * percent / 100` without intermediate overflow.
fn percent_of(value: u32, percent: u32) -> u32 {
    (u64::from(value) * u64::from(percent.min(100)) / 100) as u32
}

/// Rounded plate around measured label text, centered on the QR rectangle.
pub fn label_plate(qr: Rect, metrics: LabelMetrics) -> PlateRect {
    let fs = metrics.font_size;
    let width = metrics.text_width as f32 + 2.0 * PLATE_PAD_X_RATIO * fs;
    let height = fs + 2.0 * PLATE_PAD_Y_RATIO * fs;
    let (cx, cy) = qr.center();
    PlateRect {
        x: cx - width / 2.0,
        y: cy - height / 2.0,
        width,
        height,
        radius: height * PLATE_RADIUS_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(width: u32, height: u32, style: LayoutStyle) -> BadgePlan {
        match plan(width, height, &Variant::Badge { style, qr_size: None }) {
            LayoutPlan::Badge(p) => p,
            other => panic!("expected badge plan, got {other:?}"),
        }
    }

    #[test]
    fn compact_bands_on_600x840() {
        let p = badge(600, 840, LayoutStyle::Compact);
        assert_eq!(p.top_band.height, 252);
        assert_eq!(p.name_band.height, 126);
        assert_eq!(p.qr_band.height, 462);
        assert_eq!(p.bands().iter().map(|b| b.height).sum::<u32>(), 840);
    }

    #[test]
    fn spacious_bands_on_600x840() {
        let p = badge(600, 840, LayoutStyle::Spacious);
        assert_eq!(p.top_band.height, 420);
        assert_eq!(p.name_band.height, 210);
        assert_eq!(p.qr_band.height, 210);
    }

    #[test]
    fn bands_partition_canvas_for_odd_heights() {
        for style in [LayoutStyle::Compact, LayoutStyle::Spacious] {
            for height in [1, 7, 101, 333, 841, 1999] {
                let p = badge(250, height, style);
                let bands = p.bands();
                assert_eq!(bands[0].y, 0);
                assert_eq!(bands[1].y, bands[0].bottom());
                assert_eq!(bands[2].y, bands[1].bottom());
                assert_eq!(bands[2].bottom(), height);
            }
        }
    }

    #[test]
    fn huge_heights_do_not_overflow() {
        for height in [200_000_000, u32::MAX] {
            let p = badge(10, height, LayoutStyle::Compact);
            assert_eq!(p.top_band.height, (u64::from(height) * 30 / 100) as u32);
            assert_eq!(p.bands().iter().map(|b| u64::from(b.height)).sum::<u64>(), u64::from(height));
            assert_eq!(p.qr_band.bottom(), height);
        }
    }

    #[test]
    fn photo_is_centered_in_top_band() {
        let p = badge(600, 840, LayoutStyle::Compact);
        assert_eq!(p.photo, Rect::new(225, 51, 150, 150));
    }

    #[test]
    fn qr_is_square_and_inside_band() {
        for style in [LayoutStyle::Compact, LayoutStyle::Spacious] {
            let p = badge(600, 840, style);
            assert_eq!(p.qr.width, p.qr.height);
            assert!(p.qr.y >= p.qr_band.y);
            assert!(p.qr.bottom() <= p.qr_band.bottom());
        }
        let p = badge(600, 840, LayoutStyle::Compact);
        assert_eq!(p.qr, Rect::new(124, 433, 352, 352));
    }

    #[test]
    fn explicit_qr_size_is_clamped_to_band() {
        let plan = plan(
            600,
            840,
            &Variant::Badge {
                style: LayoutStyle::Spacious,
                qr_size: Some(500),
            },
        );
        let LayoutPlan::Badge(p) = plan else {
            panic!("expected badge plan");
        };
        assert_eq!(p.qr.width, 210);
    }

    #[test]
    fn name_anchors_scale_with_width() {
        let p = badge(600, 840, LayoutStyle::Compact);
        assert_eq!(p.name.primary_px, 38.0);
        assert_eq!(p.name.secondary_px, 22.0);
        assert_eq!(p.name.solo_y, 315.0);
        assert_eq!(p.name.primary_y, 300.0);
        assert_eq!(p.name.secondary_y, 325.0);
        assert_eq!(p.name.max_width, 510);

        let half = badge(300, 420, LayoutStyle::Compact);
        assert_eq!(half.name.primary_px, 19.0);
    }

    #[test]
    fn standalone_fills_canvas() {
        let LayoutPlan::Standalone(p) = plan(300, 300, &Variant::Standalone { label: None }) else {
            panic!("expected standalone plan");
        };
        assert_eq!(p.qr, Rect::new(0, 0, 300, 300));
        assert!(p.label.is_none());
    }

    #[test]
    fn label_plate_dimensions() {
        let qr = Rect::new(0, 0, 300, 300);
        let plate = label_plate(
            qr,
            LabelMetrics {
                text_width: 150,
                font_size: 36.0,
            },
        );
        assert!((plate.width - (150.0 + 0.6 * 36.0)).abs() < 1e-3);
        assert!((plate.height - 1.8 * 36.0).abs() < 1e-3);
        assert!((plate.radius - 0.2 * plate.height).abs() < 1e-3);
        assert!((plate.x + plate.width / 2.0 - 150.0).abs() < 1e-3);
        assert!((plate.y + plate.height / 2.0 - 150.0).abs() < 1e-3);
    }
}
