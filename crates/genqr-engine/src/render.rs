//! Render pipeline: validate → generate → plan → paint → overlay → encode.
//!
//! Every call builds its own matrix, plan and surface, so independent
//! renders can run in parallel without coordination.

use image::RgbaImage;
use tracing::info;

use crate::config::RenderConfig;
use crate::fonts::FontSet;
use crate::layout::{self, LayoutPlan, Rect, Variant};
use crate::overlay;
use crate::{ResourceError, Result, export, qr, raster};

/// A finished PNG and its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Render `config` to PNG bytes.
pub fn render(config: &RenderConfig, fonts: &FontSet) -> Result<RenderedImage> {
    let surface = render_surface(config, fonts)?;
    let (width, height) = surface.dimensions();
    let png = export::encode(surface)?;
    info!(width, height, bytes = png.len(), "Rendered image");
    Ok(RenderedImage { png, width, height })
}

/// Run [`render`] on a blocking worker thread.
pub async fn render_async(config: RenderConfig, fonts: FontSet) -> Result<RenderedImage> {
    tokio::task::spawn_blocking(move || render(&config, &fonts))
        .await
        .map_err(|e| ResourceError::Worker(e.to_string()))?
}

/// Render `config` to an unencoded RGBA surface.
///
/// Validation and QR generation happen before the surface is allocated, so a
/// failing config never produces partial pixels.
pub fn render_surface(config: &RenderConfig, fonts: &FontSet) -> Result<RgbaImage> {
    config.validate()?;
    let matrix = qr::generate(config.payload(), config.level())?;
    let (width, height) = config.canvas_size();

    let variant = match config {
        RenderConfig::Qr(cfg) => Variant::Standalone {
            label: cfg.active_label().map(|l| {
                overlay::layout_label(fonts, l, Rect::new(0, 0, width, height)).metrics()
            }),
        },
        RenderConfig::Badge(cfg) => Variant::Badge {
            style: cfg.layout_style,
            qr_size: cfg.qr_size,
        },
    };
    let plan = layout::plan(width, height, &variant);

    let mut surface = RgbaImage::new(width, height);
    raster::paint(&mut surface, &plan, config, &matrix, fonts)?;

    if let (LayoutPlan::Standalone(plan), RenderConfig::Qr(cfg)) = (&plan, config) {
        overlay::overlay_label(&mut surface, plan.qr, cfg, fonts);
    }

    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BadgeConfig, EcLevel, LayoutStyle, PhotoSource, QrConfig};
    use crate::fonts::test_fonts;
    use crate::{EncodingError, RenderError, ValidationError};

    /// Read the QR back the way a scanner would, on a white quiet zone.
    fn scan(surface: &RgbaImage) -> Option<String> {
        const QUIET: u32 = 40;
        let gray = image::DynamicImage::ImageRgba8(surface.clone()).to_luma8();
        let (w, h) = (gray.width() + 2 * QUIET, gray.height() + 2 * QUIET);
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
                let (x, y) = (x as u32, y as u32);
                let inside = (QUIET..w - QUIET).contains(&x) && (QUIET..h - QUIET).contains(&y);
                if inside {
                    gray.get_pixel(x - QUIET, y - QUIET)[0]
                } else {
                    255
                }
            });
        prepared
            .detect_grids()
            .iter()
            .find_map(|g| g.decode().ok())
            .map(|(_, content)| content)
    }

    fn decoded_dimensions(png: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(png).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn badge_png_matches_canvas_size() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Badge(BadgeConfig::new("John Doe", "https://example.com/jd"));
        let out = render(&cfg, &fonts).unwrap();
        assert_eq!((out.width, out.height), (600, 840));
        assert_eq!(decoded_dimensions(&out.png), (600, 840));
    }

    #[test]
    fn spacious_badge_with_odd_size_renders() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Badge(
            BadgeConfig::new("Grace Hopper", "https://example.com")
                .with_dimensions(333, 487)
                .with_layout_style(LayoutStyle::Spacious),
        );
        let out = render(&cfg, &fonts).unwrap();
        assert_eq!(decoded_dimensions(&out.png), (333, 487));
    }

    #[test]
    fn labelled_qr_png_matches_size() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Qr(
            QrConfig::new("https://savills.com")
                .with_level(EcLevel::H)
                .with_label("SAVILLS"),
        );
        let out = render(&cfg, &fonts).unwrap();
        assert_eq!(decoded_dimensions(&out.png), (300, 300));
    }

    #[test]
    fn label_changes_only_the_center() {
        let fonts = test_fonts::fonts();
        let plain = QrConfig::new("https://savills.com").with_level(EcLevel::Q);
        let labelled = plain.clone().with_label("SAVILLS");
        let a = render_surface(&RenderConfig::Qr(plain), &fonts).unwrap();
        let b = render_surface(&RenderConfig::Qr(labelled), &fonts).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.get_pixel(0, 0), b.get_pixel(0, 0));
        assert_eq!(a.get_pixel(299, 0), b.get_pixel(299, 0));
        assert_eq!(a.get_pixel(0, 299), b.get_pixel(0, 299));
    }

    #[test]
    fn plain_qr_scans_at_every_level() {
        let fonts = test_fonts::fonts();
        for level in EcLevel::ALL {
            let cfg = RenderConfig::Qr(QrConfig::new("https://savills.com").with_level(level));
            let surface = render_surface(&cfg, &fonts).unwrap();
            assert_eq!(scan(&surface).as_deref(), Some("https://savills.com"), "level {level}");
        }
    }

    #[test]
    fn badge_qr_scans() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Badge(BadgeConfig::new("John Doe", "https://example.com/jd"));
        let surface = render_surface(&cfg, &fonts).unwrap();
        assert_eq!(scan(&surface).as_deref(), Some("https://example.com/jd"));
    }

    #[test]
    fn labelled_qr_scans_at_high_levels() {
        let fonts = test_fonts::fonts();
        for level in [EcLevel::Q, EcLevel::H] {
            let cfg = RenderConfig::Qr(
                QrConfig::new("https://savills.com")
                    .with_level(level)
                    .with_label("SAVILLS"),
            );
            let surface = render_surface(&cfg, &fonts).unwrap();
            assert_eq!(scan(&surface).as_deref(), Some("https://savills.com"), "level {level}");
        }
    }

    #[test]
    fn render_is_deterministic() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Badge(BadgeConfig::new("Ada Lovelace", "analytical-engine"));
        assert_eq!(render(&cfg, &fonts).unwrap(), render(&cfg, &fonts).unwrap());
    }

    #[test]
    fn broken_photo_degrades_to_placeholder() {
        let fonts = test_fonts::fonts();
        let cfg = BadgeConfig::new("Ada", "x").with_photo(PhotoSource::DataUri("data:,".into()));
        let out = render(&RenderConfig::Badge(cfg), &fonts).unwrap();
        assert_eq!(decoded_dimensions(&out.png), (600, 840));
    }

    #[test]
    fn zero_size_fails_validation() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Qr(QrConfig::new("x").with_size(0));
        assert!(matches!(
            render(&cfg, &fonts),
            Err(RenderError::Validation(ValidationError::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn huge_canvas_fails_validation_before_allocating() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Badge(BadgeConfig::new("Ada", "x").with_dimensions(10, 200_000_000));
        assert!(matches!(
            render_surface(&cfg, &fonts),
            Err(RenderError::Validation(ValidationError::DimensionTooLarge {
                field: "badge_height",
                ..
            }))
        ));
    }

    #[test]
    fn oversized_payload_fails_encoding() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Qr(QrConfig::new("z".repeat(4000)).with_level(EcLevel::L));
        assert!(matches!(
            render(&cfg, &fonts),
            Err(RenderError::Encoding(EncodingError::DataTooLong { len: 4000, .. }))
        ));
    }

    #[tokio::test]
    async fn async_render_matches_sync() {
        let fonts = test_fonts::fonts();
        let cfg = RenderConfig::Qr(QrConfig::new("hello async"));
        let sync = render(&cfg, &fonts).unwrap();
        let not_sync = render_async(cfg, fonts).await.unwrap();
        assert_eq!(sync, not_sync);
    }
}
