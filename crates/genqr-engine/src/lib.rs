//! Visual composition engine for shareable QR images and ID badges.
//!
//! Turns a [`RenderConfig`] into a flattened PNG: a QR matrix is generated,
//! a layout plan is computed for the canvas, every layer (fills, circular
//! photo, fitted text, QR modules) is painted onto one RGBA surface, and the
//! surface is encoded losslessly.
//!
//! Fonts must be loaded into a [`FontSet`] before rendering; the engine does
//! not wait for or discover fonts on its own.

pub mod compose;
pub mod config;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod overlay;
pub mod photo;
pub mod presets;
pub mod qr;
pub mod raster;
pub mod render;
pub mod text;

// Re-exports for convenience
pub use config::{BadgeConfig, Color, EcLevel, LayoutStyle, PhotoSource, QrConfig, RenderConfig};
pub use fonts::FontSet;
pub use layout::{LayoutPlan, Rect};
pub use qr::QrMatrix;
pub use render::{RenderedImage, render, render_async, render_surface};

/// Payload rendered when the configured value is empty.
pub const DEFAULT_PAYLOAD: &str = "https://example.com";

/// Malformed configuration, rejected before any drawing occurs.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a positive integer")]
    ZeroDimension { field: &'static str },

    #[error("{field} exceeds the maximum of {max} pixels")]
    DimensionTooLarge { field: &'static str, max: u32 },

    #[error("invalid error-correction level '{0}' (expected L, M, Q or H)")]
    InvalidEcLevel(String),

    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    #[error("invalid layout style '{0}' (expected compact or spacious)")]
    InvalidLayoutStyle(String),

    #[error("{plan} layout plan cannot paint a {config} config")]
    VariantMismatch {
        plan: &'static str,
        config: &'static str,
    },
}

/// QR generation or PNG export failure. No partial image is returned.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("payload of {len} bytes exceeds QR capacity at level {level}")]
    DataTooLong { len: usize, level: EcLevel },

    #[error("QR encode error: {0}")]
    Qr(String),

    #[error("cannot export an empty surface ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    Png(#[from] image::ImageError),
}

/// Missing or unusable external resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("failed to parse {0} font data (TTF/OTF)")]
    InvalidFont(&'static str),

    #[error("no usable font found (provide font bytes or install system fonts)")]
    FontNotFound,

    #[error("failed to decode photo: {0}")]
    PhotoDecode(String),

    #[error("render worker failed: {0}")]
    Worker(String),
}

/// Any failure surfaced by a render call.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, RenderError>;
