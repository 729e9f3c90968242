//! Render configuration records.
//!
//! Each render call consumes one immutable [`RenderConfig`]. Colors, levels
//! and layout styles are typed so that most invalid states cannot be built;
//! the remaining numeric constraints are checked by `validate()` before any
//! drawing starts.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_PAYLOAD, ValidationError};

/// Default photo ring width in pixels.
pub const DEFAULT_BORDER_WIDTH: u32 = 3;
/// Largest accepted canvas edge in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

fn check_dimension(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::ZeroDimension { field });
    }
    if value > MAX_DIMENSION {
        return Err(ValidationError::DimensionTooLarge {
            field,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(hex: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        self.with_alpha(255)
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// QR error-correction grade (roughly 7%, 15%, 25% and 30% recoverable damage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        };
        f.write_str(s)
    }
}

impl FromStr for EcLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            _ => Err(ValidationError::InvalidEcLevel(s.to_string())),
        }
    }
}

/// Vertical band split of the badge.
///
/// `Compact` is 30/15/55 (photo, name, QR); `Spacious` is 50/25/25.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    #[default]
    Compact,
    Spacious,
}

impl FromStr for LayoutStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LayoutStyle::Compact),
            "spacious" => Ok(LayoutStyle::Spacious),
            _ => Err(ValidationError::InvalidLayoutStyle(s.to_string())),
        }
    }
}

/// Raw profile photo input, decoded lazily during painting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSource {
    /// Encoded PNG/JPEG/WebP bytes.
    Bytes(Vec<u8>),
    /// A `data:` URI with a base64 payload.
    DataUri(String),
}

/// Standalone QR image configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrConfig {
    pub value: String,
    pub fg_color: Color,
    pub bg_color: Color,
    /// Edge length of the square output in pixels.
    pub size: u32,
    pub level: EcLevel,
    /// Enables the centered label plate.
    pub include_logo: bool,
    pub label: Option<String>,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            value: String::new(),
            fg_color: Color::BLACK,
            bg_color: Color::WHITE,
            size: 300,
            level: EcLevel::M,
            include_logo: false,
            label: None,
        }
    }
}

impl QrConfig {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Builder: set foreground and background colors.
    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg_color = fg;
        self.bg_color = bg;
        self
    }

    /// Builder: set output size in pixels.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Builder: set error-correction level.
    pub fn with_level(mut self, level: EcLevel) -> Self {
        self.level = level;
        self
    }

    /// Builder: enable the label overlay with the given text.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.include_logo = true;
        self.label = Some(label.into());
        self
    }

    /// Payload to encode, falling back to [`DEFAULT_PAYLOAD`] when empty.
    pub fn payload(&self) -> &str {
        if self.value.is_empty() {
            DEFAULT_PAYLOAD
        } else {
            &self.value
        }
    }

    /// Label text when the overlay is enabled and non-empty.
    pub fn active_label(&self) -> Option<&str> {
        if !self.include_logo {
            return None;
        }
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_dimension("size", self.size)
    }
}

/// Sectioned ID badge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub full_name: String,
    pub profile_photo: Option<PhotoSource>,
    pub qr_url: String,
    /// Fill of the name and QR bands.
    pub badge_color: Color,
    pub top_section_color: Color,
    pub qr_fg_color: Color,
    pub qr_bg_color: Color,
    pub text_color: Color,
    pub badge_width: u32,
    pub badge_height: u32,
    /// Explicit QR edge length in pixels; the style's proportion is used when unset.
    pub qr_size: Option<u32>,
    pub qr_level: EcLevel,
    pub layout_style: LayoutStyle,
    pub photo_border_width: u32,
    pub photo_border_color: Color,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            profile_photo: None,
            qr_url: String::new(),
            badge_color: Color::WHITE,
            top_section_color: Color::rgb(0x25, 0x63, 0xeb),
            qr_fg_color: Color::rgb(0x25, 0x63, 0xeb),
            qr_bg_color: Color::WHITE,
            text_color: Color::rgb(0x1e, 0x29, 0x3b),
            badge_width: 600,
            badge_height: 840,
            qr_size: None,
            qr_level: EcLevel::Q,
            layout_style: LayoutStyle::Compact,
            photo_border_width: DEFAULT_BORDER_WIDTH,
            photo_border_color: Color::WHITE,
        }
    }
}

impl BadgeConfig {
    pub fn new(full_name: impl Into<String>, qr_url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            qr_url: qr_url.into(),
            ..Self::default()
        }
    }

    /// Builder: set width and derive height from the 5:7 badge aspect ratio.
    pub fn with_aspect_width(mut self, width: u32) -> Self {
        self.badge_width = width;
        self.badge_height = u32::try_from(u64::from(width) * 7 / 5).unwrap_or(u32::MAX);
        self
    }

    /// Builder: set explicit canvas dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.badge_width = width;
        self.badge_height = height;
        self
    }

    /// Builder: set the band split.
    pub fn with_layout_style(mut self, style: LayoutStyle) -> Self {
        self.layout_style = style;
        self
    }

    /// Builder: attach a profile photo.
    pub fn with_photo(mut self, photo: PhotoSource) -> Self {
        self.profile_photo = Some(photo);
        self
    }

    /// Builder: set QR error-correction level.
    pub fn with_level(mut self, level: EcLevel) -> Self {
        self.qr_level = level;
        self
    }

    /// Payload to encode, falling back to [`DEFAULT_PAYLOAD`] when empty.
    pub fn payload(&self) -> &str {
        if self.qr_url.is_empty() {
            DEFAULT_PAYLOAD
        } else {
            &self.qr_url
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_dimension("badge_width", self.badge_width)?;
        check_dimension("badge_height", self.badge_height)?;
        match self.qr_size {
            Some(size) => check_dimension("qr_size", size),
            None => Ok(()),
        }
    }
}

/// One render job: either a standalone QR or a badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderConfig {
    Qr(QrConfig),
    Badge(BadgeConfig),
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            RenderConfig::Qr(c) => c.validate(),
            RenderConfig::Badge(c) => c.validate(),
        }
    }

    pub fn payload(&self) -> &str {
        match self {
            RenderConfig::Qr(c) => c.payload(),
            RenderConfig::Badge(c) => c.payload(),
        }
    }

    pub fn level(&self) -> EcLevel {
        match self {
            RenderConfig::Qr(c) => c.level,
            RenderConfig::Badge(c) => c.qr_level,
        }
    }

    /// Output dimensions in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        match self {
            RenderConfig::Qr(c) => (c.size, c.size),
            RenderConfig::Badge(c) => (c.badge_width, c.badge_height),
        }
    }
}
