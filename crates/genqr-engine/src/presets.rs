//! Built-in badge color presets.

use serde::Serialize;

use crate::config::{BadgeConfig, Color};

/// A named bundle of badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub badge_color: Color,
    pub top_section_color: Color,
    pub qr_fg_color: Color,
    pub qr_bg_color: Color,
    pub text_color: Color,
    /// Accent shown behind the preset in pickers.
    pub preview_color: Color,
}

impl BadgePreset {
    /// Copy this preset's colors onto `config`, leaving content untouched.
    pub fn apply(&self, config: &mut BadgeConfig) {
        config.badge_color = self.badge_color;
        config.top_section_color = self.top_section_color;
        config.qr_fg_color = self.qr_fg_color;
        config.qr_bg_color = self.qr_bg_color;
        config.text_color = self.text_color;
    }
}

const SLATE_TEXT: Color = Color::rgb(0x1e, 0x29, 0x3b);

const fn preset(id: &'static str, name: &'static str, badge: Color, accent: Color) -> BadgePreset {
    BadgePreset {
        id,
        name,
        badge_color: badge,
        top_section_color: accent,
        qr_fg_color: accent,
        qr_bg_color: badge,
        text_color: SLATE_TEXT,
        preview_color: accent,
    }
}

/// All presets in picker order.
pub const BADGE_PRESETS: &[BadgePreset] = &[
    preset("corporate-blue", "Corporate Blue", Color::WHITE, Color::rgb(0x25, 0x63, 0xeb)),
    BadgePreset {
        text_color: Color::rgb(0x0f, 0x17, 0x2a),
        ..preset(
            "midnight-pro",
            "Midnight Pro",
            Color::rgb(0xf8, 0xfa, 0xfc),
            Color::rgb(0x1e, 0x1b, 0x4b),
        )
    },
    preset("forest-green", "Forest Green", Color::WHITE, Color::rgb(0x14, 0x53, 0x2d)),
    preset(
        "coral-red",
        "Coral Red",
        Color::rgb(0xff, 0xf1, 0xf2),
        Color::rgb(0xbe, 0x12, 0x3c),
    ),
    preset(
        "royal-purple",
        "Royal Purple",
        Color::rgb(0xfa, 0xf5, 0xff),
        Color::rgb(0x6b, 0x21, 0xa8),
    ),
    preset("slate-modern", "Slate Modern", Color::WHITE, Color::rgb(0x33, 0x41, 0x55)),
];

pub fn all() -> &'static [BadgePreset] {
    BADGE_PRESETS
}

/// Look up a preset by id.
pub fn find(id: &str) -> Option<&'static BadgePreset> {
    BADGE_PRESETS.iter().find(|p| p.id == id)
}

/// Step `index` by `step` positions, wrapping around the catalog.
pub fn cycle(index: usize, step: isize) -> usize {
    let len = BADGE_PRESETS.len() as isize;
    (index as isize + step).rem_euclid(len) as usize
}
