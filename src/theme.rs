//! Faction theme colors and color parsing.
//!
//! Themes are resolved fresh for every render and threaded through the
//! pipeline by value; nothing here holds mutable state.

use palette::{Srgb, Srgba, WithAlpha};

use crate::card::Faction;

/// Colors used by the drawing layers for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub primary: Srgba<u8>,
    /// Outline color of the vector frame fallback.
    pub border: Srgba<u8>,
    pub tag_text: Srgba<u8>,
    pub skill_box_border: Srgba<u8>,
    pub skill_box_bg: Srgba<u8>,
    pub skill_text: Srgba<u8>,
    pub accent_red: Srgba<u8>,
}

/// Default body color of skill descriptions.
pub const SKILL_TEXT: Srgba<u8> = rgba(0x1a, 0x1a, 0x1a, 0xff);

/// Color of `[red]` spans.
pub const ACCENT_RED: Srgba<u8> = rgba(0xbb, 0x00, 0x00, 0xff);

/// Translucent skill box fill, rgba(235, 235, 235, 0.75).
pub const SKILL_BOX_BG: Srgba<u8> = rgba(235, 235, 235, 191);

/// Builds an opaque-or-not sRGB color in a const context.
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Srgba<u8> {
    Srgba::new(r, g, b, a)
}

/// Resolves the theme for a faction.
pub fn resolve_theme(faction: Faction) -> ThemeColors {
    let (primary, tag_text, skill_box_border) = match faction {
        Faction::Shen => (0xdcb35c, 0xffd700, 0x4a3b2a),
        Faction::Wei => (0x2b4c85, 0xa4c2f4, 0x1f3a60),
        Faction::Shu => (0xa82e2e, 0xf4a4f4, 0x5e1b1b),
        Faction::Wu => (0x2ea84e, 0xa4f4bd, 0x1e5e30),
        Faction::Qun => (0x8c8c8c, 0xeeeeee, 0x555555),
        Faction::Jin => (0x9d4dbb, 0xd8b4e8, 0x4a2558),
    };

    ThemeColors {
        primary: from_hex(primary),
        border: from_hex(primary),
        tag_text: from_hex(tag_text),
        skill_box_border: from_hex(skill_box_border),
        skill_box_bg: SKILL_BOX_BG,
        skill_text: SKILL_TEXT,
        accent_red: ACCENT_RED,
    }
}

fn from_hex(rgb: u32) -> Srgba<u8> {
    let [_, r, g, b] = rgb.to_be_bytes();
    rgba(r, g, b, 0xff)
}

/// Parses `#rgb`/`#rrggbb` hex (with or without `#`) or a CSS color name.
pub fn parse_color(value: &str) -> Option<Srgba<u8>> {
    let value = value.trim();
    let rgb = value
        .parse::<Srgb<u8>>()
        .ok()
        .or_else(|| palette::named::from_str(&value.to_ascii_lowercase()))?;
    Some(rgb.with_alpha(0xff))
}

/// Parses a six-digit hex color (`#` optional) for recoloring. Anything
/// else, shorthand `#rgb` included, falls back to black.
pub fn parse_hex_or_black(value: &str) -> Srgb<u8> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let parsed = (digits.len() == 6)
        .then(|| digits.parse::<Srgb<u8>>().ok())
        .flatten();
    parsed.unwrap_or_else(|| {
        log::debug!("malformed recolor target {value:?}, using black");
        Srgb::new(0, 0, 0)
    })
}

/// Converts to a tiny-skia color.
pub fn to_skia(color: Srgba<u8>) -> resvg::tiny_skia::Color {
    resvg::tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}
