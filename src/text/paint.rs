//! Drawing text as glyph outlines.

use palette::Srgba;
use resvg::tiny_skia::Transform;

use crate::canvas::{Canvas, Outline, ShapePaint, Shadow};
use crate::font::{FontBook, FontStyle, TextMeasure, Weight};

/// Horizontal anchor of a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Baseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
}

/// Complete style of one text draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub fill: Srgba<u8>,
    pub align: Align,
    pub baseline: Baseline,
    pub outline: Option<Outline>,
    pub shadow: Option<Shadow>,
    /// Added after every character.
    pub letter_spacing: f32,
}

impl TextStyle {
    pub fn new(font: FontStyle, fill: Srgba<u8>) -> Self {
        Self {
            font,
            fill,
            align: Align::Left,
            baseline: Baseline::Alphabetic,
            outline: None,
            shadow: None,
            letter_spacing: 0.0,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }
}

/// Stroke width, relative to the em size, that stands in for a bold face.
const SYNTHETIC_BOLD: f32 = 0.04;

/// Width of `text` as [`draw_text`] lays it out.
pub fn text_width(fonts: &FontBook, text: &str, style: &TextStyle) -> f32 {
    text.chars()
        .map(|ch| fonts.advance(ch, style.font) + style.letter_spacing)
        .sum()
}

/// Draws `text` anchored at `(x, y)` under `ts` and returns its width.
///
/// With no font loaded nothing is drawn, but the estimated width is still
/// returned so callers can keep their cursor arithmetic.
pub fn draw_text(
    canvas: &mut Canvas,
    fonts: &FontBook,
    text: &str,
    x: f32,
    y: f32,
    style: &TextStyle,
    ts: Transform,
) -> f32 {
    let width = text_width(fonts, text, style);

    let (ascent, descent) = fonts.vertical_metrics(style.font);
    let baseline = match style.baseline {
        Baseline::Top => y + ascent,
        Baseline::Middle => y + (ascent + descent) / 2.0,
        Baseline::Alphabetic => y,
    };
    let mut pen = match style.align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };

    let mut paths = Vec::with_capacity(text.chars().count());
    for ch in text.chars() {
        let (path, advance) = fonts.glyph_path(ch, style.font, pen, baseline);
        paths.extend(path);
        pen += advance + style.letter_spacing;
    }

    let synthetic_bold = style.font.weight == Weight::Bold
        && !fonts.has_exact(style.font.family, Weight::Bold);

    let paint = ShapePaint {
        fill: Some(style.fill),
        outline: style.outline,
        embolden: if synthetic_bold {
            style.font.size * SYNTHETIC_BOLD
        } else {
            0.0
        },
        shadow: style.shadow,
    };
    canvas.draw_paths(&paths, &paint, ts);

    width
}
