//! Font families, glyph measurement and glyph outlines.
//!
//! Text is laid out from per-character advance widths supplied through the
//! [`TextMeasure`] trait, and drawn from vector glyph outlines so that the
//! composition pipeline can stroke, fill and rotate them like any other path.

use std::collections::HashMap;

use ab_glyph::{Font, FontArc, OutlineCurve, PxScale, ScaleFont};
use resvg::tiny_skia::{Path, PathBuilder};

/// The fixed set of font families a card may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    HuangCao,
    XingKai,
    XiaoZhuan,
    XinWei,
    Suits,
    ShouSha,
    YuanLi,
    MotoyaMaru,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::HuangCao,
        FontFamily::XingKai,
        FontFamily::XiaoZhuan,
        FontFamily::XinWei,
        FontFamily::Suits,
        FontFamily::ShouSha,
        FontFamily::YuanLi,
        FontFamily::MotoyaMaru,
    ];

    /// Body face for skill descriptions, flavor text and counters.
    pub const BODY: FontFamily = FontFamily::MotoyaMaru;

    /// Display name, as stored in card data.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::HuangCao => "HuangCao",
            FontFamily::XingKai => "XingKai",
            FontFamily::XiaoZhuan => "XiaoZhuan",
            FontFamily::XinWei => "XinWei",
            FontFamily::Suits => "Suits",
            FontFamily::ShouSha => "ShouSha",
            FontFamily::YuanLi => "YuanLi",
            FontFamily::MotoyaMaru => "MotoyaMaru",
        }
    }

    /// File stem under the font directory.
    pub fn file_stem(self) -> &'static str {
        match self {
            FontFamily::HuangCao => "huangcao",
            FontFamily::XingKai => "xingkai",
            FontFamily::XiaoZhuan => "xiaozhuan",
            FontFamily::XinWei => "xinwei",
            FontFamily::Suits => "suits",
            FontFamily::ShouSha => "shousha",
            FontFamily::YuanLi => "yuanli",
            FontFamily::MotoyaMaru => "motoyamaru",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Like [`from_name`](Self::from_name) with a fallback for unknown names.
    pub fn from_name_or(name: &str, fallback: FontFamily) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::debug!("unknown font family {name:?}, using {}", fallback.name());
            fallback
        })
    }
}

/// Font weight. Regular covers the 500 body weight, bold the 600 weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Weight {
    #[default]
    Regular,
    Bold,
}

/// A concrete face request: family, weight and em size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStyle {
    pub family: FontFamily,
    pub weight: Weight,
    pub size: f32,
}

impl FontStyle {
    pub fn new(family: FontFamily, weight: Weight, size: f32) -> Self {
        Self { family, weight, size }
    }

    pub fn regular(family: FontFamily, size: f32) -> Self {
        Self::new(family, Weight::Regular, size)
    }

    pub fn bold(family: FontFamily, size: f32) -> Self {
        Self::new(family, Weight::Bold, size)
    }
}

// ============================================================================
// TextMeasure
// ============================================================================

/// Source of horizontal glyph advances.
///
/// Shared by the wrap engine and the drawing layers so that wrapped lines
/// and drawn lines use identical widths.
pub trait TextMeasure {
    /// Advance width of one character.
    fn advance(&self, ch: char, style: FontStyle) -> f32;

    /// Sum of the advances of every character of `text`.
    fn measure(&self, text: &str, style: FontStyle) -> f32 {
        text.chars().map(|ch| self.advance(ch, style)).sum()
    }
}

/// Advance estimate used when no face is available: full width for CJK and
/// other non-ASCII characters, half width for ASCII.
pub fn estimated_advance(ch: char, size: f32) -> f32 {
    if ch.is_ascii() { size * 0.5 } else { size }
}

/// Advance metrics that ignore font data entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMetrics;

impl TextMeasure for EstimatedMetrics {
    fn advance(&self, ch: char, style: FontStyle) -> f32 {
        estimated_advance(ch, style.size)
    }
}

// ============================================================================
// FontBook
// ============================================================================

/// Loaded font faces keyed by family and weight.
#[derive(Clone, Default)]
pub struct FontBook {
    faces: HashMap<(FontFamily, Weight), FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.faces.keys().collect();
        keys.sort_by_key(|(family, weight)| (family.name(), *weight == Weight::Bold));
        f.debug_struct("FontBook").field("faces", &keys).finish()
    }
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, family: FontFamily, weight: Weight, face: FontArc) {
        self.faces.insert((family, weight), face);
    }

    /// Parses and registers a face from TrueType/OpenType bytes.
    pub fn insert_bytes(
        &mut self,
        family: FontFamily,
        weight: Weight,
        data: Vec<u8>,
    ) -> Result<(), ab_glyph::InvalidFont> {
        let face = FontArc::try_from_vec(data)?;
        self.insert(family, weight, face);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// True when the exact family/weight pair was loaded.
    pub fn has_exact(&self, family: FontFamily, weight: Weight) -> bool {
        self.faces.contains_key(&(family, weight))
    }

    /// Best available face for a style.
    ///
    /// Falls back to the regular weight of the family, then the body face,
    /// then any loaded face.
    pub fn face(&self, style: FontStyle) -> Option<&FontArc> {
        self.faces
            .get(&(style.family, style.weight))
            .or_else(|| self.faces.get(&(style.family, Weight::Regular)))
            .or_else(|| self.faces.get(&(FontFamily::BODY, style.weight)))
            .or_else(|| self.faces.get(&(FontFamily::BODY, Weight::Regular)))
            .or_else(|| {
                FontFamily::ALL
                    .iter()
                    .find_map(|family| self.faces.get(&(*family, Weight::Regular)))
            })
            .or_else(|| self.faces.values().next())
    }

    /// Ascent (positive, up) and descent (negative, down) for a style.
    pub fn vertical_metrics(&self, style: FontStyle) -> (f32, f32) {
        match self.face(style) {
            Some(face) => {
                let scaled = face.as_scaled(em_scale(face, style.size));
                (scaled.ascent(), scaled.descent())
            }
            None => (style.size * 0.8, -style.size * 0.2),
        }
    }

    /// Outline of `ch` positioned with its origin at `(x, baseline)`.
    ///
    /// Returns the path (if the glyph has any contours) and the advance.
    pub fn glyph_path(&self, ch: char, style: FontStyle, x: f32, baseline: f32) -> (Option<Path>, f32) {
        let Some(face) = self.face(style) else {
            return (None, estimated_advance(ch, style.size));
        };
        let scaled = face.as_scaled(em_scale(face, style.size));
        let glyph = scaled.glyph_id(ch);
        let advance = scaled.h_advance(glyph);
        let (hs, vs) = (scaled.h_scale_factor(), scaled.v_scale_factor());

        let Some(outline) = face.outline(glyph) else {
            return (None, advance);
        };

        // Outline units are y-up.
        let map = |p: ab_glyph::Point| (x + p.x * hs, baseline - p.y * vs);
        let mut pb = PathBuilder::new();
        let mut pen: Option<ab_glyph::Point> = None;

        for curve in &outline.curves {
            let (start, end) = match curve {
                OutlineCurve::Line(a, b) => (*a, *b),
                OutlineCurve::Quad(a, _, b) => (*a, *b),
                OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
            };
            if pen != Some(start) {
                if pen.is_some() {
                    pb.close();
                }
                let (sx, sy) = map(start);
                pb.move_to(sx, sy);
            }
            match curve {
                OutlineCurve::Line(_, b) => {
                    let (bx, by) = map(*b);
                    pb.line_to(bx, by);
                }
                OutlineCurve::Quad(_, c, b) => {
                    let ((cx, cy), (bx, by)) = (map(*c), map(*b));
                    pb.quad_to(cx, cy, bx, by);
                }
                OutlineCurve::Cubic(_, c1, c2, b) => {
                    let ((c1x, c1y), (c2x, c2y), (bx, by)) = (map(*c1), map(*c2), map(*b));
                    pb.cubic_to(c1x, c1y, c2x, c2y, bx, by);
                }
            }
            pen = Some(end);
        }
        if pen.is_some() {
            pb.close();
        }

        (pb.finish(), advance)
    }
}

impl TextMeasure for FontBook {
    fn advance(&self, ch: char, style: FontStyle) -> f32 {
        match self.face(style) {
            Some(face) => {
                let scaled = face.as_scaled(em_scale(face, style.size));
                scaled.h_advance(scaled.glyph_id(ch))
            }
            None => estimated_advance(ch, style.size),
        }
    }
}

/// Scale at which one em equals `size` pixels.
fn em_scale(face: &FontArc, size: f32) -> PxScale {
    let units_per_em = face.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * face.height_unscaled() / units_per_em)
}
