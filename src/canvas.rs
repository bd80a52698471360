//! The supersampled drawing surface.
//!
//! Layers draw in logical card units. [`Canvas`] owns the device pixmap and
//! the supersample scale, and composes every caller transform onto its base
//! scale. Each draw call takes its full style by value, so nothing leaks
//! from one component to the next.

use palette::Srgba;
use resvg::tiny_skia::{
    FillRule, FilterQuality, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke,
    StrokeDash, Transform,
};

use crate::error::{Error, Result};
use crate::raster::{image_to_pixmap, pixmap_to_image};
use crate::theme::to_skia;

/// Outline drawn under a fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Srgba<u8>,
    pub width: f32,
    pub round_join: bool,
}

impl Outline {
    pub fn new(color: Srgba<u8>, width: f32) -> Self {
        Self {
            color,
            width,
            round_join: false,
        }
    }

    pub fn round(mut self) -> Self {
        self.round_join = true;
        self
    }

    fn stroke(&self) -> Stroke {
        Stroke {
            width: self.width,
            line_join: if self.round_join { LineJoin::Round } else { LineJoin::Miter },
            ..Stroke::default()
        }
    }
}

/// Blurred drop shadow with no offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Srgba<u8>,
    /// Blur extent in device pixels; the gaussian sigma is half of it.
    pub blur: f32,
}

/// How a set of paths is painted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShapePaint {
    pub fill: Option<Srgba<u8>>,
    pub outline: Option<Outline>,
    /// Extra stroke in the fill color, used to thicken glyphs.
    pub embolden: f32,
    pub shadow: Option<Shadow>,
}

/// Rectangle stroke options.
#[derive(Debug, Clone, PartialEq)]
pub struct RectStroke {
    pub color: Srgba<u8>,
    pub width: f32,
    /// On/off dash lengths; solid when `None`.
    pub dash: Option<[f32; 2]>,
}

// ============================================================================
// Canvas
// ============================================================================

/// A device pixmap addressed in logical units.
pub struct Canvas {
    pixmap: Pixmap,
    scale: f32,
    shadows: bool,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("scale", &self.scale)
            .finish()
    }
}

impl Canvas {
    /// Allocates a transparent canvas of `width × height` logical units at
    /// `scale` device pixels per unit.
    pub fn new(width: u32, height: u32, scale: f32) -> Result<Self> {
        let device_w = (width as f32 * scale).round() as u32;
        let device_h = (height as f32 * scale).round() as u32;
        let pixmap = Pixmap::new(device_w, device_h).ok_or(Error::Canvas {
            width: device_w,
            height: device_h,
        })?;
        Ok(Self {
            pixmap,
            scale,
            shadows: true,
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Enables or disables shadow rendering.
    pub fn set_shadows(&mut self, enabled: bool) {
        self.shadows = enabled;
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Logical to device mapping composed with `ts`.
    fn device(&self, ts: Transform) -> Transform {
        Transform::from_scale(self.scale, self.scale).pre_concat(ts)
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Srgba<u8>, ts: Transform) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let paint = solid(color);
        let device = self.device(ts);
        self.pixmap.fill_rect(rect, &paint, device, None);
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, stroke: &RectStroke, ts: Transform) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let mut style = Stroke {
            width: stroke.width,
            ..Stroke::default()
        };
        if let Some([on, off]) = stroke.dash {
            style.dash = StrokeDash::new(vec![on, off], 0.0);
        }
        let device = self.device(ts);
        self.pixmap
            .stroke_path(&path, &solid(stroke.color), &style, device, None);
    }

    /// Fills and optionally outlines a circle.
    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Srgba<u8>, outline: Option<Outline>, ts: Transform) {
        let Some(path) = PathBuilder::from_circle(cx, cy, r) else {
            return;
        };
        let device = self.device(ts);
        self.pixmap
            .fill_path(&path, &solid(fill), FillRule::Winding, device, None);
        if let Some(outline) = outline {
            self.pixmap
                .stroke_path(&path, &solid(outline.color), &outline.stroke(), device, None);
        }
    }

    /// Draws `image` stretched into the logical rect `(x, y, w, h)`.
    pub fn draw_image(&mut self, image: &Pixmap, x: f32, y: f32, w: f32, h: f32, ts: Transform) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let sx = w / image.width() as f32;
        let sy = h / image.height() as f32;
        let device = self.device(ts).pre_translate(x, y).pre_scale(sx, sy);
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(0, 0, image.as_ref(), &paint, device, None);
    }

    /// Paints glyph or shape outlines given in logical units.
    ///
    /// Order: shadow, outline, fill, embolden stroke.
    pub fn draw_paths(&mut self, paths: &[Path], style: &ShapePaint, ts: Transform) {
        if paths.is_empty() {
            return;
        }
        let device = self.device(ts);

        if let Some(shadow) = style.shadow.filter(|_| self.shadows) {
            self.draw_shadow(paths, style, shadow, device);
        }

        if let Some(outline) = style.outline {
            let paint = solid(outline.color);
            let stroke = outline.stroke();
            for path in paths {
                self.pixmap.stroke_path(path, &paint, &stroke, device, None);
            }
        }

        if let Some(fill) = style.fill {
            let paint = solid(fill);
            for path in paths {
                self.pixmap
                    .fill_path(path, &paint, FillRule::Winding, device, None);
            }
            if style.embolden > 0.0 {
                let stroke = Stroke {
                    width: style.embolden,
                    line_join: LineJoin::Round,
                    ..Stroke::default()
                };
                for path in paths {
                    self.pixmap.stroke_path(path, &paint, &stroke, device, None);
                }
            }
        }
    }

    /// Renders the silhouette of `paths` into a scratch pixmap covering
    /// their device bounds, blurs it and composites it underneath.
    fn draw_shadow(&mut self, paths: &[Path], style: &ShapePaint, shadow: Shadow, device: Transform) {
        let sigma = shadow.blur / 2.0;
        let spread = style.outline.map_or(0.0, |o| o.width) * self.scale;
        let margin = (sigma * 3.0 + spread).ceil() + 1.0;

        let Some(bounds) = paths
            .iter()
            .filter_map(|p| p.clone().transform(device))
            .map(|p| p.bounds())
            .reduce(|a, b| union(&a, &b).unwrap_or(a))
        else {
            return;
        };

        let left = (bounds.left() - margin).floor().max(0.0);
        let top = (bounds.top() - margin).floor().max(0.0);
        let right = (bounds.right() + margin).ceil().min(self.pixmap.width() as f32);
        let bottom = (bounds.bottom() + margin).ceil().min(self.pixmap.height() as f32);
        if right <= left || bottom <= top {
            return;
        }

        let Some(mut scratch) = Pixmap::new((right - left) as u32, (bottom - top) as u32) else {
            return;
        };
        let local = Transform::from_translate(-left, -top).pre_concat(device);
        let paint = solid(shadow.color);
        for path in paths {
            scratch.fill_path(path, &paint, FillRule::Winding, local, None);
            if let Some(outline) = style.outline {
                scratch.stroke_path(path, &paint, &outline.stroke(), local, None);
            }
        }

        let blurred = image::imageops::blur(&pixmap_to_image(&scratch), sigma);
        if let Some(blurred) = image_to_pixmap(&blurred) {
            self.pixmap.draw_pixmap(
                left as i32,
                top as i32,
                blurred.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
    }
}

fn solid(color: Srgba<u8>) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn union(a: &Rect, b: &Rect) -> Option<Rect> {
    Rect::from_ltrb(
        a.left().min(b.left()),
        a.top().min(b.top()),
        a.right().max(b.right()),
        a.bottom().max(b.bottom()),
    )
}

// ============================================================================
// Tests
// ============================================================================
