//! Template recoloring for custom faction borders and skill badges.
//!
//! Templates are neutral line art: near-black strokes on transparent or
//! light fills. Recoloring swaps the near-black pixels for a target color
//! and leaves every other pixel untouched, so anti-aliased edges and
//! highlights keep their original look.

use std::collections::HashMap;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use palette::Srgb;
use resvg::tiny_skia::Pixmap;

use crate::raster::image_to_pixmap;

/// A pixel is recolored when its red, green and blue are all below this.
pub const DARKNESS_THRESHOLD: u8 = 30;

/// Returns a recolored copy of `template`.
///
/// Pixels with every channel below [`DARKNESS_THRESHOLD`] and nonzero alpha
/// take the target RGB and keep their alpha. All other pixels are copied
/// unchanged.
pub fn recolor_template(template: &RgbaImage, target: Srgb<u8>) -> RgbaImage {
    let mut result = template.clone();

    for pixel in result.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 0 || r >= DARKNESS_THRESHOLD || g >= DARKNESS_THRESHOLD || b >= DARKNESS_THRESHOLD {
            continue;
        }
        pixel.0 = [target.red, target.green, target.blue, a];
    }

    result
}

/// Resizes `template` to `width × height` on a scratch buffer, then
/// recolors it.
///
/// Thresholding runs after resampling so edges introduced by the resize
/// are treated exactly like the template's own edges.
pub fn recolor_scaled(template: &RgbaImage, target: Srgb<u8>, width: u32, height: u32) -> RgbaImage {
    if template.dimensions() == (width, height) {
        return recolor_template(template, target);
    }
    let scratch = imageops::resize(template, width, height, FilterType::Triangle);
    recolor_template(&scratch, target)
}

// ============================================================================
// RecolorCache
// ============================================================================

/// Which template a recolored image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Border,
    Badge,
}

/// Identifies one recolored output: template, color and device size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecolorKey {
    kind: TemplateKind,
    rgb: [u8; 3],
    width: u32,
    height: u32,
}

impl RecolorKey {
    pub fn new(kind: TemplateKind, target: Srgb<u8>, width: u32, height: u32) -> Self {
        Self {
            kind,
            rgb: [target.red, target.green, target.blue],
            width,
            height,
        }
    }

    pub fn target(&self) -> Srgb<u8> {
        let [r, g, b] = self.rgb;
        Srgb::new(r, g, b)
    }
}

/// Recolored templates ready to blit, keyed by [`RecolorKey`].
///
/// Every badge on a card shares one entry. Only one target color is held
/// at a time: recoloring for a new color evicts the others. The cache must
/// be cleared when the template images change.
#[derive(Debug, Default)]
pub struct RecolorCache {
    entries: HashMap<RecolorKey, Pixmap>,
}

impl RecolorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recolored pixmap for `key`, producing it from `template`
    /// on a miss. `None` when the key has a zero dimension.
    pub fn get_or_recolor(&mut self, key: RecolorKey, template: &RgbaImage) -> Option<&Pixmap> {
        if !self.entries.contains_key(&key) {
            let before = self.entries.len();
            self.entries.retain(|cached, _| cached.rgb == key.rgb);
            if self.entries.len() < before {
                log::trace!("evicted {} recolored templates", before - self.entries.len());
            }
            let recolored = recolor_scaled(template, key.target(), key.width, key.height);
            let pixmap = image_to_pixmap(&recolored)?;
            log::trace!("recolored {:?} template at {}x{}", key.kind, key.width, key.height);
            self.entries.insert(key, pixmap);
        }
        self.entries.get(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
