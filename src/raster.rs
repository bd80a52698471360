//! Conversions between `image` buffers and tiny-skia pixmaps, plus SVG
//! rasterization for vector assets.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{ColorU8, Pixmap, Transform};
use resvg::usvg::{Options, Tree};

// ============================================================================
// LoadedImage
// ============================================================================

/// A decoded image in both representations the renderer needs.
///
/// `image` keeps straight alpha for pixel-level processing such as
/// recoloring; `pixmap` is the premultiplied copy used for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub image: RgbaImage,
    pub pixmap: Pixmap,
}

impl LoadedImage {
    /// Wraps a straight-alpha image. `None` for zero-sized images.
    pub fn new(image: RgbaImage) -> Option<Self> {
        let pixmap = image_to_pixmap(&image)?;
        Some(Self { image, pixmap })
    }

    /// Decodes any format the `image` crate recognizes.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::new(image).ok_or_else(|| {
            image::ImageError::Limits(image::error::LimitError::from_kind(
                image::error::LimitErrorKind::DimensionError,
            ))
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.width() as f32 / self.height().max(1) as f32
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Premultiplies a straight-alpha image into a new pixmap.
///
/// Returns `None` if either dimension is zero.
pub fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Demultiplies a pixmap into a straight-alpha image.
pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

// ============================================================================
// SVG
// ============================================================================

/// Rasterizes SVG data at `scale` times its intrinsic size.
///
/// Returns `None` if the SVG cannot be parsed or has no area.
pub fn rasterize_svg(data: &[u8], scale: f32) -> Option<RgbaImage> {
    let tree = Tree::from_data(data, &Options::default()).ok()?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Some(pixmap_to_image(&pixmap))
}

// ============================================================================
// Tests
// ============================================================================
