//! Finished card rasters.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::schedule::RenderTicket;

/// A composed card at supersampled resolution.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    /// Straight-alpha pixels at `scale` device pixels per card unit.
    pub image: RgbaImage,
    /// Supersample factor.
    pub scale: f32,
    /// Encoded PNG, present on the full render path only.
    pub png: Option<Vec<u8>>,
    /// Generation this render belongs to.
    pub ticket: RenderTicket,
}

impl RenderedCard {
    /// Card size in logical units.
    pub fn logical_size(&self) -> (u32, u32) {
        let (w, h) = self.image.dimensions();
        (
            (w as f32 / self.scale).round() as u32,
            (h as f32 / self.scale).round() as u32,
        )
    }

    /// Device pixel size.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The raster downscaled to logical size for display.
    pub fn display_image(&self) -> RgbaImage {
        let (w, h) = self.logical_size();
        if (w, h) == self.image.dimensions() {
            return self.image.clone();
        }
        imageops::resize(&self.image, w, h, FilterType::Lanczos3)
    }

    /// PNG bytes, encoding now if the render did not.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        match &self.png {
            Some(png) => Ok(png.clone()),
            None => encode_png(&self.image),
        }
    }
}

/// Encodes `image` as PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(Error::Encode)?;
    Ok(out.into_inner())
}
