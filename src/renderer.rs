//! Card rendering engine: the full and interactive render paths.

use std::path::PathBuf;

use crate::assets::AssetStore;
use crate::canvas::Canvas;
use crate::card::{CardData, ResolvedCard};
use crate::error::{Error, Result};
use crate::geometry::{CARD_HEIGHT, CARD_WIDTH, CardGeometry};
use crate::layer::{DetailLevel, LayerPipeline, RenderContext};
use crate::output::{RenderedCard, encode_png};
use crate::raster::{LoadedImage, pixmap_to_image};
use crate::recolor::RecolorCache;
use crate::schedule::{RenderGeneration, RenderTicket};
use crate::theme::resolve_theme;

/// Device pixels per card unit of a normal render.
pub const SUPERSAMPLE: f32 = 3.0;

// ============================================================================
// Requests
// ============================================================================

/// Where the portrait art comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortraitSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl PortraitSource {
    /// Reads and decodes the portrait. Any failure is [`Error::Portrait`].
    pub fn load(&self) -> Result<LoadedImage> {
        let decoded = match self {
            PortraitSource::Path(path) => std::fs::read(path)
                .map_err(image::ImageError::IoError)
                .and_then(|bytes| LoadedImage::decode(&bytes)),
            PortraitSource::Bytes(bytes) => LoadedImage::decode(bytes),
        };
        decoded.map_err(Error::Portrait)
    }
}

/// Input of a full render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderRequest {
    pub card: CardData,
    pub portrait: Option<PortraitSource>,
}

impl RenderRequest {
    pub fn new(card: CardData) -> Self {
        Self {
            card,
            portrait: None,
        }
    }

    pub fn with_portrait(mut self, portrait: PortraitSource) -> Self {
        self.portrait = Some(portrait);
        self
    }
}

// ============================================================================
// CardRenderer
// ============================================================================

/// Renders cards from loaded assets.
///
/// The renderer owns the assets, the layer pipeline and the recolor cache.
/// Each render resolves its theme and geometry from scratch, so renders of
/// different cards never share mutable drawing state.
///
/// # Render paths
///
/// - [`render_full`](Self::render_full) resolves the raw card, loads the
///   portrait, draws everything and encodes a PNG.
/// - [`render_fast`](Self::render_fast) reuses an already resolved card and
///   portrait and skips shadows and encoding, for pointer-drag feedback.
///
/// Both go through [`compose`](Self::compose) with a different
/// [`DetailLevel`].
#[derive(Debug)]
pub struct CardRenderer {
    assets: AssetStore,
    pipeline: LayerPipeline,
    recolor: RecolorCache,
    generation: RenderGeneration,
    scale: f32,
}

impl CardRenderer {
    pub fn new(assets: AssetStore) -> Self {
        Self {
            assets,
            pipeline: LayerPipeline::standard(),
            recolor: RecolorCache::new(),
            generation: RenderGeneration::new(),
            scale: SUPERSAMPLE,
        }
    }

    /// Replaces the layer pipeline.
    pub fn with_pipeline(mut self, pipeline: LayerPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Overrides the supersample factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self.recolor.clear();
        self
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Swaps in a new asset store. Recolored templates are dropped.
    pub fn set_assets(&mut self, assets: AssetStore) {
        self.assets = assets;
        self.recolor.clear();
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Geometry of `card` as this renderer lays it out.
    pub fn geometry<'c>(&self, card: &'c ResolvedCard) -> CardGeometry<'c> {
        CardGeometry::new(card, &self.assets.fonts)
    }

    /// Number of recolored templates held.
    pub fn cached_recolors(&self) -> usize {
        self.recolor.len()
    }

    /// Frees every recolored template.
    pub fn clear_cache(&mut self) {
        self.recolor.clear();
    }

    /// Whether a render with `ticket` is still the latest.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        self.generation.is_current(ticket)
    }

    /// Resolves, loads the portrait, draws and encodes.
    ///
    /// Fails when the card layout or the portrait cannot be loaded; no image
    /// is produced in that case.
    pub fn render_full(&mut self, request: &RenderRequest) -> Result<RenderedCard> {
        let card = request.card.resolve()?;
        let portrait = request.portrait.as_ref().map(PortraitSource::load).transpose()?;
        self.compose(&card, portrait.as_ref(), DetailLevel::Full)
    }

    /// Draws without shadows or encoding.
    pub fn render_fast(&mut self, card: &ResolvedCard, portrait: Option<&LoadedImage>) -> Result<RenderedCard> {
        self.compose(card, portrait, DetailLevel::Interactive)
    }

    /// Runs the layer pipeline for `card` at `detail`.
    pub fn compose(
        &mut self,
        card: &ResolvedCard,
        portrait: Option<&LoadedImage>,
        detail: DetailLevel,
    ) -> Result<RenderedCard> {
        let ticket = self.generation.begin();
        log::debug!("render {} of {:?} at {detail:?}", ticket.generation(), card.name);

        let mut canvas = Canvas::new(CARD_WIDTH, CARD_HEIGHT, self.scale)?;
        canvas.set_shadows(detail.draws_shadows());

        let geometry = CardGeometry::new(card, &self.assets.fonts);
        if !geometry.skill_layout().fits() {
            log::debug!("skills overflow at the smallest tier");
        }

        let mut ctx = RenderContext {
            canvas: &mut canvas,
            geometry: &geometry,
            assets: &self.assets,
            theme: resolve_theme(card.faction),
            recolor: &mut self.recolor,
            portrait,
            detail,
        };
        self.pipeline.draw(&mut ctx);

        let image = pixmap_to_image(canvas.pixmap());
        let png = if detail.encodes_png() {
            Some(encode_png(&image)?)
        } else {
            None
        };

        Ok(RenderedCard {
            image,
            scale: self.scale,
            png,
            ticket,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn renderer() -> CardRenderer {
        CardRenderer::new(AssetStore::new()).with_scale(1.0)
    }

    #[test]
    fn full_render_encodes_png() {
        let mut renderer = renderer();
        let out = renderer.render_full(&RenderRequest::default()).unwrap();
        assert_eq!(out.dimensions(), (400, 570));
        assert!(out.png.is_some());
        assert!(renderer.is_current(out.ticket));
    }

    #[test]
    fn fast_render_skips_encoding() {
        let mut renderer = renderer();
        let card = CardData::default().resolve().unwrap();
        let out = renderer.render_fast(&card, None).unwrap();
        assert!(out.png.is_none());
    }

    #[test]
    fn later_render_supersedes_earlier() {
        let mut renderer = renderer();
        let card = CardData::default().resolve().unwrap();
        let first = renderer.render_fast(&card, None).unwrap();
        let second = renderer.render_fast(&card, None).unwrap();
        assert!(!renderer.is_current(first.ticket));
        assert!(renderer.is_current(second.ticket));
    }

    #[test]
    fn portrait_failure_is_reported() {
        let mut renderer = renderer();
        let request = RenderRequest::default().with_portrait(PortraitSource::Bytes(b"not an image".to_vec()));
        assert!(matches!(renderer.render_full(&request), Err(Error::Portrait(_))));

        let request = RenderRequest::default()
            .with_portrait(PortraitSource::Path("/nonexistent/portrait.png".into()));
        assert!(matches!(renderer.render_full(&request), Err(Error::Portrait(_))));
    }

    #[test]
    fn portrait_covers_the_card() {
        let mut renderer = renderer();
        let mut png = std::io::Cursor::new(Vec::new());
        RgbaImage::from_pixel(10, 10, Rgba([0, 200, 0, 255]))
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();
        let request = RenderRequest::default().with_portrait(PortraitSource::Bytes(png.into_inner()));

        let out = renderer.render_full(&request).unwrap();
        // Inside the frame outline and clear of every component.
        let [r, g, b, a] = out.image.get_pixel(200, 300).0;
        assert!(r < 8 && g > 190 && b < 8 && a == 255);
    }

    #[test]
    fn invalid_layout_is_an_error() {
        let mut renderer = renderer();
        let request = RenderRequest::new(CardData {
            layouts: serde_json::json!({ "faction": { "size": "big" } }),
            ..CardData::default()
        });
        assert!(matches!(renderer.render_full(&request), Err(Error::Layout(_))));
    }

    #[test]
    fn recolored_templates_are_cached_across_renders() {
        let mut assets = AssetStore::new();
        assets.insert_image(
            crate::assets::AssetKey::Border(crate::card::Faction::Qun),
            RgbaImage::from_pixel(40, 57, Rgba([0, 0, 0, 255])),
        );
        let mut renderer = CardRenderer::new(assets).with_scale(1.0);
        let card = CardData {
            enable_custom_border: true,
            ..CardData::default()
        }
        .resolve()
        .unwrap();

        renderer.render_fast(&card, None).unwrap();
        assert_eq!(renderer.cached_recolors(), 1);
        renderer.render_fast(&card, None).unwrap();
        assert_eq!(renderer.cached_recolors(), 1);

        renderer.clear_cache();
        assert_eq!(renderer.cached_recolors(), 0);
    }

    #[test]
    fn scrubbing_border_colors_keeps_one_color_cached() {
        let mut assets = AssetStore::new();
        assets.insert_image(
            crate::assets::AssetKey::Border(crate::card::Faction::Qun),
            RgbaImage::from_pixel(40, 57, Rgba([0, 0, 0, 255])),
        );
        assets.insert_image(
            crate::assets::AssetKey::Badge(crate::card::Faction::Qun),
            RgbaImage::from_pixel(14, 6, Rgba([0, 0, 0, 255])),
        );
        let mut renderer = CardRenderer::new(assets).with_scale(1.0);

        for i in 0..20u32 {
            let card = CardData {
                enable_custom_border: true,
                border_color: format!("#{:02x}8080", i * 10),
                skills: vec![crate::card::SkillDescriptor::new("冻结", crate::card::SkillType::Normal, "x")],
                ..CardData::default()
            }
            .resolve()
            .unwrap();
            renderer.render_fast(&card, None).unwrap();
            assert_eq!(renderer.cached_recolors(), 2);
        }
    }

    #[test]
    fn extreme_icon_counts_render_in_compact_mode() {
        let mut renderer = renderer();
        let card = CardData {
            hp: 1,
            max_hp: u32::MAX,
            armor: 1,
            ..CardData::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(renderer.geometry(&card).hp_row(), crate::geometry::HpRowMode::Compact);
        assert!(renderer.render_fast(&card, None).is_ok());
    }
}
