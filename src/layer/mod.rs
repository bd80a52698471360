//! Composition layers for a card render.
//!
//! Each visual step of a card is a [`CardLayer`]. The [`LayerPipeline`]
//! walks them in a fixed order and, for layers tied to a movable component,
//! wraps the draw in that component's rotate-about-center transform.
//!
//! # Architecture
//!
//! Layers never keep state between renders. Everything a layer reads comes
//! through [`RenderContext`]:
//! - the resolved card and its geometry
//! - the theme for this render, resolved fresh from the faction
//! - loaded assets and fonts
//! - the recolor cache shared across renders
//!
//! The same pipeline serves both the full and the interactive render path;
//! [`DetailLevel`] tells layers which expensive steps to skip.

pub mod background;
pub mod faction;
pub mod frame;
pub mod hero;
pub mod hp;
pub mod overlay;
pub mod skills;

pub use background::BackgroundLayer;
pub use faction::FactionLayer;
pub use frame::FrameLayer;
pub use hero::HeroInfoLayer;
pub use hp::HpLayer;
pub use overlay::EditOverlay;
pub use skills::{SkillBoxLayer, SkillTagsLayer, SkillTextLayer};

use resvg::tiny_skia::Transform;

use crate::assets::AssetStore;
use crate::canvas::Canvas;
use crate::card::ResolvedCard;
use crate::font::FontBook;
use crate::geometry::{CardGeometry, ComponentId};
use crate::raster::LoadedImage;
use crate::recolor::{RecolorCache, RecolorKey, TemplateKind};
use crate::theme::ThemeColors;

// ============================================================================
// DetailLevel
// ============================================================================

/// How much work a render does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    /// Everything, including shadows and PNG encoding.
    #[default]
    Full,
    /// Pointer-drag feedback: no shadow blur, no encoding.
    Interactive,
}

impl DetailLevel {
    pub fn draws_shadows(self) -> bool {
        self == DetailLevel::Full
    }

    pub fn encodes_png(self) -> bool {
        self == DetailLevel::Full
    }
}

// ============================================================================
// Render Context
// ============================================================================

/// Everything a layer may read or draw into during one render.
pub struct RenderContext<'a> {
    pub canvas: &'a mut Canvas,
    pub geometry: &'a CardGeometry<'a>,
    pub assets: &'a AssetStore,
    /// Theme for this render only.
    pub theme: ThemeColors,
    pub recolor: &'a mut RecolorCache,
    pub portrait: Option<&'a LoadedImage>,
    pub detail: DetailLevel,
}

impl<'a> RenderContext<'a> {
    pub fn card(&self) -> &'a ResolvedCard {
        self.geometry.card()
    }

    pub fn fonts(&self) -> &'a FontBook {
        &self.assets.fonts
    }

    /// Draws `template` recolored to the card's custom border color into
    /// the logical rect `(x, y, w, h)`.
    ///
    /// The template is resampled to the rect's device size off-screen and
    /// blitted once. Returns `false`, drawing nothing, when custom borders
    /// are off or the rect has no area.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_recolored(
        &mut self,
        kind: TemplateKind,
        template: &LoadedImage,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        ts: Transform,
    ) -> bool {
        let Some(target) = self.card().custom_border else {
            return false;
        };
        let scale = self.canvas.scale();
        let key = RecolorKey::new(kind, target, (w * scale).round() as u32, (h * scale).round() as u32);
        match self.recolor.get_or_recolor(key, &template.image) {
            Some(pixmap) => {
                self.canvas.draw_image(pixmap, x, y, w, h, ts);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// One step of the composition pipeline.
pub trait CardLayer: Send + Sync {
    /// Component whose transform wraps this layer, if any.
    fn component(&self) -> Option<ComponentId> {
        None
    }

    /// Whether the layer draws anything for this card.
    fn is_visible(&self, _card: &ResolvedCard) -> bool {
        true
    }

    /// Draws the layer. `ts` is the component transform in logical units.
    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform);
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// Ordered list of layers.
pub struct LayerPipeline {
    layers: Vec<Box<dyn CardLayer>>,
}

impl std::fmt::Debug for LayerPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerPipeline")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl Default for LayerPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl LayerPipeline {
    pub fn empty() -> Self {
        Self { layers: Vec::new() }
    }

    /// The card's fixed draw order: art, frame, hero column, faction glyph,
    /// hp row, skill box, badges, descriptions, then edit indicators.
    pub fn standard() -> Self {
        Self::empty()
            .with(BackgroundLayer)
            .with(FrameLayer)
            .with(HeroInfoLayer)
            .with(FactionLayer)
            .with(HpLayer)
            .with(SkillBoxLayer)
            .with(SkillTagsLayer)
            .with(SkillTextLayer)
            .with(EditOverlay)
    }

    pub fn with(mut self, layer: impl CardLayer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Draws every visible layer in order.
    pub fn draw(&self, ctx: &mut RenderContext<'_>) {
        for layer in &self.layers {
            if !layer.is_visible(ctx.card()) {
                continue;
            }
            let ts = layer
                .component()
                .map_or(Transform::identity(), |id| ctx.geometry.rect_of(id).transform());
            layer.draw(ctx, ts);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::card::CardData;
    use crate::font::EstimatedMetrics;
    use crate::theme::resolve_theme;
    use std::sync::{Arc, Mutex};

    /// Draws `layers` for `card` onto a 1× canvas.
    pub(crate) fn render_layers(
        pipeline: &LayerPipeline,
        card: &ResolvedCard,
        assets: &AssetStore,
        detail: DetailLevel,
    ) -> Canvas {
        let geometry = CardGeometry::new(card, &EstimatedMetrics);
        let mut canvas = Canvas::new(400, 570, 1.0).unwrap();
        canvas.set_shadows(detail.draws_shadows());
        let mut recolor = RecolorCache::new();
        let mut ctx = RenderContext {
            canvas: &mut canvas,
            geometry: &geometry,
            assets,
            theme: resolve_theme(card.faction),
            recolor: &mut recolor,
            portrait: None,
            detail,
        };
        pipeline.draw(&mut ctx);
        canvas
    }

    struct Recorder {
        id: Option<ComponentId>,
        log: Arc<Mutex<Vec<(Option<ComponentId>, bool)>>>,
    }

    impl CardLayer for Recorder {
        fn component(&self) -> Option<ComponentId> {
            self.id
        }

        fn is_visible(&self, card: &ResolvedCard) -> bool {
            self.id != Some(ComponentId::Faction) || !card.hide_faction
        }

        fn draw(&self, _ctx: &mut RenderContext<'_>, ts: Transform) {
            self.log.lock().unwrap().push((self.id, ts.is_identity()));
        }
    }

    #[test]
    fn standard_pipeline_has_every_step() {
        assert_eq!(LayerPipeline::standard().len(), 9);
    }

    #[test]
    fn pipeline_applies_component_transforms_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = |id| Recorder {
            id,
            log: Arc::clone(&log),
        };
        let pipeline = LayerPipeline::empty()
            .with(recorder(None))
            .with(recorder(Some(ComponentId::Faction)))
            .with(recorder(Some(ComponentId::Hp)));

        let card = CardData {
            layouts: serde_json::json!({ "hp": { "rotation": 12 } }),
            ..CardData::default()
        }
        .resolve()
        .unwrap();
        render_layers(&pipeline, &card, &AssetStore::new(), DetailLevel::Full);

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                (None, true),
                (Some(ComponentId::Faction), true),
                (Some(ComponentId::Hp), false),
            ]
        );
    }

    #[test]
    fn hidden_layers_are_skipped() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = LayerPipeline::empty().with(Recorder {
            id: Some(ComponentId::Faction),
            log: Arc::clone(&log),
        });
        let card = CardData {
            hide_faction: true,
            ..CardData::default()
        }
        .resolve()
        .unwrap();
        render_layers(&pipeline, &card, &AssetStore::new(), DetailLevel::Full);
        assert!(log.lock().unwrap().is_empty());
    }
}
