//! Card border frame.

use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::canvas::RectStroke;
use crate::card::Faction;
use crate::geometry::{CARD_HEIGHT, CARD_WIDTH};
use crate::recolor::TemplateKind;

/// Inset of the vector fallback frame.
const FALLBACK_INSET: f32 = 12.0;

/// Draws the recolored template frame, the faction frame, or an outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameLayer;

impl CardLayer for FrameLayer {
    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let (w, h) = (CARD_WIDTH as f32, CARD_HEIGHT as f32);
        let card = ctx.card();
        let assets = ctx.assets;

        if card.custom_border.is_some() {
            match assets.border(Faction::TEMPLATE) {
                Some(template) => {
                    if ctx.draw_recolored(TemplateKind::Border, template, 0.0, 0.0, w, h, ts) {
                        return;
                    }
                }
                None => log::warn!("missing border template, using {} frame", card.faction.slug()),
            }
        }

        match assets.border(card.faction) {
            Some(frame) => ctx.canvas.draw_image(&frame.pixmap, 0.0, 0.0, w, h, ts),
            None => {
                log::warn!("missing {} border, drawing outline", card.faction.slug());
                let stroke = RectStroke {
                    color: ctx.theme.border,
                    width: 4.0,
                    dash: None,
                };
                ctx.canvas.stroke_rect(
                    FALLBACK_INSET,
                    FALLBACK_INSET,
                    w - 2.0 * FALLBACK_INSET,
                    h - 2.0 * FALLBACK_INSET,
                    &stroke,
                    ts,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetKey, AssetStore};
    use crate::card::CardData;
    use crate::layer::tests::render_layers;
    use crate::layer::{DetailLevel, LayerPipeline};
    use image::{Rgba, RgbaImage};

    fn pixel_at(canvas: &crate::canvas::Canvas, x: u32, y: u32) -> [u8; 4] {
        let p = canvas.pixmap().pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    /// Resampling may shift a channel by a step or two.
    fn assert_near(actual: [u8; 4], expected: [u8; 4]) {
        let close = actual.iter().zip(expected).all(|(a, e)| a.abs_diff(e) <= 2);
        assert!(close, "{actual:?} != {expected:?}");
    }

    #[test]
    fn missing_frame_draws_theme_outline() {
        let card = CardData {
            faction: "蜀".into(),
            ..CardData::default()
        }
        .resolve()
        .unwrap();
        let canvas = render_layers(
            &LayerPipeline::empty().with(FrameLayer),
            &card,
            &AssetStore::new(),
            DetailLevel::Full,
        );
        assert_eq!(pixel_at(&canvas, 12, 200), [0xa8, 0x2e, 0x2e, 255]);
        assert_eq!(pixel_at(&canvas, 200, 200)[3], 0);
    }

    #[test]
    fn custom_border_recolors_template() {
        let mut assets = AssetStore::new();
        assets.insert_image(
            AssetKey::Border(Faction::Qun),
            RgbaImage::from_pixel(40, 57, Rgba([0, 0, 0, 255])),
        );
        let card = CardData {
            faction: "魏".into(),
            enable_custom_border: true,
            border_color: "#81b2d1".into(),
            ..CardData::default()
        }
        .resolve()
        .unwrap();

        let canvas = render_layers(
            &LayerPipeline::empty().with(FrameLayer),
            &card,
            &assets,
            DetailLevel::Full,
        );
        assert_near(pixel_at(&canvas, 200, 300), [0x81, 0xb2, 0xd1, 255]);
    }

    #[test]
    fn faction_frame_is_used_unmodified() {
        let mut assets = AssetStore::new();
        assets.insert_image(
            AssetKey::Border(Faction::Wu),
            RgbaImage::from_pixel(40, 57, Rgba([0, 0, 0, 255])),
        );
        let card = CardData {
            faction: "吳".into(),
            ..CardData::default()
        }
        .resolve()
        .unwrap();

        let canvas = render_layers(
            &LayerPipeline::empty().with(FrameLayer),
            &card,
            &assets,
            DetailLevel::Full,
        );
        assert_near(pixel_at(&canvas, 200, 300), [0, 0, 0, 255]);
    }
}
