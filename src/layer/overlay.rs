//! Edit-mode indicators for the hovered and selected components.

use palette::Srgba;
use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::canvas::{Outline, RectStroke};
use crate::card::ResolvedCard;
use crate::geometry::{ComponentId, ComponentRect};
use crate::theme::rgba;

/// Hover box color.
pub const HIGHLIGHT_COLOR: Srgba<u8> = rgba(0x00, 0xff, 0xcc, 0xff);

/// Selection box color.
pub const SELECTED_COLOR: Srgba<u8> = rgba(0xff, 0xcc, 0x00, 0xff);

/// Edge of the square resize handle.
pub const RESIZE_HANDLE_SIZE: f32 = 8.0;

/// Radius of the rotate handle.
pub const ROTATE_HANDLE_RADIUS: f32 = 5.0;

/// Distance of the rotate handle above the top edge.
pub const ROTATE_HANDLE_OFFSET: f32 = 20.0;

const WHITE: Srgba<u8> = rgba(0xff, 0xff, 0xff, 0xff);

/// Dashed box around the highlighted component, solid box with handles
/// around the selected one. Both follow the component's rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditOverlay;

impl EditOverlay {
    fn draw_box(ctx: &mut RenderContext<'_>, rect: ComponentRect, selected: bool) {
        // Local frame: origin at the center, axes along the rotated rect.
        let ts = Transform::from_translate(rect.cx(), rect.cy()).pre_rotate(rect.rotation);
        let (hw, hh) = (rect.width / 2.0, rect.height / 2.0);

        let color = if selected { SELECTED_COLOR } else { HIGHLIGHT_COLOR };
        let stroke = RectStroke {
            color,
            width: 2.0,
            dash: (!selected).then_some([5.0, 5.0]),
        };
        ctx.canvas
            .stroke_rect(-hw, -hh, rect.width, rect.height, &stroke, ts);

        if selected {
            let half = RESIZE_HANDLE_SIZE / 2.0;
            ctx.canvas
                .fill_rect(hw - half, hh - half, RESIZE_HANDLE_SIZE, RESIZE_HANDLE_SIZE, WHITE, ts);
            ctx.canvas.circle(
                0.0,
                -hh - ROTATE_HANDLE_OFFSET,
                ROTATE_HANDLE_RADIUS,
                WHITE,
                Some(Outline::new(color, 2.0)),
                ts,
            );
        }
    }
}

impl CardLayer for EditOverlay {
    fn is_visible(&self, card: &ResolvedCard) -> bool {
        card.in_edit_mode()
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, _ts: Transform) {
        let card = ctx.card();
        let geometry = ctx.geometry;

        if let Some(id) = card.highlight.filter(|id| shows_highlight(card, *id)) {
            Self::draw_box(ctx, geometry.rect_of(id), false);
        }
        if let Some(id) = card.selected {
            Self::draw_box(ctx, geometry.rect_of(id), true);
        }
    }
}

/// Whether `id` is drawn with a dashed hover box for this card.
pub fn shows_highlight(card: &ResolvedCard, id: ComponentId) -> bool {
    card.highlight == Some(id) && card.selected != Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetStore;
    use crate::card::CardData;
    use crate::layer::tests::render_layers;
    use crate::layer::{DetailLevel, LayerPipeline};

    fn pixel_at(canvas: &crate::canvas::Canvas, x: u32, y: u32) -> [u8; 4] {
        let p = canvas.pixmap().pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    fn edit_card(selected: Option<&str>, highlight: Option<&str>) -> ResolvedCard {
        CardData {
            selected: selected.map(str::to_string),
            highlight: highlight.map(str::to_string),
            ..CardData::default()
        }
        .resolve()
        .unwrap()
    }

    #[test]
    fn nothing_drawn_outside_edit_mode() {
        let card = edit_card(None, None);
        assert!(!EditOverlay.is_visible(&card));
    }

    #[test]
    fn highlight_is_suppressed_on_the_selected_component() {
        let card = edit_card(Some("faction"), Some("faction"));
        assert!(!shows_highlight(&card, ComponentId::Faction));
        let card = edit_card(Some("hp"), Some("faction"));
        assert!(shows_highlight(&card, ComponentId::Faction));
    }

    #[test]
    fn selected_box_has_handles() {
        // Faction rect: (5, 20) to (85, 100), center (45, 60).
        let card = edit_card(Some("faction"), None);
        let canvas = render_layers(
            &LayerPipeline::empty().with(EditOverlay),
            &card,
            &AssetStore::new(),
            DetailLevel::Interactive,
        );
        // Left edge of the solid box.
        assert_eq!(pixel_at(&canvas, 5, 60), [0xff, 0xcc, 0x00, 0xff]);
        // Resize handle centered on the bottom-right corner.
        assert_eq!(pixel_at(&canvas, 87, 102), [0xff, 0xff, 0xff, 0xff]);
        // Rotate handle 20 units above the top edge.
        assert_eq!(pixel_at(&canvas, 45, 0), [0xff, 0xff, 0xff, 0xff]);
        // Interior stays clear.
        assert_eq!(pixel_at(&canvas, 45, 60)[3], 0);
    }
}
