//! Faction glyph in the top-left corner.

use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::canvas::{Outline, Shadow};
use crate::card::ResolvedCard;
use crate::font::{FontFamily, FontStyle};
use crate::geometry::ComponentId;
use crate::text::{Align, Baseline, TextStyle, draw_text};
use crate::theme::rgba;

/// Draws the faction label, hidden when the card asks for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactionLayer;

impl CardLayer for FactionLayer {
    fn component(&self) -> Option<ComponentId> {
        Some(ComponentId::Faction)
    }

    fn is_visible(&self, card: &ResolvedCard) -> bool {
        !card.hide_faction
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let card = ctx.card();
        let l = card.layout.faction;
        let black = rgba(0, 0, 0, 0xff);

        let style = TextStyle::new(
            FontStyle::regular(FontFamily::HuangCao, l.size),
            rgba(0xff, 0xff, 0xff, 0xff),
        )
        .align(Align::Center)
        .baseline(Baseline::Middle)
        .outline(Outline::new(black, 4.0).round())
        .shadow(Shadow { color: black, blur: 4.0 });

        draw_text(ctx.canvas, ctx.fonts(), &card.faction_label, l.x, l.y, &style, ts);
    }
}
