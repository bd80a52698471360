//! Vertical title and name column.

use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::canvas::{Outline, Shadow};
use crate::font::FontStyle;
use crate::geometry::{ComponentId, HERO_NAME_GAP};
use crate::text::{Align, Baseline, TextStyle, draw_text};
use crate::theme::rgba;

const BLACK: palette::Srgba<u8> = rgba(0, 0, 0, 0xff);

/// Draws the title and the name one character per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeroInfoLayer;

impl CardLayer for HeroInfoLayer {
    fn component(&self) -> Option<ComponentId> {
        Some(ComponentId::HeroInfo)
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let card = ctx.card();
        let fonts = ctx.fonts();
        let l = card.layout.hero_info;

        let title_style = TextStyle::new(FontStyle::regular(card.title_font, l.title_size), card.title_color)
            .align(Align::Center)
            .baseline(Baseline::Top)
            .outline(Outline::new(BLACK, 2.0));
        for (i, ch) in card.title.chars().enumerate() {
            let y = l.y + i as f32 * l.title_spacing;
            draw_text(ctx.canvas, fonts, ch.encode_utf8(&mut [0; 4]), l.x, y, &title_style, ts);
        }

        let name_top = l.y + card.title.chars().count() as f32 * l.title_spacing + HERO_NAME_GAP;
        let name_style = TextStyle::new(FontStyle::regular(card.name_font, l.name_size), card.name_color)
            .align(Align::Center)
            .baseline(Baseline::Top)
            .outline(Outline::new(BLACK, 3.0).round())
            .shadow(Shadow { color: BLACK, blur: 4.0 });
        for (i, ch) in card.name.chars().enumerate() {
            let y = name_top + i as f32 * l.name_spacing;
            draw_text(ctx.canvas, fonts, ch.encode_utf8(&mut [0; 4]), l.x, y, &name_style, ts);
        }
    }
}
