//! Hp and armor icon row.
//!
//! Up to [`COMPACT_THRESHOLD`](crate::geometry::COMPACT_THRESHOLD) icons
//! are drawn one per unit. Above it, each kind collapses to one icon plus
//! a `× n` counter.

use palette::Srgba;
use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::assets::HeartKind;
use crate::canvas::Outline;
use crate::card::ResolvedCard;
use crate::font::{FontFamily, FontStyle};
use crate::geometry::{ComponentId, HpRowMode};
use crate::text::{Baseline, TextStyle, draw_text, text_width};
use crate::theme::rgba;

/// Gap after each compact group.
const GROUP_GAP: f32 = 8.0;

/// Gap between a compact icon and its counter.
const LABEL_GAP: f32 = 2.0;

/// Fill for icons whose image is missing.
const MISSING_ICON: Srgba<u8> = rgba(0xff, 0x00, 0x00, 0xff);

/// Icon kinds of a grid row, left to right: current hp, lost hp, armor.
pub fn grid_icons(card: &ResolvedCard) -> impl Iterator<Item = HeartKind> + '_ {
    (0..card.max_hp)
        .map(|i| if i < card.hp { HeartKind::Full } else { HeartKind::Empty })
        .chain((0..card.armor).map(|_| HeartKind::Armor))
}

/// One icon-plus-counter group of a compact row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactGroup {
    pub kind: HeartKind,
    pub count: u32,
}

impl CompactGroup {
    pub fn label(&self) -> String {
        format!(" × {}", self.count)
    }

    pub fn label_color(&self) -> Srgba<u8> {
        match self.kind {
            HeartKind::Full => rgba(0xff, 0xff, 0xff, 0xff),
            HeartKind::Empty => rgba(0x99, 0x99, 0x99, 0xff),
            HeartKind::Armor => rgba(0x44, 0xaa, 0xff, 0xff),
        }
    }
}

/// Non-empty groups of a compact row, in draw order.
pub fn compact_groups(card: &ResolvedCard) -> Vec<CompactGroup> {
    [
        (HeartKind::Full, card.hp),
        (HeartKind::Empty, card.max_hp.saturating_sub(card.hp)),
        (HeartKind::Armor, card.armor),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(kind, count)| CompactGroup { kind, count })
    .collect()
}

/// Draws the hp/armor row in grid or compact mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct HpLayer;

impl HpLayer {
    fn icon(ctx: &mut RenderContext<'_>, kind: HeartKind, x: f32, y: f32, size: f32, ts: Transform) {
        match ctx.assets.heart(ctx.card().faction, kind) {
            Some(icon) => ctx.canvas.draw_image(&icon.pixmap, x, y, size, size, ts),
            None => ctx.canvas.fill_rect(x, y, size, size, MISSING_ICON, ts),
        }
    }
}

impl CardLayer for HpLayer {
    fn component(&self) -> Option<ComponentId> {
        Some(ComponentId::Hp)
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let card = ctx.card();
        let l = card.layout.hp;

        match ctx.geometry.hp_row() {
            HpRowMode::Grid { step } => {
                for (i, kind) in grid_icons(card).enumerate() {
                    Self::icon(ctx, kind, l.x + i as f32 * step, l.y, l.size, ts);
                }
            }
            HpRowMode::Compact => {
                let fonts = ctx.fonts();
                let mut cursor = l.x;
                for group in compact_groups(card) {
                    Self::icon(ctx, group.kind, cursor, l.y, l.size, ts);

                    let label = group.label();
                    let style = TextStyle::new(FontStyle::bold(FontFamily::BODY, 16.0), group.label_color())
                        .baseline(Baseline::Middle)
                        .outline(Outline::new(rgba(0, 0, 0, 0xff), 3.0));
                    let label_x = cursor + l.size + LABEL_GAP;
                    draw_text(ctx.canvas, fonts, &label, label_x, l.y + l.size / 2.0, &style, ts);

                    cursor += l.size + text_width(fonts, &label, &style) + GROUP_GAP;
                }
            }
        }
    }
}
