//! Skill box, skill name badges and skill descriptions.
//!
//! All three layers read the same [`SkillLayout`](crate::text::SkillLayout)
//! from the card geometry, so badge `i` and description block `i` always
//! share a top edge.

use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::assets::AssetKey;
use crate::card::Faction;
use crate::font::{FontFamily, FontStyle};
use crate::geometry::ComponentId;
use crate::recolor::TemplateKind;
use crate::text::{Align, Baseline, TextStyle, draw_text};
use crate::theme::{SKILL_TEXT, rgba};

// ============================================================================
// Skill box
// ============================================================================

/// Right inset of the flavor line.
const FLAVOR_INSET_X: f32 = 10.0;

/// Distance of the flavor baseline above the box bottom.
const FLAVOR_INSET_Y: f32 = 18.0;

/// Translucent panel with the flavor line and footer art.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillBoxLayer;

impl CardLayer for SkillBoxLayer {
    fn component(&self) -> Option<ComponentId> {
        Some(ComponentId::SkillBox)
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let card = ctx.card();
        let l = card.layout.skill_box;
        let top = ctx.geometry.skill_box_top();
        let height = ctx.geometry.skill_box_height();
        let bottom = top + height;

        ctx.canvas.fill_rect(l.x, top, l.w, height, ctx.theme.skill_box_bg, ts);

        if !card.flavor.is_empty() {
            let style = TextStyle::new(FontStyle::regular(FontFamily::BODY, 11.0), rgba(0x44, 0x44, 0x44, 0xff))
                .align(Align::Right);
            draw_text(
                ctx.canvas,
                ctx.fonts(),
                &card.flavor,
                l.x + l.w - FLAVOR_INSET_X,
                bottom - FLAVOR_INSET_Y,
                &style,
                ts,
            );
        }

        if let Some(footer) = ctx.assets.bottom() {
            let b = card.layout.bottom;
            let w = footer.aspect() * b.height;
            let x = l.x + (l.w - w) / 2.0;
            ctx.canvas
                .draw_image(&footer.pixmap, x, bottom - b.height + b.y_offset, w, b.height, ts);
        }
    }
}

// ============================================================================
// Skill badges
// ============================================================================

/// Horizontal squash applied to badge labels.
const LABEL_STRETCH: f32 = 1.15;

/// Fill of a badge with no image.
const BLANK_BADGE: palette::Srgba<u8> = rgba(0xee, 0xee, 0xee, 0xff);

/// One name badge per visible skill, aligned with its description block.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillTagsLayer;

impl SkillTagsLayer {
    fn badge(ctx: &mut RenderContext<'_>, x: f32, y: f32, w: f32, h: f32, ts: Transform) {
        let card = ctx.card();
        let assets = ctx.assets;

        if card.custom_border.is_some() {
            if let Some(template) = assets.get(AssetKey::Badge(Faction::TEMPLATE)) {
                if ctx.draw_recolored(TemplateKind::Badge, template, x, y, w, h, ts) {
                    return;
                }
            }
        }

        match assets.badge(card.faction) {
            Some(badge) => ctx.canvas.draw_image(&badge.pixmap, x, y, w, h, ts),
            None if card.custom_border.is_none() => ctx.canvas.fill_rect(x, y, w, h, BLANK_BADGE, ts),
            None => {}
        }
    }

    fn label(ctx: &mut RenderContext<'_>, name: &str, x: f32, y: f32, w: f32, h: f32, ts: Transform) {
        let style = TextStyle::new(FontStyle::bold(FontFamily::ShouSha, 18.0), rgba(0, 0, 0, 0xff))
            .align(Align::Center)
            .baseline(Baseline::Middle)
            .letter_spacing(1.5);
        let anchor_x = (x + w * 0.44) / 1.10;
        let stretched = ts.pre_scale(LABEL_STRETCH, 1.0);
        draw_text(ctx.canvas, ctx.fonts(), name, anchor_x, y + h / 2.0, &style, stretched);
    }
}

impl CardLayer for SkillTagsLayer {
    fn component(&self) -> Option<ComponentId> {
        Some(ComponentId::SkillTags)
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let l = ctx.card().layout.skill_tags;
        let geometry = ctx.geometry;
        let column_top = geometry.skill_column_top();
        let layout = geometry.skill_layout();

        for (offset, block) in layout.block_offsets() {
            let y = column_top + offset;
            Self::badge(ctx, l.x, y, l.w, l.h, ts);
            Self::label(ctx, &block.name, l.x, y, l.w, l.h, ts);
        }
    }
}

// ============================================================================
// Skill descriptions
// ============================================================================

/// Wrapped descriptions, first line centered on the badge.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillTextLayer;

impl CardLayer for SkillTextLayer {
    fn component(&self) -> Option<ComponentId> {
        Some(ComponentId::SkillText)
    }

    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let card = ctx.card();
        let fonts = ctx.fonts();
        let x = card.layout.skill_text.x;
        let badge_h = card.layout.skill_tags.h;
        let geometry = ctx.geometry;
        let column_top = geometry.skill_column_top();
        let layout = geometry.skill_layout();
        let tier = layout.tier;

        for (offset, block) in layout.block_offsets() {
            let first_line_y = column_top + offset + badge_h / 2.0;
            for (i, line) in block.lines.iter().enumerate() {
                let y = first_line_y + i as f32 * tier.line_height;
                let mut cursor = x;
                for run in &line.runs {
                    let color = if run.color == SKILL_TEXT {
                        ctx.theme.skill_text
                    } else {
                        run.color
                    };
                    let style = TextStyle::new(tier.style(run.bold), color).baseline(Baseline::Middle);
                    cursor += draw_text(ctx.canvas, fonts, &run.text, cursor, y, &style, ts);
                }
            }
        }
    }
}
