//! Font-size tier selection for the skill column.
//!
//! Every visible skill is wrapped at each tier in turn, largest first,
//! until the stacked blocks fit within [`MAX_STACK_HEIGHT`]. If none fits,
//! the smallest tier is used and the box overflows.

use super::rich::tokenize;
use super::wrap::{WrappedLine, wrap_runs};
use crate::card::SkillDescriptor;
use crate::font::{FontFamily, FontStyle, TextMeasure, Weight};
use crate::layout::LayoutSpec;

/// A (font size, line height, inter-skill spacing) preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub font_size: f32,
    pub line_height: f32,
    pub spacing: f32,
}

impl Tier {
    pub const fn new(font_size: f32, line_height: f32, spacing: f32) -> Self {
        Self {
            font_size,
            line_height,
            spacing,
        }
    }

    /// Description face at this tier.
    pub fn style(&self, bold: bool) -> FontStyle {
        let weight = if bold { Weight::Bold } else { Weight::Regular };
        FontStyle::new(FontFamily::BODY, weight, self.font_size)
    }
}

/// Tiers from largest to smallest.
pub const TIERS: [Tier; 4] = [
    Tier::new(12.0, 16.0, 8.0),
    Tier::new(11.0, 14.0, 6.0),
    Tier::new(10.0, 12.0, 4.0),
    Tier::new(9.0, 11.0, 2.0),
];

/// Height budget for the stacked skill blocks.
pub const MAX_STACK_HEIGHT: f32 = 500.0;

/// Box height reserved beyond the stacked blocks: top padding plus room for
/// the flavor line and the footer art.
pub const BOX_PADDING: f32 = 50.0;

/// Gap between the top of the skill box and the first block.
pub const TOP_PADDING: f32 = 15.0;

/// Right limit for description lines; wrap width is this minus the column x.
pub const TEXT_RIGHT_LIMIT: f32 = 390.0;

/// One visible skill's wrapped description.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillBlock {
    /// Index into the card's full skill list.
    pub skill_index: usize,
    pub name: String,
    pub lines: Vec<WrappedLine>,
    /// `max(lines × line height, badge height)`.
    pub height: f32,
}

/// Outcome of tier selection for a card's skills.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLayout {
    pub tier: Tier,
    /// Position of `tier` in [`TIERS`].
    pub tier_index: usize,
    /// Wrap width of description lines.
    pub box_width: f32,
    pub blocks: Vec<SkillBlock>,
    /// Sum of block heights plus spacing between blocks.
    pub total_height: f32,
    /// `total_height + BOX_PADDING`.
    pub required_box_height: f32,
}

impl SkillLayout {
    /// Chooses the largest tier whose stacked height fits the budget.
    pub fn compute(skills: &[SkillDescriptor], spec: &LayoutSpec, measure: &dyn TextMeasure) -> Self {
        let mut layout = Self::at_tier(0, skills, spec, measure);
        for index in 1..TIERS.len() {
            if layout.fits() {
                return layout;
            }
            layout = Self::at_tier(index, skills, spec, measure);
        }

        if !layout.fits() {
            log::debug!(
                "skill text overflows at the smallest tier ({} > {MAX_STACK_HEIGHT})",
                layout.total_height
            );
        }
        layout
    }

    /// Lays out the skills at one tier.
    ///
    /// # Panics
    ///
    /// Panics if `tier_index` is not an index into [`TIERS`].
    pub fn at_tier(
        tier_index: usize,
        skills: &[SkillDescriptor],
        layout: &LayoutSpec,
        measure: &dyn TextMeasure,
    ) -> Self {
        let tier = TIERS[tier_index];
        let box_width = TEXT_RIGHT_LIMIT - layout.skill_text.x;
        let badge_height = layout.skill_tags.h;

        let blocks: Vec<SkillBlock> = skills
            .iter()
            .enumerate()
            .filter(|(_, skill)| !skill.hidden)
            .map(|(skill_index, skill)| {
                let runs = tokenize(&skill.marked_up_description());
                let lines = wrap_runs(&runs, box_width, |ch, bold| measure.advance(ch, tier.style(bold)));
                let text_height = lines.len() as f32 * tier.line_height;
                SkillBlock {
                    skill_index,
                    name: skill.name.clone(),
                    lines,
                    height: text_height.max(badge_height),
                }
            })
            .collect();

        let gaps = blocks.len().saturating_sub(1) as f32 * tier.spacing;
        let total_height = blocks.iter().map(|b| b.height).sum::<f32>() + gaps;

        Self {
            tier,
            tier_index,
            box_width,
            blocks,
            total_height,
            required_box_height: total_height + BOX_PADDING,
        }
    }

    /// Whether the stacked blocks fit within [`MAX_STACK_HEIGHT`].
    pub fn fits(&self) -> bool {
        self.total_height <= MAX_STACK_HEIGHT
    }

    /// Top offsets of each block relative to the first, in order.
    pub fn block_offsets(&self) -> impl Iterator<Item = (f32, &SkillBlock)> {
        self.blocks.iter().scan(0.0, move |offset, block| {
            let top = *offset;
            *offset += block.height + self.tier.spacing;
            Some((top, block))
        })
    }
}
