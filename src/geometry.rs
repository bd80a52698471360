//! Component rectangles shared by drawing and hit-testing.
//!
//! Every movable component resolves to a [`ComponentRect`]: an axis-aligned
//! box in card space plus a rotation about its center. The composition
//! pipeline wraps each layer in [`ComponentRect::transform`], and the
//! interactive hit-test maps pointer positions back through
//! [`ComponentRect::to_local`], so the two always agree.

use resvg::tiny_skia::Transform;
use serde::{Deserialize, Serialize};

use crate::card::ResolvedCard;
use crate::font::TextMeasure;
use crate::text::{SkillLayout, TOP_PADDING};

/// Logical card width.
pub const CARD_WIDTH: u32 = 400;

/// Logical card height.
pub const CARD_HEIGHT: u32 = 570;

/// Icon count above which the hp row switches to compact mode.
pub const COMPACT_THRESHOLD: u32 = 13;

/// Widest the grid-mode hp row may grow.
pub const HP_ROW_MAX_WIDTH: f32 = 300.0;

/// Fixed width of the hero title/name column.
const HERO_INFO_WIDTH: f32 = 80.0;

/// Gap between the title and the name in the hero column.
pub const HERO_NAME_GAP: f32 = 30.0;

/// Right edge used to size the skill text column.
const SKILL_TEXT_RIGHT: f32 = 395.0;

// ============================================================================
// ComponentId
// ============================================================================

/// A movable, rotatable card component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ComponentId {
    HeroInfo,
    Faction,
    Hp,
    SkillBox,
    SkillTags,
    SkillText,
}

impl ComponentId {
    /// Components in visual draw order, bottom to top.
    pub const DRAW_ORDER: [ComponentId; 6] = [
        ComponentId::HeroInfo,
        ComponentId::Faction,
        ComponentId::Hp,
        ComponentId::SkillBox,
        ComponentId::SkillTags,
        ComponentId::SkillText,
    ];

    /// The layout key of this component.
    pub fn name(self) -> &'static str {
        match self {
            ComponentId::HeroInfo => "heroInfo",
            ComponentId::Faction => "faction",
            ComponentId::Hp => "hp",
            ComponentId::SkillBox => "skillBox",
            ComponentId::SkillTags => "skillTags",
            ComponentId::SkillText => "skillText",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::DRAW_ORDER.into_iter().find(|id| id.name() == name)
    }

    /// Whether the component has a resize handle.
    pub fn supports_resize(self) -> bool {
        matches!(self, ComponentId::Faction | ComponentId::Hp)
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Point / ComponentRect
// ============================================================================

/// A position in logical card coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding box and rotation of one component, derived per render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in degrees about the center.
    pub rotation: f32,
}

impl ComponentRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32, rotation: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation,
        }
    }

    pub fn cx(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn cy(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx(), self.cy())
    }

    /// Maps a card-space point into the rect's frame: relative to the
    /// center, with the rect's rotation undone.
    pub fn to_local(&self, p: Point) -> Point {
        let (dx, dy) = (p.x - self.cx(), p.y - self.cy());
        let (sin, cos) = (-self.rotation.to_radians()).sin_cos();
        Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
    }

    /// Inverse of [`to_local`](Self::to_local).
    pub fn to_canvas(&self, local: Point) -> Point {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        Point::new(
            self.cx() + local.x * cos - local.y * sin,
            self.cy() + local.x * sin + local.y * cos,
        )
    }

    /// Rotation about the center, in card space.
    pub fn transform(&self) -> Transform {
        if self.rotation == 0.0 {
            Transform::identity()
        } else {
            Transform::from_rotate_at(self.rotation, self.cx(), self.cy())
        }
    }
}

// ============================================================================
// HP row sizing
// ============================================================================

/// How the hp/armor row is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HpRowMode {
    /// One icon per unit, `step` apart.
    Grid { step: f32 },
    /// Icon plus `× n` label per group.
    Compact,
}

/// Chooses the hp row mode for `total` icons of edge `size`.
///
/// Grid spacing is `size * spacing`, shrunk (never grown) so the row stays
/// within [`HP_ROW_MAX_WIDTH`].
pub fn hp_row_mode(total: u32, size: f32, spacing: f32) -> HpRowMode {
    if total > COMPACT_THRESHOLD {
        return HpRowMode::Compact;
    }
    let base_width = total as f32 * size * spacing;
    let factor = if base_width > HP_ROW_MAX_WIDTH {
        HP_ROW_MAX_WIDTH / (total as f32 * size)
    } else {
        spacing
    };
    HpRowMode::Grid {
        step: size * factor,
    }
}

// ============================================================================
// CardGeometry
// ============================================================================

/// Resolved geometry of a card: the skill layout plus every component rect.
#[derive(Debug, Clone)]
pub struct CardGeometry<'a> {
    card: &'a ResolvedCard,
    skills: SkillLayout,
}

impl<'a> CardGeometry<'a> {
    /// Runs the skill layout for `card` and wraps it with the card.
    pub fn new(card: &'a ResolvedCard, measure: &dyn TextMeasure) -> Self {
        let skills = SkillLayout::compute(&card.skills, &card.layout, measure);
        Self { card, skills }
    }

    pub fn card(&self) -> &'a ResolvedCard {
        self.card
    }

    pub fn skill_layout(&self) -> &SkillLayout {
        &self.skills
    }

    /// Drawn skill box height; never below the configured height.
    pub fn skill_box_height(&self) -> f32 {
        self.card.layout.skill_box.h.max(self.skills.required_box_height)
    }

    /// Top of the skill box. The bottom edge stays fixed as it grows.
    pub fn skill_box_top(&self) -> f32 {
        let l = &self.card.layout.skill_box;
        l.y + l.h - self.skill_box_height()
    }

    /// Top of the first badge and first description line.
    pub fn skill_column_top(&self) -> f32 {
        self.skill_box_top() + TOP_PADDING
    }

    pub fn hp_row(&self) -> HpRowMode {
        let l = &self.card.layout.hp;
        hp_row_mode(self.card.icon_total(), l.size, l.spacing)
    }

    /// Rect of a component, as drawn.
    pub fn rect_of(&self, id: ComponentId) -> ComponentRect {
        let layout = &self.card.layout;
        let rotation = layout.rotation(id);

        match id {
            ComponentId::HeroInfo => {
                let l = &layout.hero_info;
                let title_len = self.card.title.chars().count() as f32;
                let name_len = self.card.name.chars().count() as f32;
                let h = title_len * l.title_spacing + HERO_NAME_GAP + name_len * l.name_spacing;
                ComponentRect::new(l.x - HERO_INFO_WIDTH / 2.0, l.y, HERO_INFO_WIDTH, h, rotation)
            }
            ComponentId::Faction => {
                let l = &layout.faction;
                ComponentRect::new(l.x - l.size / 2.0, l.y - l.size / 2.0, l.size, l.size, rotation)
            }
            ComponentId::Hp => {
                let l = &layout.hp;
                let w = match self.hp_row() {
                    HpRowMode::Compact => HP_ROW_MAX_WIDTH,
                    HpRowMode::Grid { step } => self.card.icon_total() as f32 * step + 20.0,
                };
                ComponentRect::new(l.x - 5.0, l.y - 5.0, w, l.size + 10.0, rotation)
            }
            ComponentId::SkillBox => {
                let l = &layout.skill_box;
                ComponentRect::new(l.x, self.skill_box_top(), l.w, self.skill_box_height(), rotation)
            }
            ComponentId::SkillTags => {
                let l = &layout.skill_tags;
                ComponentRect::new(
                    l.x,
                    self.skill_column_top(),
                    l.w,
                    self.skills.total_height,
                    rotation,
                )
            }
            ComponentId::SkillText => {
                let l = &layout.skill_text;
                ComponentRect::new(
                    l.x,
                    self.skill_column_top(),
                    SKILL_TEXT_RIGHT - l.x,
                    self.skills.total_height,
                    rotation,
                )
            }
        }
    }

    /// Rect for a layout key; `None` for unknown keys.
    pub fn rect_of_named(&self, name: &str) -> Option<ComponentRect> {
        ComponentId::from_name(name).map(|id| self.rect_of(id))
    }
}

// ============================================================================
// Tests
// ============================================================================
