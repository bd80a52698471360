//! Per-component layout configuration and override merging.
//!
//! A [`LayoutSpec`] holds the position, size and rotation of every movable
//! card component. Callers supply partial overrides as JSON; these are
//! deep-merged over the built-in defaults by [`deep_merge`] and then
//! deserialized into the typed spec.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::geometry::ComponentId;

/// Layout of the vertical title + name column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct HeroInfoLayout {
    /// Horizontal center of the column.
    pub x: f32,
    /// Top of the first title character.
    pub y: f32,
    pub title_size: f32,
    pub name_size: f32,
    /// Vertical step per title character.
    pub title_spacing: f32,
    /// Vertical step per name character.
    pub name_spacing: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Layout of the faction glyph, centered on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct FactionLayout {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Layout of the hp/armor icon row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct HpLayout {
    pub x: f32,
    pub y: f32,
    /// Icon edge length.
    pub size: f32,
    /// Icon step as a fraction of `size`.
    pub spacing: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Layout of the skill box. `y + h` is the fixed bottom anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SkillBoxLayout {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Layout of the skill badge column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SkillTagsLayout {
    pub x: f32,
    pub y: f32,
    /// Badge width.
    pub w: f32,
    /// Badge height; also the minimum height of each skill block.
    pub h: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Layout of the skill description column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SkillTextLayout {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
}

/// Footer decoration, pinned to the bottom of the skill box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BottomLayout {
    pub height: f32,
    pub y_offset: f32,
}

/// Geometry configuration of every card component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct LayoutSpec {
    pub hero_info: HeroInfoLayout,
    pub faction: FactionLayout,
    pub hp: HpLayout,
    pub skill_box: SkillBoxLayout,
    pub skill_tags: SkillTagsLayout,
    pub skill_text: SkillTextLayout,
    pub bottom: BottomLayout,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            hero_info: HeroInfoLayout {
                x: 45.0,
                y: 120.0,
                title_size: 24.0,
                name_size: 42.0,
                title_spacing: 26.0,
                name_spacing: 46.0,
                rotation: 0.0,
            },
            faction: FactionLayout {
                x: 45.0,
                y: 60.0,
                size: 80.0,
                rotation: 0.0,
            },
            hp: HpLayout {
                x: 80.0,
                y: 25.0,
                size: 38.0,
                spacing: 0.65,
                rotation: 0.0,
            },
            skill_box: SkillBoxLayout {
                x: 62.0,
                y: 490.0,
                w: 340.0,
                h: 80.0,
                rotation: 0.0,
            },
            skill_tags: SkillTagsLayout {
                x: 15.0,
                y: 495.0,
                w: 70.0,
                h: 30.0,
                rotation: 0.0,
            },
            skill_text: SkillTextLayout {
                x: 90.0,
                y: 495.0,
                rotation: 0.0,
            },
            bottom: BottomLayout {
                height: 30.0,
                y_offset: 5.0,
            },
        }
    }
}

impl LayoutSpec {
    /// Builds a layout by deep-merging `overrides` over the defaults.
    ///
    /// `null` and non-object overrides leave the defaults untouched.
    pub fn with_overrides(overrides: &Value) -> Result<Self> {
        let defaults = serde_json::to_value(Self::default()).map_err(Error::Layout)?;
        let merged = deep_merge(&defaults, overrides);
        serde_json::from_value(merged).map_err(Error::Layout)
    }

    /// Rotation in degrees of a component.
    pub fn rotation(&self, id: ComponentId) -> f32 {
        match id {
            ComponentId::HeroInfo => self.hero_info.rotation,
            ComponentId::Faction => self.faction.rotation,
            ComponentId::Hp => self.hp.rotation,
            ComponentId::SkillBox => self.skill_box.rotation,
            ComponentId::SkillTags => self.skill_tags.rotation,
            ComponentId::SkillText => self.skill_text.rotation,
        }
    }

    pub fn rotation_mut(&mut self, id: ComponentId) -> &mut f32 {
        match id {
            ComponentId::HeroInfo => &mut self.hero_info.rotation,
            ComponentId::Faction => &mut self.faction.rotation,
            ComponentId::Hp => &mut self.hp.rotation,
            ComponentId::SkillBox => &mut self.skill_box.rotation,
            ComponentId::SkillTags => &mut self.skill_tags.rotation,
            ComponentId::SkillText => &mut self.skill_text.rotation,
        }
    }

    /// Mutable `(x, y)` anchor of a component.
    pub fn anchor_mut(&mut self, id: ComponentId) -> (&mut f32, &mut f32) {
        match id {
            ComponentId::HeroInfo => (&mut self.hero_info.x, &mut self.hero_info.y),
            ComponentId::Faction => (&mut self.faction.x, &mut self.faction.y),
            ComponentId::Hp => (&mut self.hp.x, &mut self.hp.y),
            ComponentId::SkillBox => (&mut self.skill_box.x, &mut self.skill_box.y),
            ComponentId::SkillTags => (&mut self.skill_tags.x, &mut self.skill_tags.y),
            ComponentId::SkillText => (&mut self.skill_text.x, &mut self.skill_text.y),
        }
    }

    /// Mutable `size` of components that have a single size field.
    pub fn size_mut(&mut self, id: ComponentId) -> Option<&mut f32> {
        match id {
            ComponentId::Faction => Some(&mut self.faction.size),
            ComponentId::Hp => Some(&mut self.hp.size),
            _ => None,
        }
    }
}

/// Structurally merges `overlay` onto `base`, returning a new value.
///
/// Where both sides hold an object, keys merge recursively. Any other
/// overlay value (number, string, bool, array, null) replaces the base value
/// outright. A non-object overlay at the top level leaves `base` unchanged.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Object(base_map), Value::Object(overlay_map)) = (base, overlay) else {
        return base.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        let next = match (merged.get(key), value) {
            (Some(existing @ Value::Object(_)), Value::Object(_)) => deep_merge(existing, value),
            _ => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Object(merged)
}
