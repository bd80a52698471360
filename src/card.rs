//! Card data model: factions, skills, and the per-render resolved card.
//!
//! [`CardData`] is the loose, serializable record a caller hands in.
//! [`CardData::resolve`] normalizes it into a [`ResolvedCard`] with every
//! lookup key validated and every default applied, so the layout engine and
//! the drawing layers never deal with raw strings.

use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::font::FontFamily;
use crate::geometry::ComponentId;
use crate::layout::LayoutSpec;
use crate::theme::{parse_color, parse_hex_or_black};

// ============================================================================
// Faction
// ============================================================================

/// One of the six canonical affiliations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Faction {
    /// 神
    #[default]
    Shen,
    /// 魏
    Wei,
    /// 蜀
    Shu,
    /// 吴
    Wu,
    /// 群
    Qun,
    /// 晋
    Jin,
}

impl Faction {
    pub const ALL: [Faction; 6] = [
        Faction::Shen,
        Faction::Wei,
        Faction::Shu,
        Faction::Wu,
        Faction::Qun,
        Faction::Jin,
    ];

    /// Faction whose border and badge serve as recolor templates.
    pub const TEMPLATE: Faction = Faction::Qun;

    /// The canonical single-character code.
    pub fn code(self) -> &'static str {
        match self {
            Faction::Shen => "神",
            Faction::Wei => "魏",
            Faction::Shu => "蜀",
            Faction::Wu => "吴",
            Faction::Qun => "群",
            Faction::Jin => "晋",
        }
    }

    /// The asset file stem used for borders, badges and hp icons.
    pub fn slug(self) -> &'static str {
        match self {
            Faction::Shen => "shen",
            Faction::Wei => "wei",
            Faction::Shu => "shu",
            Faction::Wu => "wu",
            Faction::Qun => "qun",
            Faction::Jin => "jin",
        }
    }

    /// Looks up a canonical code after folding traditional variants.
    pub fn from_code(code: &str) -> Option<Self> {
        let folded = normalize_code(code);
        Self::ALL.into_iter().find(|f| f.code() == folded)
    }
}

/// Folds alternate Unicode spellings onto canonical codes.
fn normalize_code(code: &str) -> &str {
    match code {
        "吳" => "吴",
        "晉" => "晋",
        other => other,
    }
}

/// Faction value that defers to the card's free-text faction.
pub const CUSTOM_FACTION: &str = "自定义";

// ============================================================================
// Skills
// ============================================================================

/// Skill type tag. [`SkillType::Normal`] adds no lead-in to the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum SkillType {
    #[default]
    #[serde(rename = "普通技")]
    Normal,
    #[serde(rename = "锁定技")]
    Locked,
    #[serde(rename = "觉醒技")]
    Awakening,
    #[serde(rename = "限定技")]
    Limited,
    #[serde(rename = "主公技")]
    Lord,
}

impl SkillType {
    pub fn label(self) -> &'static str {
        match self {
            SkillType::Normal => "普通技",
            SkillType::Locked => "锁定技",
            SkillType::Awakening => "觉醒技",
            SkillType::Limited => "限定技",
            SkillType::Lord => "主公技",
        }
    }
}

/// A single skill entry on the card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct SkillDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub skill_type: SkillType,

    /// Description with inline `[b]..[/b]` / `[red]..[/red]` markup.
    pub desc: String,

    /// Hidden skills are excluded from layout and drawing.
    pub hidden: bool,
}

impl SkillDescriptor {
    pub fn new(name: impl Into<String>, skill_type: SkillType, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skill_type,
            desc: desc.into(),
            hidden: false,
        }
    }

    /// The description with the bold type lead-in prepended when the type
    /// is not [`SkillType::Normal`].
    pub fn marked_up_description(&self) -> String {
        match self.skill_type {
            SkillType::Normal => self.desc.clone(),
            other => format!("[b]{}[/b]，{}", other.label(), self.desc),
        }
    }
}

// ============================================================================
// CardData
// ============================================================================

/// Caller-facing card record.
///
/// Field names serialize in camelCase, matching the project file format.
/// Missing fields take the generator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CardData {
    /// Faction code, a traditional variant, [`CUSTOM_FACTION`], or free text.
    pub faction: String,
    /// Text used when `faction` is [`CUSTOM_FACTION`].
    pub custom_faction: String,
    pub hp: u32,
    /// Zero means "same as `hp`".
    pub max_hp: u32,
    pub armor: u32,
    pub title: String,
    pub name: String,
    pub skills: Vec<SkillDescriptor>,
    pub flavor: String,
    pub title_font: String,
    pub name_font: String,
    pub title_color: String,
    pub name_color: String,
    pub hide_faction: bool,
    pub enable_custom_border: bool,
    pub border_color: String,
    /// Partial layout override, deep-merged over [`LayoutSpec::default`].
    pub layouts: serde_json::Value,
    /// Component shown with resize/rotate handles in edit mode.
    pub selected: Option<String>,
    /// Component shown with a dashed hover box in edit mode.
    pub highlight: Option<String>,
}

impl Default for CardData {
    fn default() -> Self {
        Self {
            faction: Faction::Shen.code().to_string(),
            custom_faction: String::new(),
            hp: 4,
            max_hp: 4,
            armor: 0,
            title: String::new(),
            name: String::new(),
            skills: Vec::new(),
            flavor: String::new(),
            title_font: FontFamily::XiaoZhuan.name().to_string(),
            name_font: FontFamily::XingKai.name().to_string(),
            title_color: "#fff100".to_string(),
            name_color: "white".to_string(),
            hide_faction: false,
            enable_custom_border: false,
            border_color: "#8c8c8c".to_string(),
            layouts: serde_json::Value::Object(serde_json::Map::new()),
            selected: None,
            highlight: None,
        }
    }
}

impl CardData {
    /// Normalizes this record into a [`ResolvedCard`].
    ///
    /// Only a layout override that cannot produce a valid layout fails;
    /// every other irregularity falls back to a default.
    pub fn resolve(&self) -> Result<ResolvedCard> {
        let raw_faction = if self.faction == CUSTOM_FACTION {
            if self.custom_faction.is_empty() {
                Faction::Shen.code()
            } else {
                self.custom_faction.as_str()
            }
        } else {
            self.faction.as_str()
        };

        let faction_label = match normalize_code(raw_faction) {
            "" => Faction::Shen.code().to_string(),
            code => code.to_string(),
        };
        let faction = Faction::from_code(&faction_label).unwrap_or_else(|| {
            log::debug!("unrecognized faction {faction_label:?}, using default theme and assets");
            Faction::default()
        });

        let custom_border = (self.enable_custom_border && !self.border_color.is_empty())
            .then(|| parse_hex_or_black(&self.border_color));

        Ok(ResolvedCard {
            faction,
            faction_label,
            hp: self.hp,
            max_hp: if self.max_hp == 0 { self.hp } else { self.max_hp },
            armor: self.armor,
            title: self.title.clone(),
            name: self.name.clone(),
            skills: self.skills.clone(),
            flavor: self.flavor.clone(),
            title_font: FontFamily::from_name_or(&self.title_font, FontFamily::XiaoZhuan),
            name_font: FontFamily::from_name_or(&self.name_font, FontFamily::XingKai),
            title_color: color_or(&self.title_color, Srgba::new(0xff, 0xf1, 0x00, 0xff)),
            name_color: color_or(&self.name_color, Srgba::new(0xff, 0xff, 0xff, 0xff)),
            hide_faction: self.hide_faction,
            custom_border,
            layout: LayoutSpec::with_overrides(&self.layouts)?,
            selected: self.selected.as_deref().and_then(ComponentId::from_name),
            highlight: self.highlight.as_deref().and_then(ComponentId::from_name),
        })
    }
}

fn color_or(value: &str, fallback: Srgba<u8>) -> Srgba<u8> {
    parse_color(value).unwrap_or_else(|| {
        log::debug!("unparseable color {value:?}, using fallback");
        fallback
    })
}

// ============================================================================
// ResolvedCard
// ============================================================================

/// A fully normalized card, ready for layout and drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCard {
    /// Faction used for every theme and asset lookup.
    pub faction: Faction,
    /// Text drawn as the faction glyph (may be custom text).
    pub faction_label: String,
    pub hp: u32,
    pub max_hp: u32,
    pub armor: u32,
    pub title: String,
    pub name: String,
    pub skills: Vec<SkillDescriptor>,
    pub flavor: String,
    pub title_font: FontFamily,
    pub name_font: FontFamily,
    pub title_color: Srgba<u8>,
    pub name_color: Srgba<u8>,
    pub hide_faction: bool,
    /// Target color for template recoloring, when custom borders are on.
    pub custom_border: Option<Srgb<u8>>,
    pub layout: LayoutSpec,
    pub selected: Option<ComponentId>,
    pub highlight: Option<ComponentId>,
}

impl ResolvedCard {
    /// Total number of hp and armor icons.
    pub fn icon_total(&self) -> u32 {
        self.max_hp.saturating_add(self.armor)
    }

    /// True when edit-mode indicators should be drawn.
    pub fn in_edit_mode(&self) -> bool {
        self.selected.is_some() || self.highlight.is_some()
    }

    /// Skills that take part in layout.
    pub fn visible_skills(&self) -> impl Iterator<Item = (usize, &SkillDescriptor)> {
        self.skills.iter().enumerate().filter(|(_, s)| !s.hidden)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn faction_normalizes_traditional_variants() {
        assert_eq!(Faction::from_code("吳"), Some(Faction::Wu));
        assert_eq!(Faction::from_code("晉"), Some(Faction::Jin));
        assert_eq!(Faction::from_code("魏"), Some(Faction::Wei));
        assert_eq!(Faction::from_code("仙"), None);
    }

    #[test]
    fn unknown_faction_keeps_label_but_uses_default_lookup() {
        let card = CardData {
            faction: "仙".into(),
            ..CardData::default()
        };
        let resolved = card.resolve().unwrap();
        assert_eq!(resolved.faction, Faction::Shen);
        assert_eq!(resolved.faction_label, "仙");
    }

    #[test]
    fn empty_faction_falls_back_to_default() {
        let card = CardData {
            faction: String::new(),
            ..CardData::default()
        };
        let resolved = card.resolve().unwrap();
        assert_eq!(resolved.faction, Faction::Shen);
        assert_eq!(resolved.faction_label, "神");
    }

    #[test]
    fn custom_faction_uses_free_text() {
        let card = CardData {
            faction: CUSTOM_FACTION.into(),
            custom_faction: "晉".into(),
            ..CardData::default()
        };
        let resolved = card.resolve().unwrap();
        assert_eq!(resolved.faction, Faction::Jin);
        assert_eq!(resolved.faction_label, "晋");

        let blank = CardData {
            faction: CUSTOM_FACTION.into(),
            ..CardData::default()
        };
        assert_eq!(blank.resolve().unwrap().faction_label, "神");
    }

    #[test]
    fn zero_max_hp_means_current_hp() {
        let card = CardData {
            hp: 3,
            max_hp: 0,
            ..CardData::default()
        };
        assert_eq!(card.resolve().unwrap().max_hp, 3);
    }

    #[test]
    fn icon_total_saturates() {
        let card = CardData {
            hp: 1,
            max_hp: u32::MAX,
            armor: 1,
            ..CardData::default()
        };
        assert_eq!(card.resolve().unwrap().icon_total(), u32::MAX);
    }

    #[test]
    fn typed_skill_gets_bold_lead_in() {
        let locked = SkillDescriptor::new("冻结", SkillType::Locked, "你的手牌上限始终为 9。");
        assert_eq!(locked.marked_up_description(), "[b]锁定技[/b]，你的手牌上限始终为 9。");

        let plain = SkillDescriptor::new("天才", SkillType::Normal, "描述文字");
        assert_eq!(plain.marked_up_description(), "描述文字");
    }

    #[test]
    fn card_data_deserializes_with_defaults() {
        let json = r#"{
            "faction": "蜀",
            "name": "琪露诺",
            "skills": [{ "name": "冻结", "type": "锁定技", "desc": "x" }]
        }"#;
        let card: CardData = serde_json::from_str(json).unwrap();
        assert_eq!(card.hp, 4);
        assert_eq!(card.max_hp, 4);
        assert_eq!(card.title_font, "XiaoZhuan");
        assert_eq!(card.skills[0].skill_type, SkillType::Locked);
        assert!(!card.skills[0].hidden);
    }

    #[test]
    fn custom_border_parses_target_color() {
        let card = CardData {
            enable_custom_border: true,
            border_color: "#81b2d1".into(),
            ..CardData::default()
        };
        assert_eq!(
            card.resolve().unwrap().custom_border,
            Some(Srgb::new(0x81, 0xb2, 0xd1))
        );

        let malformed = CardData {
            enable_custom_border: true,
            border_color: "blue-ish".into(),
            ..CardData::default()
        };
        assert_eq!(
            malformed.resolve().unwrap().custom_border,
            Some(Srgb::new(0, 0, 0))
        );
    }

    #[test]
    fn unknown_component_ids_are_dropped() {
        let card = CardData {
            selected: Some("skillBox".into()),
            highlight: Some("title".into()),
            ..CardData::default()
        };
        let resolved = card.resolve().unwrap();
        assert_eq!(resolved.selected, Some(ComponentId::SkillBox));
        assert_eq!(resolved.highlight, None);
    }
}
