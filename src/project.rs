//! Saved editor projects.
//!
//! A [`ProjectSnapshot`] is the whole editor state: the card record, its
//! layout overrides, the portrait reference and the viewport. Card fields
//! sit at the top level of the JSON object, next to the view fields:
//!
//! ```json
//! {
//!   "faction": "蜀",
//!   "name": "琪露诺",
//!   "hp": 3,
//!   "layouts": { "hp": { "rotation": 10 } },
//!   "artImage": "art/cirno.png",
//!   "zoom": 1.0,
//!   "panX": 0.0,
//!   "panY": 0.0
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::card::CardData;
use crate::error::{Error, Result};
use crate::renderer::{PortraitSource, RenderRequest};

/// Zoom limits of the editor viewport.
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 4.0;

// ============================================================================
// ViewState
// ============================================================================

/// Editor viewport: zoom factor and pan offset in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ViewState {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewState {
    /// Adjusts zoom by `delta`, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn pan_to(&mut self, x: f32, y: f32) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Back to unit zoom, no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// ProjectSnapshot
// ============================================================================

/// Everything needed to reproduce an editor session's render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct ProjectSnapshot {
    #[serde(flatten)]
    pub card: CardData,

    /// Portrait file path, relative to the project file or absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub art_image: Option<String>,

    #[serde(flatten)]
    pub view: ViewState,
}

impl ProjectSnapshot {
    pub fn new(card: CardData) -> Self {
        Self {
            card,
            ..Self::default()
        }
    }

    pub fn with_art_image(mut self, path: impl Into<String>) -> Self {
        self.art_image = Some(path.into());
        self
    }

    /// Serializes the snapshot to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::Project)
    }

    /// Serializes the snapshot to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Project)
    }

    /// Deserializes a snapshot. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::Project)
    }

    /// Reads a snapshot from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Suggested file name when saving.
    pub fn file_name(&self) -> String {
        let name = if self.card.name.is_empty() {
            "Hero"
        } else {
            self.card.name.as_str()
        };
        format!("SGS-Project-{name}.json")
    }

    /// Builds a full render request. Relative portrait paths are resolved
    /// against `base_dir`.
    ///
    /// Inline `data:` URLs are not supported and are skipped with a warning.
    pub fn render_request(&self, base_dir: Option<&Path>) -> RenderRequest {
        let portrait = self
            .art_image
            .as_deref()
            .filter(|art| !art.is_empty())
            .and_then(|art| {
                if art.starts_with("data:") {
                    log::warn!("inline portrait data is not supported, rendering without art");
                    return None;
                }
                let path = Path::new(art);
                let path = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.to_path_buf(),
                };
                Some(PortraitSource::Path(path))
            });

        RenderRequest {
            card: self.card.clone(),
            portrait,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{SkillDescriptor, SkillType};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn snapshot_round_trips_card_and_view() {
        let mut snapshot = ProjectSnapshot::new(CardData {
            faction: "蜀".into(),
            name: "琪露诺".into(),
            skills: vec![SkillDescriptor::new("冻结", SkillType::Locked, "[red]冰[/red]")],
            layouts: serde_json::json!({ "hp": { "rotation": 10.0 } }),
            selected: Some("hp".into()),
            ..CardData::default()
        })
        .with_art_image("art/cirno.png");
        snapshot.view.zoom_by(0.5);
        snapshot.view.pan_to(12.0, -4.0);

        let json = snapshot.to_json().unwrap();
        let restored = ProjectSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn json_is_flat_camel_case() {
        let snapshot = ProjectSnapshot::new(CardData {
            max_hp: 5,
            ..CardData::default()
        });
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["maxHp"], 5);
        assert_eq!(value["zoom"], 1.0);
        assert_eq!(value["panX"], 0.0);
        assert!(value.get("artImage").is_none());
        assert!(value.get("card").is_none());
    }

    #[test]
    fn empty_project_takes_defaults() {
        let snapshot = ProjectSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot.card, CardData::default());
        assert_eq!(snapshot.view, ViewState::default());
        assert_eq!(snapshot.file_name(), "SGS-Project-Hero.json");
    }

    #[test]
    fn malformed_project_is_an_error() {
        assert!(matches!(ProjectSnapshot::from_json("{\"hp\": \"x\"}"), Err(Error::Project(_))));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = ViewState::default();
        view.zoom_by(10.0);
        assert_eq!(view.zoom, MAX_ZOOM);
        view.zoom_by(-10.0);
        assert_eq!(view.zoom, MIN_ZOOM);
        view.reset();
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn relative_art_resolves_against_project_dir() {
        let snapshot = ProjectSnapshot::default().with_art_image("art/a.png");
        let request = snapshot.render_request(Some(Path::new("/projects")));
        assert_eq!(
            request.portrait,
            Some(PortraitSource::Path(PathBuf::from("/projects/art/a.png")))
        );

        let inline = ProjectSnapshot::default().with_art_image("data:image/png;base64,AAAA");
        assert_eq!(inline.render_request(None).portrait, None);
    }
}
