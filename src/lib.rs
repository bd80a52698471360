//! sgs-card-renderer: composition and layout engine for Sanguosha-style
//! character cards
//!
//! This crate turns a [`CardData`] record into a supersampled raster: a
//! portrait, a faction frame, a vertical title/name column, an hp row and a
//! skill box whose text shrinks through font-size tiers until it fits.
//! Every movable component can be repositioned and rotated, and the same
//! geometry drives both drawing and pointer hit-testing.
//!
//! # Example
//!
//! ```
//! use sgs_card_renderer::{AssetStore, CardData, CardRenderer, RenderRequest, SkillDescriptor, SkillType};
//!
//! let mut renderer = CardRenderer::new(AssetStore::new());
//!
//! let card = CardData {
//!     faction: "蜀".into(),
//!     name: "琪露诺".into(),
//!     skills: vec![SkillDescriptor::new(
//!         "冻结",
//!         SkillType::Locked,
//!         "你的手牌上限始终为 [red]9[/red]。",
//!     )],
//!     ..CardData::default()
//! };
//!
//! let rendered = renderer.render_full(&RenderRequest::new(card)).unwrap();
//! assert_eq!(rendered.logical_size(), (400, 570));
//! assert!(rendered.png.is_some());
//! ```
//!
//! # Interactive editing
//!
//! During a pointer drag, resolve the card once, hit-test with its
//! geometry, apply motion with a [`DragSession`], and redraw with the fast
//! path:
//!
//! ```
//! use sgs_card_renderer::{
//!     AssetStore, CardData, CardRenderer, DragSession, Point, hit_test,
//! };
//!
//! let mut renderer = CardRenderer::new(AssetStore::new());
//! let mut card = CardData::default().resolve().unwrap();
//!
//! let press = Point::new(45.0, 60.0);
//! let hit = hit_test(&renderer.geometry(&card), press, card.selected).unwrap();
//! card.selected = Some(hit.component);
//!
//! let mut drag = DragSession::begin(hit, press);
//! drag.drag_card(&mut card, Point::new(55.0, 70.0), &renderer.assets().fonts);
//! let frame = renderer.render_fast(&card, None).unwrap();
//! assert!(frame.png.is_none());
//! ```

pub mod assets;
pub mod canvas;
pub mod card;
mod error;
pub mod font;
pub mod geometry;
pub mod interact;
pub mod layer;
pub mod layout;
mod output;
pub mod project;
pub mod raster;
pub mod recolor;
mod renderer;
pub mod schedule;
pub mod text;
pub mod theme;

pub use assets::{AssetKey, AssetStore, HeartKind};
pub use card::{CUSTOM_FACTION, CardData, Faction, ResolvedCard, SkillDescriptor, SkillType};
pub use error::{Error, Result};
pub use font::{FontBook, FontFamily, FontStyle, TextMeasure, Weight};
pub use geometry::{CardGeometry, ComponentId, ComponentRect, HpRowMode, Point};
pub use interact::{DragSession, Handle, Hit, hit_test};
pub use layer::{CardLayer, DetailLevel, LayerPipeline, RenderContext};
pub use layout::LayoutSpec;
pub use output::{RenderedCard, encode_png};
pub use project::{ProjectSnapshot, ViewState};
pub use recolor::{RecolorCache, recolor_template};
pub use renderer::{CardRenderer, PortraitSource, RenderRequest, SUPERSAMPLE};
pub use schedule::{RenderGeneration, RenderScheduler, RenderTicket};
pub use text::{RichTextRun, SkillLayout, tokenize, wrap_runs};
pub use theme::{ThemeColors, resolve_theme};
