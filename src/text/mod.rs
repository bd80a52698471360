//! Text pipeline: markup tokenizing, wrapping, tier selection and glyph
//! drawing.

pub mod paint;
pub mod rich;
pub mod tiers;
pub mod wrap;

pub use paint::{Align, Baseline, TextStyle, draw_text, text_width};
pub use rich::{RichTextRun, strip_markup, tokenize};
pub use tiers::{
    BOX_PADDING, MAX_STACK_HEIGHT, SkillBlock, SkillLayout, TEXT_RIGHT_LIMIT, TIERS, TOP_PADDING,
    Tier,
};
pub use wrap::{WrappedLine, wrap_runs};
