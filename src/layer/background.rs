//! Portrait art, scaled to cover the card.

use resvg::tiny_skia::Transform;

use super::{CardLayer, RenderContext};
use crate::geometry::{CARD_HEIGHT, CARD_WIDTH};
use crate::theme::rgba;

/// Fill used when no portrait is loaded.
const EMPTY_ART: palette::Srgba<u8> = rgba(0x22, 0x11, 0x11, 0xff);

/// Draws the portrait, or a flat fill without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BackgroundLayer;

/// Rect `(x, y, w, h)` that covers a `card_w × card_h` area with an image
/// of the given aspect ratio, centered so the overflow is cropped evenly.
pub fn cover_rect(aspect: f32, card_w: f32, card_h: f32) -> (f32, f32, f32, f32) {
    if aspect > card_w / card_h {
        let w = card_h * aspect;
        ((card_w - w) / 2.0, 0.0, w, card_h)
    } else {
        let h = card_w / aspect;
        (0.0, (card_h - h) / 2.0, card_w, h)
    }
}

impl CardLayer for BackgroundLayer {
    fn draw(&self, ctx: &mut RenderContext<'_>, ts: Transform) {
        let (card_w, card_h) = (CARD_WIDTH as f32, CARD_HEIGHT as f32);

        match ctx.portrait {
            Some(art) => {
                let (x, y, w, h) = cover_rect(art.aspect(), card_w, card_h);
                ctx.canvas.draw_image(&art.pixmap, x, y, w, h, ts);
            }
            None => ctx.canvas.fill_rect(0.0, 0.0, card_w, card_h, EMPTY_ART, ts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_art_is_cropped_horizontally() {
        let (x, y, w, h) = cover_rect(2.0, 400.0, 570.0);
        assert_eq!((y, h), (0.0, 570.0));
        assert_eq!(w, 1140.0);
        assert_eq!(x, -370.0);
    }

    #[test]
    fn tall_art_is_cropped_vertically() {
        let (x, y, w, h) = cover_rect(0.5, 400.0, 570.0);
        assert_eq!((x, w), (0.0, 400.0));
        assert_eq!(h, 800.0);
        assert_eq!(y, -115.0);
    }
}
