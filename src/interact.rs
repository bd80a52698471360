//! Pointer hit-testing and drag editing of component layouts.
//!
//! Hit-testing walks components top-most first and maps the pointer into
//! each component's rotated frame with [`ComponentRect::to_local`], the
//! inverse of the transform the layers are drawn with.

use crate::card::ResolvedCard;
use crate::font::TextMeasure;
use crate::geometry::{CardGeometry, ComponentId, ComponentRect, Point};
use crate::layer::overlay::ROTATE_HANDLE_OFFSET;
use crate::layout::LayoutSpec;

/// Pointer tolerance around the rotate and resize handles.
pub const HANDLE_TOLERANCE: f32 = 15.0;

/// Margin around a component's rect that still counts as a hit.
pub const MOVE_MARGIN: f32 = 10.0;

/// Smallest size a resize can reach.
pub const MIN_COMPONENT_SIZE: f32 = 10.0;

/// What a pointer press grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Move,
    Rotate,
    Resize,
}

/// A component under the pointer and the handle hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub component: ComponentId,
    pub handle: Handle,
}

/// Converts a pointer offset within the displayed canvas element into card
/// units.
///
/// `displayed_width` is the on-screen width of the element and
/// `device_width` the pixel width of the supersampled raster.
pub fn pointer_to_card(offset_x: f32, offset_y: f32, displayed_width: f32, device_width: f32, scale: f32) -> Point {
    let ratio = device_width / displayed_width;
    Point::new(offset_x * ratio / scale, offset_y * ratio / scale)
}

fn handle_at(rect: &ComponentRect, id: ComponentId, local: Point) -> Option<Handle> {
    let (hw, hh) = (rect.width / 2.0, rect.height / 2.0);

    let rotate_y = -hh - ROTATE_HANDLE_OFFSET;
    if local.x.hypot(local.y - rotate_y) < HANDLE_TOLERANCE {
        return Some(Handle::Rotate);
    }
    if id.supports_resize()
        && (local.x - hw).abs() < HANDLE_TOLERANCE
        && (local.y - hh).abs() < HANDLE_TOLERANCE
    {
        return Some(Handle::Resize);
    }
    None
}

/// Finds the top-most component under `p`.
///
/// Handles are only tested on `selected`, since only the selected
/// component shows them. A hidden faction glyph is never hit.
pub fn hit_test(geometry: &CardGeometry<'_>, p: Point, selected: Option<ComponentId>) -> Option<Hit> {
    let card = geometry.card();

    ComponentId::DRAW_ORDER.iter().rev().find_map(|&id| {
        if id == ComponentId::Faction && card.hide_faction {
            return None;
        }
        let rect = geometry.rect_of(id);
        let local = rect.to_local(p);

        if selected == Some(id) {
            if let Some(handle) = handle_at(&rect, id, local) {
                return Some(Hit { component: id, handle });
            }
        }

        let inside = local.x.abs() < rect.width / 2.0 + MOVE_MARGIN
            && local.y.abs() < rect.height / 2.0 + MOVE_MARGIN;
        inside.then_some(Hit {
            component: id,
            handle: Handle::Move,
        })
    })
}

// ============================================================================
// DragSession
// ============================================================================

/// An in-progress pointer drag on one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub component: ComponentId,
    pub handle: Handle,
    last: Point,
}

impl DragSession {
    /// Starts a drag from a hit at pointer position `at`.
    pub fn begin(hit: Hit, at: Point) -> Self {
        Self {
            component: hit.component,
            handle: hit.handle,
            last: at,
        }
    }

    /// Applies the motion to `p` onto `layout`. `center` is the component's
    /// current rect center, used by rotation.
    ///
    /// Returns whether the layout changed.
    pub fn drag_to(&mut self, layout: &mut LayoutSpec, p: Point, center: Point) -> bool {
        let (dx, dy) = (p.x - self.last.x, p.y - self.last.y);
        self.last = p;

        match self.handle {
            Handle::Move => {
                let (x, y) = layout.anchor_mut(self.component);
                *x += dx;
                *y += dy;
                dx != 0.0 || dy != 0.0
            }
            Handle::Rotate => {
                let angle = (p.y - center.y).atan2(p.x - center.x).to_degrees();
                let rotation = layout.rotation_mut(self.component);
                let next = (angle + 90.0).round();
                let changed = *rotation != next;
                *rotation = next;
                changed
            }
            Handle::Resize => match layout.size_mut(self.component) {
                Some(size) => {
                    let next = (*size + dx).max(MIN_COMPONENT_SIZE);
                    let changed = *size != next;
                    *size = next;
                    changed
                }
                None => false,
            },
        }
    }

    /// Like [`drag_to`](Self::drag_to), reading the center from the card's
    /// current geometry.
    pub fn drag_card(&mut self, card: &mut ResolvedCard, p: Point, measure: &dyn TextMeasure) -> bool {
        let center = CardGeometry::new(card, measure).rect_of(self.component).center();
        self.drag_to(&mut card.layout, p, center)
    }
}
