// src/engine/overlay.rs
//
// Handle and toolbar placement, computed on demand.
//
// The host passes the slot container's current bounding box every time it
// asks. Nothing is cached here, so positions can never go stale after a
// scroll, a relayout or a resize of a neighbouring slot.

use crate::engine::geometry::Point;
use crate::engine::mode::Mode;
use crate::ops::{Corner, Handle, Side};
use bitflags::bitflags;

/// Gap between the image box and the floating toolbar, in screen pixels
pub const TOOLBAR_GAP: f64 = 8.0;

/// Default hit radius around a handle centre, in screen pixels
pub const DEFAULT_HIT_TOLERANCE: f64 = 10.0;

bitflags! {
    /// Set of handles shown for a mode
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HandleSet: u8 {
        const TOP_LEFT = 1 << 0;
        const TOP_RIGHT = 1 << 1;
        const BOTTOM_LEFT = 1 << 2;
        const BOTTOM_RIGHT = 1 << 3;
        const TOP = 1 << 4;
        const RIGHT = 1 << 5;
        const BOTTOM = 1 << 6;
        const LEFT = 1 << 7;

        const CORNERS = Self::TOP_LEFT.bits()
            | Self::TOP_RIGHT.bits()
            | Self::BOTTOM_LEFT.bits()
            | Self::BOTTOM_RIGHT.bits();
        const SIDES = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

const ALL_HANDLES: [Handle; 8] = [
    Handle::Corner(Corner::TopLeft),
    Handle::Corner(Corner::TopRight),
    Handle::Corner(Corner::BottomLeft),
    Handle::Corner(Corner::BottomRight),
    Handle::Side(Side::Top),
    Handle::Side(Side::Right),
    Handle::Side(Side::Bottom),
    Handle::Side(Side::Left),
];

impl HandleSet {
    /// Corner handles while resizing, side handles while cropping, none when idle
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Idle => HandleSet::empty(),
            Mode::Resizing => HandleSet::CORNERS,
            Mode::Cropping => HandleSet::SIDES,
        }
    }

    pub fn flag(handle: Handle) -> Self {
        match handle {
            Handle::Corner(Corner::TopLeft) => HandleSet::TOP_LEFT,
            Handle::Corner(Corner::TopRight) => HandleSet::TOP_RIGHT,
            Handle::Corner(Corner::BottomLeft) => HandleSet::BOTTOM_LEFT,
            Handle::Corner(Corner::BottomRight) => HandleSet::BOTTOM_RIGHT,
            Handle::Side(Side::Top) => HandleSet::TOP,
            Handle::Side(Side::Right) => HandleSet::RIGHT,
            Handle::Side(Side::Bottom) => HandleSet::BOTTOM,
            Handle::Side(Side::Left) => HandleSet::LEFT,
        }
    }

    pub fn contains_handle(self, handle: Handle) -> bool {
        self.contains(Self::flag(handle))
    }

    pub fn handles(self) -> impl Iterator<Item = Handle> {
        ALL_HANDLES
            .into_iter()
            .filter(move |handle| self.contains_handle(*handle))
    }
}

/// Bounding box of the slot container in screen pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Centre of a handle on `rect`: corners at the corners, sides at edge midpoints
pub fn handle_position(rect: &ScreenRect, handle: Handle) -> Point {
    let left = rect.x;
    let right = rect.x + rect.width;
    let top = rect.y;
    let bottom = rect.y + rect.height;
    let center = rect.center();
    match handle {
        Handle::Corner(Corner::TopLeft) => Point::new(left, top),
        Handle::Corner(Corner::TopRight) => Point::new(right, top),
        Handle::Corner(Corner::BottomLeft) => Point::new(left, bottom),
        Handle::Corner(Corner::BottomRight) => Point::new(right, bottom),
        Handle::Side(Side::Top) => Point::new(center.x, top),
        Handle::Side(Side::Right) => Point::new(right, center.y),
        Handle::Side(Side::Bottom) => Point::new(center.x, bottom),
        Handle::Side(Side::Left) => Point::new(left, center.y),
    }
}

/// Visible handles for `mode` with their positions
pub fn handle_positions(mode: Mode, rect: &ScreenRect) -> Vec<(Handle, Point)> {
    HandleSet::for_mode(mode)
        .handles()
        .map(|handle| (handle, handle_position(rect, handle)))
        .collect()
}

/// Closest visible handle within `tolerance` of `pointer`
pub fn hit_test(mode: Mode, rect: &ScreenRect, pointer: Point, tolerance: f64) -> Option<Handle> {
    if !pointer.is_finite() {
        return None;
    }
    HandleSet::for_mode(mode)
        .handles()
        .map(|handle| {
            let pos = handle_position(rect, handle);
            let distance = (pos.x - pointer.x).hypot(pos.y - pointer.y);
            (handle, distance)
        })
        .filter(|(_, distance)| *distance <= tolerance)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(handle, _)| handle)
}

/// Where to put the floating toolbar for the active slot.
///
/// Centred above the box; flipped below it when there is no room above
/// `viewport_top`.
pub fn toolbar_anchor(rect: &ScreenRect, toolbar_height: f64, viewport_top: f64) -> Point {
    let center_x = rect.x + rect.width / 2.0;
    let above = rect.y - TOOLBAR_GAP - toolbar_height;
    if above >= viewport_top {
        Point::new(center_x, above)
    } else {
        Point::new(center_x, rect.y + rect.height + TOOLBAR_GAP)
    }
}
