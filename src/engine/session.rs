// src/engine/session.rs
//
// Drag session: one pointer gesture on one handle.
//
// The session is created on pointer-down and dropped on pointer-up (or when
// the pointer leaves the window). It snapshots the start pointer and start
// geometry once and never mutates them: every move is computed from that
// anchor plus the total pointer delta.

use crate::engine::constraints::SlotBounds;
use crate::engine::geometry::{Geometry, Point, SourceSize};
use crate::engine::transform::{
    crop_candidate, display_for_crop, display_to_source_delta, resize_geometry,
};
use crate::ops::{Corner, Handle, Side};

#[cfg(feature = "move-debug")]
use once_cell::sync::Lazy;

/// What the gesture manipulates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragKind {
    /// Whole image, aspect-locked, via a corner
    Resize(Corner),
    /// One crop edge, independent of the others, via a side
    Crop(Side),
}

impl DragKind {
    pub fn handle(self) -> Handle {
        match self {
            DragKind::Resize(corner) => Handle::Corner(corner),
            DragKind::Crop(side) => Handle::Side(side),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    kind: DragKind,
    start_pointer: Point,
    start: Geometry,
    /// Crop sessions: geometry at crop-mode entry, sizing the live display box
    anchor: Geometry,
    /// Display pixels per source pixel on screen at pointer-down
    scale: f64,
    current: Geometry,
    moves: u32,
}

impl DragSession {
    pub fn begin_resize(corner: Corner, pointer: Point, start: Geometry) -> Self {
        Self {
            kind: DragKind::Resize(corner),
            start_pointer: pointer,
            start,
            anchor: start,
            scale: start.source_to_display_scale(),
            current: start,
            moves: 0,
        }
    }

    /// Start a crop gesture.
    ///
    /// Pointer deltas convert at the scale of `start`, which is what the user
    /// sees when the gesture begins, so the dragged edge tracks the pointer
    /// even after an earlier gesture clamped the display width. `anchor` is
    /// the geometry at crop-mode entry and only sizes the display box.
    pub fn begin_crop(side: Side, pointer: Point, start: Geometry, anchor: Geometry) -> Self {
        Self {
            kind: DragKind::Crop(side),
            start_pointer: pointer,
            start,
            anchor,
            scale: start.source_to_display_scale(),
            current: start,
            moves: 0,
        }
    }

    pub fn kind(&self) -> DragKind {
        self.kind
    }

    pub fn start_pointer(&self) -> Point {
        self.start_pointer
    }

    pub fn start_geometry(&self) -> &Geometry {
        &self.start
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Latest candidate geometry
    pub fn current(&self) -> &Geometry {
        &self.current
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn has_changed(&self) -> bool {
        self.current != self.start
    }

    /// Feed a pointer position; returns the new candidate geometry.
    ///
    /// Non-finite positions are ignored (returns `None`) so a bad event can
    /// never push NaN into the geometry.
    pub fn update(
        &mut self,
        pointer: Point,
        source: SourceSize,
        bounds: &SlotBounds,
    ) -> Option<Geometry> {
        if !pointer.is_finite() {
            tracing::debug!(kind = ?self.kind, "ignoring non-finite pointer position");
            return None;
        }
        let delta = pointer.delta_from(self.start_pointer);
        let next = match self.kind {
            DragKind::Resize(corner) => resize_geometry(corner, &self.start, delta, bounds),
            DragKind::Crop(side) => {
                let source_delta = display_to_source_delta(delta, self.scale);
                let crop = crop_candidate(side, &self.start.crop, source_delta, source, bounds);
                Geometry {
                    crop,
                    display: display_for_crop(&self.anchor, &crop, bounds),
                }
            }
        };
        debug_assert!(next.crop.is_finite(), "drag produced non-finite crop: {next:?}");
        self.current = next;
        self.moves = self.moves.saturating_add(1);
        log_move(self.kind, &next);
        Some(next)
    }

    /// End the gesture, yielding the final candidate
    pub fn finish(self) -> Geometry {
        tracing::debug!(kind = ?self.kind, moves = self.moves, changed = self.has_changed(), "drag session finished");
        self.current
    }
}

// Optional per-move debug logging.
// Enabled only when feature "move-debug" is on AND env SLOT_CROP_DEBUG_MOVES=1.
#[cfg(feature = "move-debug")]
fn log_move(kind: DragKind, geometry: &Geometry) {
    static MOVE_DEBUG_ENABLED: Lazy<bool> =
        Lazy::new(|| std::env::var("SLOT_CROP_DEBUG_MOVES").is_ok());
    if *MOVE_DEBUG_ENABLED {
        tracing::debug!(
            target: "slot_crop::moves",
            ?kind,
            crop_x = geometry.crop.x,
            crop_y = geometry.crop.y,
            crop_w = geometry.crop.width,
            crop_h = geometry.crop.height,
            width = geometry.display.width,
            height = geometry.display.height,
            "drag move"
        );
    }
}

#[cfg(not(feature = "move-debug"))]
fn log_move(_kind: DragKind, _geometry: &Geometry) {}
