// src/engine/transform.rs
//
// Coordinate transformer: pointer deltas (display pixels) to geometry deltas
// for the active mode, and back.
//
// Everything here is a pure function of the gesture's start values plus the
// total pointer delta. Nothing accumulates per move, so rounding error cannot
// compound over a long drag.

use crate::engine::constraints::SlotBounds;
use crate::engine::geometry::{CropRect, DisplaySize, Geometry, Point, SourceSize};
use crate::ops::{Corner, Side};

fn usable_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Display-space delta to source-space delta
pub fn display_to_source_delta(delta: Point, scale: f64) -> Point {
    let scale = usable_scale(scale);
    Point::new(delta.x / scale, delta.y / scale)
}

/// Source-space delta to display-space delta
pub fn source_to_display_delta(delta: Point, scale: f64) -> Point {
    let scale = usable_scale(scale);
    Point::new(delta.x * scale, delta.y * scale)
}

/// Unclamped display width for a corner drag.
///
/// Only the horizontal delta counts. Left corners grow when dragged left.
pub fn resize_candidate_width(corner: Corner, start_width: u32, delta: Point) -> f64 {
    let start = f64::from(start_width);
    if corner.is_left() {
        start - delta.x
    } else {
        start + delta.x
    }
}

/// Geometry for a corner drag: crop untouched, height derived from the crop
pub fn resize_geometry(corner: Corner, start: &Geometry, delta: Point, bounds: &SlotBounds) -> Geometry {
    let width = bounds.clamp_display_width(resize_candidate_width(
        corner,
        start.display.width,
        delta,
    ));
    Geometry::new(start.crop, width)
}

/// Crop after moving one side by `delta` source pixels.
///
/// Exactly one edge moves; the opposite edge and the other axis are copied
/// from `start` unchanged.
pub fn crop_candidate(
    side: Side,
    start: &CropRect,
    delta: Point,
    source: SourceSize,
    bounds: &SlotBounds,
) -> CropRect {
    let mut crop = *start;
    match side {
        Side::Top => {
            let bottom = start.bottom();
            let y = bounds.clamp_leading_edge(start.y + delta.y, bottom, source.height);
            crop.y = y;
            crop.height = bottom - y;
        }
        Side::Bottom => {
            crop.height =
                bounds.clamp_trailing_length(start.height + delta.y, start.y, source.height);
        }
        Side::Left => {
            let right = start.right();
            let x = bounds.clamp_leading_edge(start.x + delta.x, right, source.width);
            crop.x = x;
            crop.width = right - x;
        }
        Side::Right => {
            crop.width =
                bounds.clamp_trailing_length(start.width + delta.x, start.x, source.width);
        }
    }
    crop
}

/// Display box for `crop` at the visual scale the user saw at `anchor`.
///
/// Cropping changes the visible region, not the zoom: the box grows or
/// shrinks with the crop width. Used both for live preview and at commit, so
/// the last preview and the committed geometry are identical.
pub fn display_for_crop(anchor: &Geometry, crop: &CropRect, bounds: &SlotBounds) -> DisplaySize {
    let ratio = if anchor.crop.width > 0.0 && anchor.crop.width.is_finite() {
        crop.width / anchor.crop.width
    } else {
        1.0
    };
    let width = bounds.clamp_display_width(f64::from(anchor.display.width) * ratio);
    DisplaySize::for_crop(width, crop)
}
