// src/engine/constraints.rs
//
// Constraint policy: display width bounds, minimum crop side, containment.
//
// Nothing here rejects a candidate. Every rule clamps, so an interaction can
// always continue smoothly. Validation errors only happen when the host
// builds the bounds themselves.

use crate::engine::geometry::{effective_display_height, ImageItem};
use crate::engine::{DEFAULT_MAX_WIDTH, DEFAULT_MIN_SIDE, DEFAULT_MIN_WIDTH};
use crate::error::{Result, SlotError};
use crate::ops::SlotRole;

/// Per-slot bounds supplied by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotBounds {
    /// Smallest display width, in layout units
    pub min_width: u32,
    /// Largest display width, usually the container width
    pub max_width: u32,
    /// Smallest crop side, in source pixels
    pub min_side: f64,
}

impl Default for SlotBounds {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_MIN_WIDTH, DEFAULT_MAX_WIDTH, DEFAULT_MIN_SIDE)
    }
}

impl SlotBounds {
    pub fn new(min_width: u32, max_width: u32, min_side: f64) -> Result<Self> {
        let bounds = Self::new_unchecked(min_width, max_width, min_side);
        bounds.validate()?;
        Ok(bounds)
    }

    pub(crate) const fn new_unchecked(min_width: u32, max_width: u32, min_side: f64) -> Self {
        Self {
            min_width,
            max_width,
            min_side,
        }
    }

    pub fn for_role(role: SlotRole) -> Self {
        role.bounds()
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_width == 0 || self.min_width > self.max_width {
            return Err(SlotError::invalid_display_bounds(
                self.min_width,
                self.max_width,
            ));
        }
        if !self.min_side.is_finite() || self.min_side < 1.0 {
            return Err(SlotError::invalid_min_side(self.min_side));
        }
        Ok(())
    }

    /// Narrow the maximum width to the layout container (never below min_width)
    pub fn with_container_width(self, container_width: u32) -> Self {
        Self {
            max_width: container_width.max(self.min_width),
            ..self
        }
    }

    /// Clamp a candidate display width and round it to whole layout units.
    ///
    /// An unvalidated literal may have min and max swapped; the range is
    /// ordered here first.
    pub fn clamp_display_width(&self, candidate: f64) -> u32 {
        let low = self.min_width.min(self.max_width);
        let high = self.min_width.max(self.max_width);
        if !candidate.is_finite() {
            return low;
        }
        let clamped = candidate.clamp(f64::from(low), f64::from(high));
        clamped.round() as u32
    }

    /// Minimum side along an axis of `extent` source pixels.
    ///
    /// Rounded up to whole pixels so that snapped commits keep it. A source
    /// smaller than min_side can only be cropped down to itself.
    pub fn effective_min_side(&self, extent: u32) -> f64 {
        self.min_side.ceil().min(f64::from(extent))
    }

    /// New position of a leading edge (top/left) while the trailing edge stays put.
    ///
    /// The edge may travel in `[0, trailing - min_side]`. When that range is
    /// empty the boundary wins: containment is never given up for min_side.
    pub fn clamp_leading_edge(&self, candidate: f64, trailing: f64, extent: u32) -> f64 {
        let min_side = self.effective_min_side(extent);
        candidate.min(trailing - min_side).max(0.0)
    }

    /// New length behind a fixed leading edge (bottom/right drag).
    ///
    /// Length may be in `[min_side, extent - start]`; the upper bound is
    /// applied last so the rectangle always stays inside the source.
    pub fn clamp_trailing_length(&self, candidate: f64, start: f64, extent: u32) -> f64 {
        let min_side = self.effective_min_side(extent);
        candidate.max(min_side).min(f64::from(extent) - start)
    }

    /// Bring a host-supplied item in line with these bounds.
    ///
    /// Returns `None` when the item already conforms.
    pub fn conform_item(&self, item: &ImageItem) -> Option<ImageItem> {
        let repaired = item.repair();
        let base = repaired.as_ref().unwrap_or(item);
        let width = self.clamp_display_width(f64::from(base.display_width));
        if width == base.display_width {
            return repaired;
        }
        Some(ImageItem {
            display_width: width,
            display_height: effective_display_height(width, &base.crop),
            ..base.clone()
        })
    }
}
