// src/engine/commit.rs
//
// Commit controller: turns the final tentative geometry of an interaction
// into a replacement ImageItem, or decides there is nothing to write.
//
// The persisted display size is always recomputed from the *final* crop.
// Stale stored values are never reused; that is how "white gap" drift between
// the displayed crop and the saved crop got in.

use crate::engine::constraints::SlotBounds;
use crate::engine::geometry::{CropRect, Geometry, ImageItem};
use crate::engine::transform::display_for_crop;

#[derive(Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    /// Geometry did not change; the host is not called
    Unchanged,
    /// New item for the host to persist
    Replaced(ImageItem),
}

impl CommitOutcome {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, CommitOutcome::Unchanged)
    }

    /// The item that is canonical after this commit
    pub fn resolve(self, committed: &ImageItem) -> ImageItem {
        match self {
            CommitOutcome::Unchanged => committed.clone(),
            CommitOutcome::Replaced(item) => item,
        }
    }
}

/// Finalize crop mode.
///
/// `anchor` is the geometry at crop-mode entry. The new display width keeps
/// the visual scale the user was looking at
/// (`anchor.width * final.width / anchor.crop.width`, clamped to bounds) and
/// the height is derived from the final crop.
pub fn commit_crop(
    committed: &ImageItem,
    anchor: &Geometry,
    final_crop: &CropRect,
    bounds: &SlotBounds,
) -> CommitOutcome {
    let crop = final_crop.clamped_to(committed.source()).snapped();
    if crop == committed.crop {
        tracing::debug!(id = %committed.id, "crop unchanged, nothing to commit");
        return CommitOutcome::Unchanged;
    }
    let geometry = Geometry {
        crop,
        display: display_for_crop(anchor, &crop, bounds),
    };
    debug_assert!(geometry.is_proportional());
    tracing::debug!(
        id = %committed.id,
        x = crop.x,
        y = crop.y,
        width = crop.width,
        height = crop.height,
        display_width = geometry.display.width,
        display_height = geometry.display.height,
        "crop committed"
    );
    CommitOutcome::Replaced(committed.with_geometry(&geometry))
}

/// Finalize one resize gesture.
///
/// Only the display width is taken from `geometry`; the crop stays the
/// committed one and the height is derived from it.
pub fn commit_resize(committed: &ImageItem, geometry: &Geometry) -> CommitOutcome {
    let resized = Geometry::new(committed.crop, geometry.display.width);
    if resized.display.width == committed.display_width
        && resized.display.height == committed.display_height
    {
        return CommitOutcome::Unchanged;
    }
    tracing::debug!(
        id = %committed.id,
        display_width = resized.display.width,
        display_height = resized.display.height,
        "resize committed"
    );
    CommitOutcome::Replaced(committed.with_geometry(&resized))
}
