// src/engine.rs
//
// The core of slot-crop. Per image slot it:
// 1. Turns pointer deltas into crop or display changes for the active mode
// 2. Clamps every candidate to the slot's bounds and the source image
// 3. Commits one replacement item when an interaction finishes
//
// This file is a facade over the modules in engine/

// =============================================================================
// DEFAULT BOUNDS
// =============================================================================

/// Smallest crop side, in source pixels
pub const DEFAULT_MIN_SIDE: f64 = 50.0;

/// Smallest display width, in layout units
pub const DEFAULT_MIN_WIDTH: u32 = 50;

/// Largest display width when the host gives no container width
pub const DEFAULT_MAX_WIDTH: u32 = 1200;

// =============================================================================
// MODULE DECOMPOSITION
// =============================================================================

pub mod api;
pub mod commit;
pub mod constraints;
pub mod geometry;
pub mod mode;
pub mod overlay;
pub mod session;
pub mod style;
pub mod transform;

// Re-export commonly used types and functions
pub use api::{ImageSlot, SlotHost};
pub use commit::{commit_crop, commit_resize, CommitOutcome};
pub use constraints::SlotBounds;
pub use geometry::{
    background_layout, crop_aspect_ratio, effective_display_height, source_to_display_scale,
    Alignment, BackgroundLayout, CropRect, DisplaySize, Geometry, ImageItem, Point, SourceSize,
};
pub use mode::{transition, Action, Mode, Transition, Trigger};
pub use overlay::{hit_test, toolbar_anchor, HandleSet, ScreenRect};
pub use session::{DragKind, DragSession};
pub use style::{broadcast_frame_style, frames_diverged, FrameStyle};
pub use transform::{display_for_crop, display_to_source_delta, source_to_display_delta};
