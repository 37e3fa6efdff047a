// lib.rs
//
// slot-crop: interactive crop-and-resize engine for image slots
//
// Design goals:
// - Display box always follows the crop's aspect ratio
// - Crop never leaves the source image, never goes below the minimum side
// - One commit per finished interaction, none for no-ops
// - Independent slots, no shared geometry state

pub mod engine;
pub mod error;
pub mod ops;

pub use engine::{
    CropRect, DisplaySize, Geometry, ImageItem, ImageSlot, Mode, Point, SlotBounds, SlotHost,
    SourceSize,
};
pub use error::{ErrorCategory, Result, SlotError};
pub use ops::{Corner, Handle, InputEvent, Side, SlotRole};

/// Crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
