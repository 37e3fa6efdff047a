// src/engine/geometry.rs
//
// The three coordinate spaces and the one derived invariant that ties them:
//
// - source space:  natural pixels of the asset (sourceWidth x sourceHeight)
// - crop space:    an axis-aligned rectangle inside source space
// - display space: the on-screen box, whose aspect ratio equals the crop's
//
// displayHeight is never trusted on its own. What gets rendered is always
// derived from displayWidth and the current crop; the stored height is a
// cache refreshed at commit time.

use crate::engine::style::FrameStyle;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Float noise allowed on edge sums (`x + width`) in containment checks
const EDGE_EPSILON: f64 = 1e-9;

/// Pointer position or offset in display-space pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Offset of `self` relative to `origin`
    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Natural pixel dimensions of the decoded asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSize {
    pub width: u32,
    pub height: u32,
}

impl SourceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both dimensions probed and non-zero
    pub fn is_known(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Crop rectangle in source-space pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole source image
    pub fn full(source: SourceSize) -> Self {
        Self::new(0.0, 0.0, f64::from(source.width), f64::from(source.height))
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Zero/negative extent or non-finite values: not usable for any ratio math
    pub fn is_degenerate(&self) -> bool {
        !self.is_finite() || self.width <= 0.0 || self.height <= 0.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        crop_aspect_ratio(self)
    }

    /// Whether the rectangle satisfies the persisted-crop invariant for `source`
    pub fn is_contained_in(&self, source: SourceSize) -> bool {
        !self.is_degenerate()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.width >= 1.0 - EDGE_EPSILON
            && self.height >= 1.0 - EDGE_EPSILON
            && self.right() <= f64::from(source.width) + EDGE_EPSILON
            && self.bottom() <= f64::from(source.height) + EDGE_EPSILON
    }

    /// Pull the rectangle back inside `source`.
    ///
    /// Degenerate rectangles are replaced by the full-image crop. Otherwise the
    /// size is kept where possible and the origin shifted to fit.
    pub fn clamped_to(&self, source: SourceSize) -> Self {
        if self.is_degenerate() {
            return Self::full(source);
        }
        let source_w = f64::from(source.width.max(1));
        let source_h = f64::from(source.height.max(1));
        let width = self.width.clamp(1.0, source_w);
        let height = self.height.clamp(1.0, source_h);
        Self::new(
            self.x.clamp(0.0, source_w - width),
            self.y.clamp(0.0, source_h - height),
            width,
            height,
        )
    }

    /// Round every edge to the whole-pixel grid.
    ///
    /// Edges are rounded, not sizes, so a rectangle that was inside integral
    /// bounds stays inside, and a side of at least n pixels stays at least n.
    pub fn snapped(&self) -> Self {
        let left = self.x.round();
        let top = self.y.round();
        Self::new(
            left,
            top,
            self.right().round() - left,
            self.bottom().round() - top,
        )
    }
}

/// On-screen box size in host layout units
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Box of `width` proportioned to `crop`
    pub fn for_crop(width: u32, crop: &CropRect) -> Self {
        Self::new(width, effective_display_height(width, crop))
    }
}

/// Crop plus display box: everything that changes during an interaction
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub crop: CropRect,
    pub display: DisplaySize,
}

impl Geometry {
    pub fn new(crop: CropRect, display_width: u32) -> Self {
        Self {
            crop,
            display: DisplaySize::for_crop(display_width, &crop),
        }
    }

    /// Display height matches the crop ratio (the invariant that must hold
    /// whenever the image is not being cropped)
    pub fn is_proportional(&self) -> bool {
        self.display.height == effective_display_height(self.display.width, &self.crop)
    }

    pub fn source_to_display_scale(&self) -> f64 {
        source_to_display_scale(self.display.width, &self.crop)
    }
}

/// Horizontal placement of the image inside its slot (host cosmetic)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

/// The persisted unit.
///
/// Field names follow the host's stored JSON (camelCase). Host fields this
/// crate does not model are kept in `extra` and written back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageItem {
    pub id: String,
    pub url: String,
    pub source_width: u32,
    pub source_height: u32,
    pub crop: CropRect,
    pub display_width: u32,
    pub display_height: u32,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<FrameStyle>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageItem {
    /// Fresh item showing the whole source at `display_width`
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        source: SourceSize,
        display_width: u32,
    ) -> Self {
        let crop = CropRect::full(source);
        Self {
            id: id.into(),
            url: url.into(),
            source_width: source.width,
            source_height: source.height,
            crop,
            display_width,
            display_height: effective_display_height(display_width, &crop),
            alignment: Alignment::default(),
            frame: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn source(&self) -> SourceSize {
        SourceSize::new(self.source_width, self.source_height)
    }

    /// Geometry to render: height re-derived from width and crop, never the cache
    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.crop, self.display_width)
    }

    /// Copy with new geometry; every other field is carried over unchanged
    pub fn with_geometry(&self, geometry: &Geometry) -> Self {
        Self {
            crop: geometry.crop,
            display_width: geometry.display.width,
            display_height: geometry.display.height,
            ..self.clone()
        }
    }

    /// Stored height agrees with the crop ratio
    pub fn is_consistent(&self) -> bool {
        self.crop.is_contained_in(self.source())
            && self.display_height == effective_display_height(self.display_width, &self.crop)
    }

    /// Repaired copy, or `None` if the item is already consistent.
    ///
    /// A degenerate or non-finite crop becomes the full-image crop, an
    /// out-of-bounds crop is pulled back inside the source, and the stored
    /// height is re-derived from width and crop.
    pub fn repair(&self) -> Option<Self> {
        if self.is_consistent() {
            return None;
        }
        let crop = self.crop.clamped_to(self.source());
        Some(Self {
            crop,
            display_height: effective_display_height(self.display_width, &crop),
            ..self.clone()
        })
    }
}

/// Where and how large to paint the full source so only the crop shows
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundLayout {
    /// Background offset, always <= 0
    pub offset_x: f64,
    pub offset_y: f64,
    /// Background size (the whole source, scaled)
    pub width: f64,
    pub height: f64,
    /// Visible box
    pub viewport: DisplaySize,
}

/// `crop.height / crop.width`, or 1 for a degenerate crop
pub fn crop_aspect_ratio(crop: &CropRect) -> f64 {
    if crop.width == 0.0 {
        return 1.0;
    }
    let ratio = crop.height / crop.width;
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        1.0
    }
}

/// The height to render for `display_width`; the single source of truth
pub fn effective_display_height(display_width: u32, crop: &CropRect) -> u32 {
    round_to_u32(f64::from(display_width) * crop_aspect_ratio(crop))
}

/// Display pixels per source pixel, or 1 for a degenerate crop
pub fn source_to_display_scale(display_width: u32, crop: &CropRect) -> f64 {
    if crop.width <= 0.0 || !crop.width.is_finite() {
        return 1.0;
    }
    let scale = f64::from(display_width) / crop.width;
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}

pub fn background_layout(source: SourceSize, crop: &CropRect, display_width: u32) -> BackgroundLayout {
    let scale = source_to_display_scale(display_width, crop);
    let (crop_x, crop_y) = if crop.is_finite() {
        (crop.x, crop.y)
    } else {
        (0.0, 0.0)
    };
    BackgroundLayout {
        offset_x: -crop_x * scale,
        offset_y: -crop_y * scale,
        width: f64::from(source.width) * scale,
        height: f64::from(source.height) * scale,
        viewport: DisplaySize::for_crop(display_width, crop),
    }
}

/// Round a non-negative layout value to whole units (saturating, NaN -> 0)
pub(crate) fn round_to_u32(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value.round() as u32
    }
}
