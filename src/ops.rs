// src/ops.rs
//
// Interaction vocabulary: handles, input events and per-role presets.
// These are plain values - the host builds them from its own DOM/pointer
// events and feeds them to an ImageSlot.

use crate::engine::constraints::SlotBounds;
use crate::engine::geometry::Point;
use crate::error::{Result, SlotError};

/// Corner handles shown in resize mode (aspect ratio locked)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Left-side corners grow the image when dragged to the left
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Side handles shown in crop mode (each moves exactly one crop edge)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn is_horizontal_axis(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Any draggable handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    Corner(Corner),
    Side(Side),
}

impl Handle {
    /// Parse the short handle names hosts put on their handle elements
    /// (`tl|tr|bl|br` for corners, `top|right|bottom|left` for sides).
    pub fn from_name(name: &str) -> Option<Self> {
        let handle = match name.to_lowercase().as_str() {
            "tl" => Handle::Corner(Corner::TopLeft),
            "tr" => Handle::Corner(Corner::TopRight),
            "bl" => Handle::Corner(Corner::BottomLeft),
            "br" => Handle::Corner(Corner::BottomRight),
            "top" => Handle::Side(Side::Top),
            "right" => Handle::Side(Side::Right),
            "bottom" => Handle::Side(Side::Bottom),
            "left" => Handle::Side(Side::Left),
            _ => return None,
        };
        Some(handle)
    }

    pub fn name(self) -> &'static str {
        match self {
            Handle::Corner(Corner::TopLeft) => "tl",
            Handle::Corner(Corner::TopRight) => "tr",
            Handle::Corner(Corner::BottomLeft) => "bl",
            Handle::Corner(Corner::BottomRight) => "br",
            Handle::Side(Side::Top) => "top",
            Handle::Side(Side::Right) => "right",
            Handle::Side(Side::Bottom) => "bottom",
            Handle::Side(Side::Left) => "left",
        }
    }
}

/// Events an ImageSlot reacts to.
///
/// Pointer positions are in display-space pixels; only deltas relative to the
/// pointer-down position matter, so any fixed origin works.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on a handle
    PointerDown { handle: Handle, position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// Pointer left the window mid-gesture
    PointerLeave,
    /// Gesture aborted by the platform (touch cancel, lost capture)
    PointerCancel,
    /// Single click on the image
    Click,
    /// Double click on the image
    DoubleClick,
    /// Click anywhere outside the image slot
    ExternalClick,
    Escape,
    /// Explicit confirm (toolbar button)
    Confirm,
}

// =============================================================================
// PRESETS - Bounds for each image role in the builder
// =============================================================================

/// Image roles in the builder. All roles share one engine; only their bounds differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotRole {
    Logo,
    Header,
    PartnerLogo,
    Canvas,
}

impl SlotRole {
    /// Get the built-in role by name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "logo" => Ok(SlotRole::Logo),
            "header" | "header-photo" => Ok(SlotRole::Header),
            "partner-logo" | "partner" => Ok(SlotRole::PartnerLogo),
            "canvas" | "test-canvas" => Ok(SlotRole::Canvas),
            other => Err(SlotError::unknown_preset(other.to_string())),
        }
    }

    /// Bounds preset for this role
    pub fn bounds(self) -> SlotBounds {
        match self {
            // Logo: small, sits next to the site title
            SlotRole::Logo => SlotBounds::new_unchecked(40, 400, 50.0),
            // Header photo: spans the page width
            SlotRole::Header => SlotBounds::new_unchecked(200, 1600, 50.0),
            // Partner logos: a row of small tiles
            SlotRole::PartnerLogo => SlotBounds::new_unchecked(40, 240, 50.0),
            // Test canvases used by the page designer
            SlotRole::Canvas => SlotBounds::new_unchecked(50, 1200, 50.0),
        }
    }
}

// =============================================================================
// FUZZING - Compact binary encoding of event streams
// =============================================================================

/// Decode an event stream from raw bytes.
///
/// One tag byte per event (`tag % 10` picks the kind); pointer events are
/// followed by two little-endian i16 coordinates, with `i16::MIN` standing
/// for NaN. A truncated trailing event is dropped.
#[cfg(feature = "fuzzing")]
pub fn events_from_bytes(data: &[u8]) -> Vec<InputEvent> {
    fn coord(lo: u8, hi: u8) -> f64 {
        match i16::from_le_bytes([lo, hi]) {
            i16::MIN => f64::NAN,
            value => f64::from(value),
        }
    }

    let mut events = Vec::new();
    let mut rest = data;
    while let Some((&tag, tail)) = rest.split_first() {
        rest = tail;
        let kind = tag % 10;
        let mut position = Point::default();
        if kind <= 2 {
            let Some(&[x0, x1, y0, y1]) = rest.get(..4) else {
                break;
            };
            position = Point::new(coord(x0, x1), coord(y0, y1));
            rest = &rest[4..];
        }
        let index = usize::from(tag / 20) % 4;
        let event = match kind {
            0 if (tag / 10) % 2 == 0 => InputEvent::PointerDown {
                handle: Handle::Corner(Corner::ALL[index]),
                position,
            },
            0 => InputEvent::PointerDown {
                handle: Handle::Side(Side::ALL[index]),
                position,
            },
            1 => InputEvent::PointerMove { position },
            2 => InputEvent::PointerUp { position },
            3 => InputEvent::PointerLeave,
            4 => InputEvent::PointerCancel,
            5 => InputEvent::Click,
            6 => InputEvent::DoubleClick,
            7 => InputEvent::ExternalClick,
            8 => InputEvent::Escape,
            _ => InputEvent::Confirm,
        };
        events.push(event);
    }
    events
}
