// src/error.rs
//
// Unified error handling for slot-crop
// Uses thiserror for simple, type-safe error handling
//
// Error Taxonomy:
// - UserError: Invalid host input (item, bounds, preset), recoverable
// - InternalBug: Invariant violations inside the engine (should not happen)
//
// Normal pointer interaction never produces an error: out-of-range candidates
// are clamped. Errors only surface when a slot is built or configured.

use std::borrow::Cow;
use thiserror::Error;

/// Error taxonomy for callers that need to branch on the kind of failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Invalid input from the host, recoverable by fixing the input
    UserError,
    /// Library bugs (should not happen)
    InternalBug,
}

impl ErrorCategory {
    /// Get string representation of error category
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::UserError => "UserError",
            ErrorCategory::InternalBug => "InternalBug",
        }
    }

    /// Get the SLOT_CROP_* error code string for this category
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCategory::UserError => "SLOT_CROP_USER_ERROR",
            ErrorCategory::InternalBug => "SLOT_CROP_INTERNAL_BUG",
        }
    }
}

/// slot-crop error types
#[derive(Debug, Clone, Error)]
pub enum SlotError {
    // Item Errors
    #[error("Source dimensions unknown ({width}x{height}). Probe the asset before creating a slot")]
    SourceDimensionsUnknown { width: u32, height: u32 },

    #[error("Invalid image item JSON: {message}")]
    InvalidItemJson { message: Cow<'static, str> },

    // Bounds Errors
    #[error("Invalid display bounds: min_width={min_width}, max_width={max_width}")]
    InvalidDisplayBounds { min_width: u32, max_width: u32 },

    #[error("Invalid minimum crop side: {value}. Must be finite and at least 1")]
    InvalidMinSide { value: f64 },

    // Configuration Errors
    #[error("Unknown slot preset: '{name}'. Available: logo, header, partner-logo, canvas")]
    UnknownPreset { name: Cow<'static, str> },

    #[error("Invalid value for {name}: {value}. {reason}")]
    InvalidArgument {
        name: Cow<'static, str>,
        value: Cow<'static, str>,
        reason: Cow<'static, str>,
    },

    // Internal Errors
    #[error("Non-finite geometry in {field}")]
    NonFiniteGeometry { field: Cow<'static, str> },

    #[error("Geometry invariant violated: {message}")]
    InvariantViolated { message: Cow<'static, str> },
}

// Constructor Helpers
impl SlotError {
    pub fn source_dimensions_unknown(width: u32, height: u32) -> Self {
        Self::SourceDimensionsUnknown { width, height }
    }

    pub fn invalid_item_json(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidItemJson {
            message: message.into(),
        }
    }

    pub fn invalid_display_bounds(min_width: u32, max_width: u32) -> Self {
        Self::InvalidDisplayBounds {
            min_width,
            max_width,
        }
    }

    pub fn invalid_min_side(value: f64) -> Self {
        Self::InvalidMinSide { value }
    }

    pub fn unknown_preset(name: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownPreset { name: name.into() }
    }

    pub fn invalid_argument(
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn non_finite_geometry(field: impl Into<Cow<'static, str>>) -> Self {
        Self::NonFiniteGeometry {
            field: field.into(),
        }
    }

    pub fn invariant_violated(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvariantViolated {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (host can fix its input)
    pub fn is_recoverable(&self) -> bool {
        match self.category() {
            ErrorCategory::UserError => true,
            ErrorCategory::InternalBug => false,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceDimensionsUnknown { .. }
            | Self::InvalidItemJson { .. }
            | Self::InvalidDisplayBounds { .. }
            | Self::InvalidMinSide { .. }
            | Self::UnknownPreset { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::UserError,

            Self::NonFiniteGeometry { .. } | Self::InvariantViolated { .. } => {
                ErrorCategory::InternalBug
            }
        }
    }
}

impl From<serde_json::Error> for SlotError {
    fn from(err: serde_json::Error) -> Self {
        SlotError::invalid_item_json(err.to_string())
    }
}

// Result type alias
pub type Result<T> = std::result::Result<T, SlotError>;
