//! Error types for the driver
//!
//! - [`GeometryError`] - invalid panel geometry or configuration
//! - [`BufferError`] - plane buffers that do not fit the geometry
//! - [`Error`] - runtime errors from display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - low-level SPI/GPIO failures and busy timeouts
//!
//! ## Example
//!
//! ```
//! use epd2in66b::{DisplayGeometry, GeometryError, Plane};
//!
//! // Rows must be byte-aligned
//! let result = DisplayGeometry::new("odd", 150, 296, &[Plane::BlackWhite]);
//! assert!(matches!(result, Err(GeometryError::InvalidDimensions { .. })));
//! ```

use crate::color::Plane;
use crate::display::State;
use crate::interface::DisplayInterface;

/// Maximum panel width in pixels
///
/// The RAM X end address is 5 bits of byte units.
pub const MAX_WIDTH: u16 = 256;

/// Maximum panel height in pixels
///
/// The RAM Y end address is 9 bits.
pub const MAX_HEIGHT: u16 = 512;

/// Errors that can occur when driving the display
///
/// Generic over the interface type so callers can match on the underlying
/// hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO/busy timeout)
    ///
    /// The operation was aborted part way; re-run `initialize` before the next frame.
    Interface(I::Error),
    /// A plane required by the geometry is absent from the buffer
    MissingPlane(Plane),
    /// A plane buffer does not hold exactly one frame
    BufferLength {
        /// Offending plane
        plane: Plane,
        /// Required length in bytes
        expected: usize,
        /// Provided length in bytes
        provided: usize,
    },
    /// Operation is not valid in the current session state
    InvalidState {
        /// Operation that was attempted
        operation: &'static str,
        /// State the driver was in
        state: State,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::MissingPlane(plane) => write!(f, "Buffer is missing the {plane} plane"),
            Self::BufferLength {
                plane,
                expected,
                provided,
            } => write!(
                f,
                "The {plane} plane must be {expected} bytes, provided {provided}"
            ),
            Self::InvalidState { operation, state } => {
                write!(f, "Cannot {operation} while {state:?}")
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when describing a panel
#[derive(Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Width/height are zero, too large, or the width is not a multiple of 8
    InvalidDimensions {
        /// Width in pixels
        width: u16,
        /// Height in pixels
        height: u16,
    },
    /// No planes were listed
    NoPlanes,
    /// The same plane was listed twice
    DuplicatePlane(Plane),
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, width must be multiple of 8)"
            ),
            Self::NoPlanes => write!(f, "At least one plane must be specified"),
            Self::DuplicatePlane(plane) => write!(f, "The {plane} plane is listed twice"),
        }
    }
}

impl core::error::Error for GeometryError {}

/// Errors that can occur when assembling a [`PlaneBuffer`](crate::buffer::PlaneBuffer)
#[derive(Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Bitmap length differs from `width / 8 * height`
    LengthMismatch {
        /// Offending plane
        plane: Plane,
        /// Required length in bytes
        expected: usize,
        /// Provided length in bytes
        provided: usize,
    },
    /// The same plane was supplied twice
    DuplicatePlane(Plane),
    /// The geometry does not declare this plane
    UnsupportedPlane(Plane),
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LengthMismatch {
                plane,
                expected,
                provided,
            } => write!(
                f,
                "The {plane} plane must be {expected} bytes, provided {provided}"
            ),
            Self::DuplicatePlane(plane) => write!(f, "The {plane} plane was supplied twice"),
            Self::UnsupportedPlane(plane) => {
                write!(f, "The panel has no {plane} plane")
            }
        }
    }
}

impl core::error::Error for BufferError {}
