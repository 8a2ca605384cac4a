//! Packed pixel planes handed to the display
//!
//! A [`PlaneBuffer`] maps each [`Plane`] to one packed bitmap: one bit per
//! pixel, 8 pixels per byte, row-major, most significant bit first. Every
//! bitmap is exactly `width / 8 * height` bytes for the geometry it was built
//! against.
//!
//! Planes the caller leaves out stay absent; the display reports them as
//! [`Error::MissingPlane`](crate::Error::MissingPlane) instead of treating them
//! as blank.
//!
//! ## Example
//!
//! ```
//! use epd2in66b::{PlaneBuffer, Plane, EPD_2IN66B};
//!
//! let size = EPD_2IN66B.buffer_size();
//! let black = [0xFFu8; 5624];
//! let red = [0x00u8; 5624];
//! assert_eq!(size, black.len());
//!
//! let buffer = match PlaneBuffer::new(
//!     &EPD_2IN66B,
//!     [(Plane::BlackWhite, &black[..]), (Plane::RedWhite, &red[..])],
//! ) {
//!     Ok(buffer) => buffer,
//!     Err(_) => return,
//! };
//! assert_eq!(buffer.get(Plane::RedWhite).map(<[u8]>::len), Some(5624));
//! ```

use crate::color::{Color, Plane};
use crate::error::BufferError;
use crate::geometry::DisplayGeometry;

/// Mapping from plane to packed bitmap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneBuffer<B> {
    planes: [Option<B>; Plane::COUNT],
}

impl<B> PlaneBuffer<B>
where
    B: AsRef<[u8]>,
{
    /// Build a buffer from the complete plane-to-bitmap mapping
    ///
    /// # Errors
    ///
    /// - `BufferError::LengthMismatch` if a bitmap is not `geometry.buffer_size()` bytes
    /// - `BufferError::DuplicatePlane` if a plane appears twice
    /// - `BufferError::UnsupportedPlane` if the geometry has no such plane
    pub fn new<T>(geometry: &DisplayGeometry, planes: T) -> Result<Self, BufferError>
    where
        T: IntoIterator<Item = (Plane, B)>,
    {
        let expected = geometry.buffer_size();
        let mut slots: [Option<B>; Plane::COUNT] = core::array::from_fn(|_| None);

        for (plane, bitmap) in planes {
            if !geometry.has_plane(plane) {
                return Err(BufferError::UnsupportedPlane(plane));
            }
            let provided = bitmap.as_ref().len();
            if provided != expected {
                return Err(BufferError::LengthMismatch {
                    plane,
                    expected,
                    provided,
                });
            }
            let slot = &mut slots[plane.index()];
            if slot.is_some() {
                return Err(BufferError::DuplicatePlane(plane));
            }
            *slot = Some(bitmap);
        }

        Ok(Self { planes: slots })
    }

    /// Bitmap for a plane, if present
    pub fn get(&self, plane: Plane) -> Option<&[u8]> {
        self.planes[plane.index()].as_ref().map(|bitmap| bitmap.as_ref())
    }

    /// Whether the plane is present
    pub fn contains(&self, plane: Plane) -> bool {
        self.planes[plane.index()].is_some()
    }

    /// Number of planes present
    pub fn len(&self) -> usize {
        self.planes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no planes are present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take back ownership of a plane's storage
    pub fn take(&mut self, plane: Plane) -> Option<B> {
        self.planes[plane.index()].take()
    }
}

impl<B> PlaneBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Mutable bitmap for a plane, if present
    pub fn get_mut(&mut self, plane: Plane) -> Option<&mut [u8]> {
        self.planes[plane.index()].as_mut().map(|bitmap| bitmap.as_mut())
    }

    /// Fill every present plane so the panel shows a single color
    pub fn fill(&mut self, color: Color) {
        for plane in Plane::ALL {
            if let Some(bitmap) = self.get_mut(plane) {
                bitmap.fill(color.plane_byte(plane));
            }
        }
    }
}

#[cfg(feature = "alloc")]
impl PlaneBuffer<alloc::vec::Vec<u8>> {
    /// Heap-allocated buffer with every plane of the geometry blanked
    ///
    /// Black/white planes are all ones (white), red planes all zeros.
    pub fn blank(geometry: &DisplayGeometry) -> Self {
        let mut planes: [Option<alloc::vec::Vec<u8>>; Plane::COUNT] =
            core::array::from_fn(|_| None);
        for plane in geometry.planes() {
            planes[plane.index()] = Some(alloc::vec![plane.blank_byte(); geometry.buffer_size()]);
        }
        Self { planes }
    }

    /// Heap-allocated buffer showing a single color
    pub fn filled(geometry: &DisplayGeometry, color: Color) -> Self {
        let mut buffer = Self::blank(geometry);
        buffer.fill(color);
        buffer
    }
}
