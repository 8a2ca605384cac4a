//! Panel geometry and orientation

use crate::color::Plane;
pub use crate::error::{GeometryError, MAX_HEIGHT, MAX_WIDTH};

/// Geometry of the Waveshare 2.66inch e-Paper Module (B)
pub const EPD_2IN66B: DisplayGeometry = DisplayGeometry {
    name: "2.66inch Module (B)",
    width: 152,
    height: 296,
    planes: &[Plane::BlackWhite, Plane::RedWhite],
};

/// Immutable description of a panel
///
/// Width corresponds to source outputs and height to gate outputs. Planes are
/// listed in the order frames are transmitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayGeometry {
    name: &'static str,
    width: u16,
    height: u16,
    planes: &'static [Plane],
}

impl DisplayGeometry {
    /// Create a geometry with validation
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDimensions` if:
    /// - width or height is zero
    /// - width > MAX_WIDTH or height > MAX_HEIGHT
    /// - width % 8 != 0 (rows must be byte-aligned)
    ///
    /// Returns `GeometryError::NoPlanes` or `GeometryError::DuplicatePlane`
    /// when the plane list is empty or repeats a plane.
    pub fn new(
        name: &'static str,
        width: u16,
        height: u16,
        planes: &'static [Plane],
    ) -> Result<Self, GeometryError> {
        if width == 0 || width > MAX_WIDTH || width % 8 != 0 {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        if height == 0 || height > MAX_HEIGHT {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        if planes.is_empty() {
            return Err(GeometryError::NoPlanes);
        }
        for (i, plane) in planes.iter().enumerate() {
            if planes[..i].contains(plane) {
                return Err(GeometryError::DuplicatePlane(*plane));
            }
        }
        Ok(Self {
            name,
            width,
            height,
            planes,
        })
    }

    /// Human-readable panel name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Planes in transmission order
    pub fn planes(&self) -> &'static [Plane] {
        self.planes
    }

    /// Whether the panel has the given plane
    pub fn has_plane(&self, plane: Plane) -> bool {
        self.planes.contains(&plane)
    }

    /// Bytes per packed row
    pub fn bytes_per_row(&self) -> usize {
        self.width as usize / 8
    }

    /// Bytes in one packed plane
    pub fn buffer_size(&self) -> usize {
        self.bytes_per_row() * self.height as usize
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        EPD_2IN66B
    }
}

/// How the caller's canvas maps onto the panel
///
/// ```text
///  Portrait (0°)          Landscape (270°)
///
///    || wires ||          +---------------+
///  +-----------+          | ↓→            | ====
///  | ↓→        |          |               | wires
///  |           |          |               | ====
///  |           |          +---------------+
///  +-----------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Native orientation, connector on the short top edge
    #[default]
    Portrait,
    /// Rotated 270 degrees, connector on the right
    Landscape,
}

impl Orientation {
    /// Rotation relative to the native orientation, in degrees
    pub fn rotation_degrees(self) -> u16 {
        match self {
            Self::Portrait => 0,
            Self::Landscape => 270,
        }
    }

    /// Width of the drawable canvas in pixels
    pub fn canvas_width(self, geometry: &DisplayGeometry) -> u16 {
        match self {
            Self::Portrait => geometry.width(),
            Self::Landscape => geometry.height(),
        }
    }

    /// Height of the drawable canvas in pixels
    pub fn canvas_height(self, geometry: &DisplayGeometry) -> u16 {
        match self {
            Self::Portrait => geometry.height(),
            Self::Landscape => geometry.width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_panel_buffer_size() {
        assert_eq!(EPD_2IN66B.bytes_per_row(), 19);
        assert_eq!(EPD_2IN66B.buffer_size(), 5624);
        assert_eq!(EPD_2IN66B.planes(), &[Plane::BlackWhite, Plane::RedWhite]);
    }

    #[test]
    fn test_reference_panel_passes_validation() {
        let geometry = DisplayGeometry::new(
            EPD_2IN66B.name(),
            EPD_2IN66B.width(),
            EPD_2IN66B.height(),
            EPD_2IN66B.planes(),
        );
        assert_eq!(geometry, Ok(EPD_2IN66B));
    }

    #[test]
    fn test_width_must_be_byte_aligned() {
        let result = DisplayGeometry::new("test", 150, 296, &[Plane::BlackWhite]);
        assert_eq!(
            result,
            Err(GeometryError::InvalidDimensions {
                width: 150,
                height: 296
            })
        );
    }

    #[test]
    fn test_limits() {
        assert!(DisplayGeometry::new("test", 0, 8, &[Plane::BlackWhite]).is_err());
        assert!(DisplayGeometry::new("test", 8, 0, &[Plane::BlackWhite]).is_err());
        assert!(DisplayGeometry::new("test", 264, 8, &[Plane::BlackWhite]).is_err());
        assert!(DisplayGeometry::new("test", 8, 513, &[Plane::BlackWhite]).is_err());
        assert!(DisplayGeometry::new("test", 256, 512, &[Plane::BlackWhite]).is_ok());
    }

    #[test]
    fn test_planes_validated() {
        assert_eq!(
            DisplayGeometry::new("test", 8, 8, &[]),
            Err(GeometryError::NoPlanes)
        );
        assert_eq!(
            DisplayGeometry::new("test", 8, 8, &[Plane::RedWhite, Plane::RedWhite]),
            Err(GeometryError::DuplicatePlane(Plane::RedWhite))
        );
    }

    #[test]
    fn test_orientation_canvas() {
        assert_eq!(Orientation::Portrait.canvas_width(&EPD_2IN66B), 152);
        assert_eq!(Orientation::Portrait.canvas_height(&EPD_2IN66B), 296);
        assert_eq!(Orientation::Landscape.canvas_width(&EPD_2IN66B), 296);
        assert_eq!(Orientation::Landscape.canvas_height(&EPD_2IN66B), 152);
        assert_eq!(Orientation::Landscape.rotation_degrees(), 270);
    }
}
