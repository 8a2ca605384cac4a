//! Canvas to panel coordinate mapping
//!
//! Planes are packed row-major in the panel's native orientation: 8 pixels per
//! byte, most significant bit first. Drawing on a rotated canvas means the
//! byte index and bit mask are computed from the native position instead.
//!
//! - **Portrait**: canvas and panel coincide
//! - **Landscape**: canvas is the panel rotated 270 degrees, so canvas X runs
//!   up the panel and canvas Y runs across it
//!
//! ## Example
//!
//! ```
//! use epd2in66b::{rotation::apply_rotation, Orientation};
//!
//! // 8x1 panel, pixel (0,0) is byte 0, MSB
//! let (idx, bit) = apply_rotation(0, 0, 8, 1, Orientation::Portrait);
//! assert_eq!(idx, 0);
//! assert_eq!(bit, 0x80);
//!
//! // Pixel (7,0) is byte 0, LSB
//! let (idx, bit) = apply_rotation(7, 0, 8, 1, Orientation::Portrait);
//! assert_eq!(idx, 0);
//! assert_eq!(bit, 0x01);
//! ```

use crate::geometry::Orientation;

/// Map canvas (x, y) to (byte_index, bit_mask) within one plane
///
/// `width` and `height` are the panel's native dimensions; `width` must be a
/// multiple of 8. Coordinates are in canvas space, so for
/// [`Orientation::Landscape`] `x < height` and `y < width`.
///
/// ```
/// use epd2in66b::{rotation::apply_rotation, Orientation};
///
/// // 16x16 panel in landscape: canvas origin is the panel's bottom-left
/// let (idx, bit) = apply_rotation(0, 0, 16, 16, Orientation::Landscape);
/// assert_eq!(idx, 30);
/// assert_eq!(bit, 0x80);
/// ```
pub fn apply_rotation(
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    orientation: Orientation,
) -> (usize, u8) {
    let bytes_per_row = width / 8;
    match orientation {
        Orientation::Portrait => {
            let index = (x / 8 + bytes_per_row * y) as usize;
            let bit = 0x80 >> (x % 8);
            (index, bit)
        }
        Orientation::Landscape => {
            let index = (y / 8 + (height - 1 - x) * bytes_per_row) as usize;
            let bit = 0x80 >> (y % 8);
            (index, bit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait() {
        let (idx, bit) = apply_rotation(1, 0, 8, 1, Orientation::Portrait);
        assert_eq!(idx, 0);
        assert_eq!(bit, 0x40);

        // (0,1) in an 8x2 panel starts the second row
        let (idx, bit) = apply_rotation(0, 1, 8, 2, Orientation::Portrait);
        assert_eq!(idx, 1);
        assert_eq!(bit, 0x80);
    }

    #[test]
    fn test_portrait_reference_panel_corners() {
        // 152x296: 19 bytes per row, 5624 bytes total
        let (idx, bit) = apply_rotation(151, 295, 152, 296, Orientation::Portrait);
        assert_eq!(idx, 5623);
        assert_eq!(bit, 0x01);

        let (idx, bit) = apply_rotation(8, 1, 152, 296, Orientation::Portrait);
        assert_eq!(idx, 20);
        assert_eq!(bit, 0x80);
    }

    #[test]
    fn test_landscape_corners() {
        // Canvas is 296x152; origin maps to the panel's last row
        let (idx, bit) = apply_rotation(0, 0, 152, 296, Orientation::Landscape);
        assert_eq!(idx, 295 * 19);
        assert_eq!(bit, 0x80);

        // Far canvas corner maps to the panel's first row, last pixel
        let (idx, bit) = apply_rotation(295, 151, 152, 296, Orientation::Landscape);
        assert_eq!(idx, 18);
        assert_eq!(bit, 0x01);
    }

    #[test]
    fn test_landscape_stays_in_bounds() {
        for x in 0..296 {
            for y in [0, 7, 8, 151] {
                let (idx, _) = apply_rotation(x, y, 152, 296, Orientation::Landscape);
                assert!(idx < 5624);
            }
        }
    }
}
