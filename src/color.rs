//! Color and plane model for black/white/red e-paper
//!
//! The controller keeps two independent 1-bit planes in RAM. A pixel's visible
//! color is the combination of its bit in each plane:
//!
//! | Color | Black/white plane | Red plane |
//! |-------|-------------------|-----------|
//! | Black | 0                 | 0         |
//! | White | 1                 | 0         |
//! | Red   | 1                 | 1         |
//!
//! ## Example
//!
//! ```
//! use epd2in66b::{Color, Plane};
//!
//! assert_eq!(Color::White.plane_byte(Plane::BlackWhite), 0xFF);
//! assert_eq!(Color::White.plane_byte(Plane::RedWhite), 0x00);
//!
//! // Blank bytes clear a plane to its background
//! assert_eq!(Plane::BlackWhite.blank_byte(), 0xFF);
//! assert_eq!(Plane::RedWhite.blank_byte(), 0x00);
//! ```

/// Colors the panel can show
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black pixels
    Black,
    /// White pixels
    White,
    /// Red pixels
    Red,
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU8;
}

impl Color {
    /// 24-bit RGB value of the color
    pub fn rgb(self) -> u32 {
        match self {
            Self::Black => 0x00_0000,
            Self::White => 0xFF_FFFF,
            Self::Red => 0xFF_0000,
        }
    }

    /// Bit value this color needs in the given plane
    pub fn plane_bit(self, plane: Plane) -> bool {
        match (plane, self) {
            (Plane::BlackWhite, Self::Black) => false,
            (Plane::BlackWhite, Self::White | Self::Red) => true,
            (Plane::RedWhite, Self::Red) => true,
            (Plane::RedWhite, Self::Black | Self::White) => false,
        }
    }

    /// Byte that paints 8 pixels of this color in the given plane
    pub fn plane_byte(self, plane: Plane) -> u8 {
        if self.plane_bit(plane) { 0xFF } else { 0x00 }
    }
}

/// Independently addressable color layer in controller RAM
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Plane {
    /// Primary plane: 0 = black, 1 = white
    BlackWhite,
    /// Accent plane: 1 = red, 0 = defer to the black/white plane
    RedWhite,
}

impl Plane {
    /// Number of planes the controller knows about
    pub const COUNT: usize = 2;

    /// Both planes in transmission order
    pub const ALL: [Plane; Plane::COUNT] = [Plane::BlackWhite, Plane::RedWhite];

    /// Color drawn when a pixel is active in this plane
    pub fn draw_color(self) -> Color {
        match self {
            Self::BlackWhite => Color::Black,
            Self::RedWhite => Color::Red,
        }
    }

    /// Color shown where this plane is inactive
    pub fn background_color(self) -> Color {
        Color::White
    }

    /// Colors this plane can contribute
    pub fn available_colors(self) -> [Color; 2] {
        [self.draw_color(), self.background_color()]
    }

    /// Fill byte that leaves the plane blank
    ///
    /// White for the black/white plane, inactive for the red plane.
    pub fn blank_byte(self) -> u8 {
        self.background_color().plane_byte(self)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::BlackWhite => 0,
            Self::RedWhite => 1,
        }
    }
}

impl core::fmt::Display for Plane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BlackWhite => write!(f, "black/white"),
            Self::RedWhite => write!(f, "red/white"),
        }
    }
}
