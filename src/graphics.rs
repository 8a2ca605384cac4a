//! Graphics support via embedded-graphics
//!
//! [`GraphicBuffer`] owns a [`PlaneBuffer`] and implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait, so
//! primitives, text and images from the embedded-graphics ecosystem can be
//! drawn straight into the packed planes. Pixels are mapped through the
//! configured [`Orientation`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use epd2in66b::{Color, GraphicBuffer, Orientation, Plane, PlaneBuffer, EPD_2IN66B};
//!
//! let planes = match PlaneBuffer::new(
//!     &EPD_2IN66B,
//!     [(Plane::BlackWhite, [0xFFu8; 5624]), (Plane::RedWhite, [0x00u8; 5624])],
//! ) {
//!     Ok(planes) => planes,
//!     Err(_) => return,
//! };
//! let mut canvas = match GraphicBuffer::new(&EPD_2IN66B, Orientation::Landscape, planes) {
//!     Ok(canvas) => canvas,
//!     Err(_) => return,
//! };
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::Red))
//!     .draw(&mut canvas);
//!
//! let _ = Text::new(
//!     "Hello, E-Paper!",
//!     Point::new(10, 100),
//!     MonoTextStyle::new(&FONT_6X10, Color::Black),
//! )
//! .draw(&mut canvas);
//!
//! // Hand `canvas.planes()` to `EpaperDisplay::show`
//! let frame = canvas.planes();
//! # let _ = frame;
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
};

use crate::buffer::PlaneBuffer;
use crate::color::{Color, Plane};
use crate::error::BufferError;
use crate::geometry::{DisplayGeometry, Orientation};
use crate::rotation::apply_rotation;

/// Drawable canvas over packed plane bitmaps
///
/// Planes absent from the buffer are skipped when drawing, so a black/white
/// only buffer renders red as white.
pub struct GraphicBuffer<B> {
    planes: PlaneBuffer<B>,
    geometry: DisplayGeometry,
    orientation: Orientation,
}

impl<B> GraphicBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap plane storage for drawing
    ///
    /// # Errors
    ///
    /// Returns `BufferError::LengthMismatch` if a present plane was sized for
    /// a different geometry.
    pub fn new(
        geometry: &DisplayGeometry,
        orientation: Orientation,
        planes: PlaneBuffer<B>,
    ) -> Result<Self, BufferError> {
        let expected = geometry.buffer_size();
        for plane in Plane::ALL {
            if let Some(bitmap) = planes.get(plane) {
                if bitmap.len() != expected {
                    return Err(BufferError::LengthMismatch {
                        plane,
                        expected,
                        provided: bitmap.len(),
                    });
                }
            }
        }
        Ok(Self {
            planes,
            geometry: *geometry,
            orientation,
        })
    }

    /// Frame ready for [`EpaperDisplay::show`](crate::EpaperDisplay::show)
    pub fn planes(&self) -> &PlaneBuffer<B> {
        &self.planes
    }

    /// Give back the plane storage
    pub fn into_planes(self) -> PlaneBuffer<B> {
        self.planes
    }

    /// Canvas orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Fill the whole canvas with one color
    pub fn fill(&mut self, color: Color) {
        self.planes.fill(color);
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let width = self.geometry.width() as u32;
        let height = self.geometry.height() as u32;
        let (index, bit) = apply_rotation(x, y, width, height, self.orientation);

        for plane in Plane::ALL {
            let Some(bitmap) = self.planes.get_mut(plane) else {
                continue;
            };
            let Some(byte) = bitmap.get_mut(index) else {
                continue;
            };
            if color.plane_bit(plane) {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
    }
}

#[cfg(feature = "alloc")]
impl GraphicBuffer<alloc::vec::Vec<u8>> {
    /// Heap-allocated blank canvas with every plane of the geometry
    pub fn blank(geometry: &DisplayGeometry, orientation: Orientation) -> Self {
        Self {
            planes: PlaneBuffer::blank(geometry),
            geometry: *geometry,
            orientation,
        }
    }
}

impl<B> DrawTarget for GraphicBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            let x = x as u32;
            let y = y as u32;
            if x >= sz.width || y >= sz.height {
                continue;
            }
            self.set_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl<B> OriginDimensions for GraphicBuffer<B> {
    fn size(&self) -> Size {
        Size::new(
            self.orientation.canvas_width(&self.geometry) as u32,
            self.orientation.canvas_height(&self.geometry) as u32,
        )
    }
}
