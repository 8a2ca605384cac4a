//! Waveshare 2.66inch e-Paper Module (B) Driver
//!
//! A driver for the 152x296 black/white/red e-paper panel, built on
//! `embedded-hal` v1.0 and usable from `no_std`.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support (SPI device, DC/RST/PWR outputs, BUSY input)
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Session state machine that rejects out-of-order operations
//! - Bounded busy wait with configurable timeout and polarity
//! - Portrait and landscape canvases
//! - Capability trait shared by panel variants
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use epd2in66b::{
//!     Builder, Color, DeepSleepMode, EpaperDisplay, Epd2in66b, Interface, Orientation, Plane,
//!     PlaneBuffer,
//! };
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let pwr = MockPin;
//! # let mut delay = MockDelay;
//! let mut interface = Interface::new(spi, dc, rst, busy, pwr);
//! interface.set_busy_timeout(10_000);
//!
//! let config = Builder::new()
//!     .orientation(Orientation::Landscape)
//!     .deep_sleep_mode(DeepSleepMode::Mode1)
//!     .build();
//!
//! let mut display = Epd2in66b::new(interface, config);
//! if display.initialize(&mut delay).is_err() {
//!     return;
//! }
//! let _ = display.clear_display(&mut delay);
//!
//! // Draw on a 296x152 landscape canvas, then send the native planes
//! let planes = match PlaneBuffer::new(
//!     display.geometry(),
//!     [(Plane::BlackWhite, [0xFFu8; 5624]), (Plane::RedWhite, [0x00u8; 5624])],
//! ) {
//!     Ok(planes) => planes,
//!     Err(_) => return,
//! };
//! if let Ok(mut canvas) = display.graphic_buffer(planes) {
//!     let _ = Rectangle::new(Point::new(10, 10), Size::new(100, 40))
//!         .into_styled(PrimitiveStyle::with_fill(Color::Red))
//!         .draw(&mut canvas);
//!     let _ = display.show(canvas.planes(), &mut delay);
//! }
//!
//! let _ = display.sleep();
//! let _ = display.power_off();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Packed pixel planes
pub mod buffer;
/// Color types for tri-color e-paper displays
pub mod color;
/// Controller command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Capability trait and session state
pub mod display;
/// 2.66inch (B) panel driver
pub mod epd2in66b;
/// Error types for the driver
pub mod error;
/// Panel geometry and orientation
pub mod geometry;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate rotation utilities
pub mod rotation;
/// Elapsed-time formatting for logs
pub mod timing;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use buffer::PlaneBuffer;
pub use color::{Color, Plane};
pub use command::{CommandName, Opcode};
pub use config::{Builder, Config, DeepSleepMode};
pub use display::{EpaperDisplay, State};
pub use epd2in66b::Epd2in66b;
pub use error::{BufferError, Error, GeometryError, MAX_HEIGHT, MAX_WIDTH};
pub use geometry::{DisplayGeometry, EPD_2IN66B, Orientation};
pub use interface::InterfaceError;
pub use interface::{
    DEFAULT_BUSY_POLL_INTERVAL_NS, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_RESET_HOLD_NS,
    DisplayInterface, Interface,
};

#[cfg(feature = "graphics")]
pub use graphics::GraphicBuffer;
