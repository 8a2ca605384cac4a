//! Driver for the Waveshare 2.66inch e-Paper Module (B)
//!
//! 152x296 pixels, black/white plane plus red plane. The controller is brought
//! up with a hardware reset, a software reset, and a small register program
//! that opens the full RAM window:
//!
//! | Command | Data                                   |
//! |---------|----------------------------------------|
//! | 0x11    | 0x03                                   |
//! | 0x44    | 0x00, (width-1) >> 3                   |
//! | 0x45    | 0x00, 0x00, (height-1) & 0xFF, (height-1) >> 8 |
//! | 0x21    | 0x00, 0x80                             |
//! | 0x4E    | 0x00                                   |
//! | 0x4F    | 0x00, 0x00                             |
//!
//! A frame is each plane's RAM write command followed by its packed bitmap,
//! then master activation and a wait for BUSY to clear.
//!
//! ## Example
//!
//! ```rust,no_run
//! use epd2in66b::{Config, EpaperDisplay, Epd2in66b, Interface, PlaneBuffer, Plane};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut delay = MockDelay;
//! let interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//! let mut display = Epd2in66b::new(interface, Config::default());
//!
//! if display.initialize(&mut delay).is_err() {
//!     return;
//! }
//!
//! let black = [0xFFu8; 5624];
//! let red = [0x00u8; 5624];
//! if let Ok(frame) = PlaneBuffer::new(
//!     display.geometry(),
//!     [(Plane::BlackWhite, &black[..]), (Plane::RedWhite, &red[..])],
//! ) {
//!     let _ = display.show(&frame, &mut delay);
//! }
//!
//! let _ = display.sleep();
//! let _ = display.power_off();
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, info, trace};

use crate::buffer::PlaneBuffer;
use crate::color::Plane;
use crate::command::{
    DATA_ENTRY_INCREMENT_XY, Opcode, RAM_X_END_MASK, RAM_Y_HIGH_MASK,
    UPDATE_CONTROL_RAM_NORMAL, UPDATE_CONTROL_SOURCE_S8_S167,
};
use crate::config::Config;
use crate::display::{EpaperDisplay, State};
use crate::error::Error;
use crate::geometry::DisplayGeometry;
#[cfg(feature = "graphics")]
use crate::{error::BufferError, graphics::GraphicBuffer};
use crate::interface::DisplayInterface;
use crate::timing::Stopwatch;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Bytes per SPI write when streaming a solid fill
const FILL_CHUNK: usize = 64;

/// Driver for the 2.66inch (B) panel
///
/// Owns the interface for the whole session. Not meant to be shared across
/// threads without external locking, since command/data ordering matters.
pub struct Epd2in66b<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Session state
    state: State,
}

impl<I> Epd2in66b<I>
where
    I: DisplayInterface,
{
    /// Create a new driver; nothing is sent until [`initialize`](EpaperDisplay::initialize)
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: State::Unpowered,
        }
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the interface, ending the session
    ///
    /// Call [`power_off`](EpaperDisplay::power_off) first to leave the lines low.
    pub fn release(self) -> I {
        self.interface
    }

    /// Drawing canvas over `planes` in the configured geometry and orientation
    ///
    /// # Errors
    ///
    /// Returns `BufferError::LengthMismatch` if a plane was sized for another
    /// geometry.
    #[cfg(feature = "graphics")]
    pub fn graphic_buffer<B>(
        &self,
        planes: PlaneBuffer<B>,
    ) -> Result<GraphicBuffer<B>, BufferError>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        GraphicBuffer::new(&self.config.geometry, self.config.orientation, planes)
    }

    /// RAM window end addresses in controller units
    ///
    /// Returns `(x_end, y_end_low, y_end_high)`: X in bytes, Y as a 9-bit line number.
    pub fn window_end(geometry: &DisplayGeometry) -> (u8, u8, u8) {
        let x_end = (geometry.width() - 1) >> 3;
        let y_end = geometry.height() - 1;
        (
            (x_end & RAM_X_END_MASK) as u8,
            (y_end & 0xFF) as u8,
            ((y_end >> 8) & RAM_Y_HIGH_MASK) as u8,
        )
    }

    fn invalid_state(&self, operation: &'static str) -> Error<I> {
        Error::InvalidState {
            operation,
            state: self.state,
        }
    }

    fn command(&mut self, opcode: Opcode) -> DisplayResult<I> {
        trace!("Send command {}", opcode);
        self.interface
            .send_command(opcode.code())
            .map_err(Error::Interface)
    }

    fn data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    fn wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!("Waiting for busy line");
        let stopwatch = Stopwatch::start();
        self.interface.busy_wait(delay).map_err(Error::Interface)?;
        debug!("Busy line released, took {}", stopwatch.took());
        Ok(())
    }

    fn pulse_reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let stopwatch = Stopwatch::start();
        self.interface
            .hard_reset(delay)
            .map_err(Error::Interface)?;
        self.wait(delay)?;
        debug!("Hard reset finished, took {}", stopwatch.took());
        Ok(())
    }

    fn reset_registers<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let stopwatch = Stopwatch::start();
        self.command(Opcode::SoftReset)?;
        self.wait(delay)?;
        debug!("Soft reset finished, took {}", stopwatch.took());
        Ok(())
    }

    /// Everything in `initialize` after the power line is up
    fn configure<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!("Hardware and software reset");
        self.pulse_reset(delay)?;
        self.reset_registers(delay)?;
        self.state = State::Reset;

        debug!("Set increment mode for X and Y");
        self.command(Opcode::DataEntryMode)?;
        self.data(&[DATA_ENTRY_INCREMENT_XY])?;

        let geometry = self.config.geometry;
        let (x_end, y_end_low, y_end_high) = Self::window_end(&geometry);
        debug!(
            "Set RAM window to {}x{}",
            geometry.width(),
            geometry.height()
        );
        self.command(Opcode::SetRamXRange)?;
        self.data(&[0x00, x_end])?;
        self.command(Opcode::SetRamYRange)?;
        self.data(&[0x00, 0x00, y_end_low, y_end_high])?;

        debug!("Set RAM content options");
        self.command(Opcode::DisplayUpdateControl)?;
        self.data(&[UPDATE_CONTROL_RAM_NORMAL, UPDATE_CONTROL_SOURCE_S8_S167])?;

        debug!("Reset X and Y address counters");
        self.command(Opcode::SetRamXCounter)?;
        self.data(&[0x00])?;
        self.command(Opcode::SetRamYCounter)?;
        self.data(&[0x00, 0x00])?;
        self.state = State::Configured;

        self.wait(delay)
    }

    /// Reject a frame before anything goes on the wire
    fn check_frame<B: AsRef<[u8]>>(&self, buffer: &PlaneBuffer<B>) -> DisplayResult<I> {
        let expected = self.config.geometry.buffer_size();
        for &plane in self.config.geometry.planes() {
            let bitmap = buffer.get(plane).ok_or(Error::MissingPlane(plane))?;
            if bitmap.len() != expected {
                return Err(Error::BufferLength {
                    plane,
                    expected,
                    provided: bitmap.len(),
                });
            }
        }
        Ok(())
    }

    /// Idle -> Busy -> Idle around one frame, Powered if anything fails
    fn run_frame<D, F>(&mut self, delay: &mut D, mut write_plane: F) -> DisplayResult<I>
    where
        D: DelayNs,
        F: FnMut(&mut Self, Plane) -> DisplayResult<I>,
    {
        self.state = State::Busy;
        let result = self.transmit_frame(delay, &mut write_plane);
        self.state = if result.is_ok() {
            State::Idle
        } else {
            State::Powered
        };
        result
    }

    fn transmit_frame<D, F>(&mut self, delay: &mut D, write_plane: &mut F) -> DisplayResult<I>
    where
        D: DelayNs,
        F: FnMut(&mut Self, Plane) -> DisplayResult<I>,
    {
        for &plane in self.config.geometry.planes() {
            self.command(Opcode::select_plane(plane))?;
            write_plane(self, plane)?;
        }
        self.command(Opcode::MasterActivation)?;
        self.wait(delay)
    }

    fn write_fill(&mut self, value: u8, len: usize) -> DisplayResult<I> {
        let chunk = [value; FILL_CHUNK];
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(FILL_CHUNK);
            self.data(&chunk[..n])?;
            remaining -= n;
        }
        Ok(())
    }
}

impl<I> EpaperDisplay for Epd2in66b<I>
where
    I: DisplayInterface,
{
    type Error = Error<I>;

    fn geometry(&self) -> &DisplayGeometry {
        &self.config.geometry
    }

    fn state(&self) -> State {
        self.state
    }

    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if !self.state.can_initialize() {
            return Err(self.invalid_state("initialize"));
        }
        info!("Initializing display - {}...", self.config.geometry.name());
        let stopwatch = Stopwatch::start();

        debug!("Set power on");
        self.interface.power_on().map_err(Error::Interface)?;
        self.state = State::Powered;

        if let Err(e) = self.configure(delay) {
            self.state = State::Powered;
            return Err(e);
        }
        self.state = State::Idle;
        info!("Initialization finished, took {}", stopwatch.took());
        Ok(())
    }

    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if !self.state.is_awake() && self.state != State::Sleeping {
            return Err(self.invalid_state("hard reset"));
        }
        if let Err(e) = self.pulse_reset(delay) {
            self.state = State::Powered;
            return Err(e);
        }
        self.state = State::Reset;
        Ok(())
    }

    fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if !self.state.is_awake() {
            return Err(self.invalid_state("soft reset"));
        }
        if let Err(e) = self.reset_registers(delay) {
            self.state = State::Powered;
            return Err(e);
        }
        self.state = State::Reset;
        Ok(())
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.wait(delay)
    }

    fn show<B, D>(&mut self, buffer: &PlaneBuffer<B>, delay: &mut D) -> DisplayResult<I>
    where
        B: AsRef<[u8]>,
        D: DelayNs,
    {
        if !self.state.is_ready() {
            return Err(self.invalid_state("show"));
        }
        self.check_frame(buffer)?;

        info!("Showing image");
        let stopwatch = Stopwatch::start();
        self.run_frame(delay, |display, plane| match buffer.get(plane) {
            Some(bitmap) => display.data(bitmap),
            None => Err(Error::MissingPlane(plane)),
        })?;
        info!("Show finished, took {}", stopwatch.took());
        Ok(())
    }

    fn clear_display<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if !self.state.is_ready() {
            return Err(self.invalid_state("clear"));
        }

        info!("Clearing display");
        let stopwatch = Stopwatch::start();
        let len = self.config.geometry.buffer_size();
        self.run_frame(delay, |display, plane| {
            display.write_fill(plane.blank_byte(), len)
        })?;
        info!("Clear finished, took {}", stopwatch.took());
        Ok(())
    }

    fn sleep(&mut self) -> DisplayResult<I> {
        if !self.state.is_awake() {
            return Err(self.invalid_state("sleep"));
        }
        info!("Going to deep sleep mode...");
        let mode = self.config.deep_sleep_mode as u8;
        let result = self
            .command(Opcode::DeepSleep)
            .and_then(|()| self.data(&[mode]));
        self.state = if result.is_ok() {
            State::Sleeping
        } else {
            State::Powered
        };
        result
    }

    fn power_off(&mut self) -> DisplayResult<I> {
        info!("Powering off");
        self.interface.power_off().map_err(Error::Interface)?;
        self.state = State::PoweredOff;
        Ok(())
    }

    fn send_command(&mut self, command: u8) -> DisplayResult<I> {
        if !self.state.is_awake() {
            return Err(self.invalid_state("send command"));
        }
        trace!("Send command {}", crate::command::CommandName(command));
        self.interface
            .send_command(command)
            .map_err(Error::Interface)
    }

    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        if !self.state.is_awake() {
            return Err(self.invalid_state("send data"));
        }
        self.data(data)
    }
}
