//! Display capability surface shared by panel variants
//!
//! [`EpaperDisplay`] is what an application drives: bring the panel up once,
//! push any number of frames, then put it to sleep or power it off. Each panel
//! family implements it with its own init sequence and wire protocol; see
//! [`Epd2in66b`](crate::Epd2in66b).

use embedded_hal::delay::DelayNs;

use crate::buffer::PlaneBuffer;
use crate::geometry::DisplayGeometry;

/// Session state of a display
///
/// ```text
/// Unpowered -> Powered -> Reset -> Configured -> Idle <-> Busy
///                                                 |
///                                                 v
///                                              Sleeping
/// ```
///
/// `PoweredOff` is reachable from every state and ends the session; only
/// `power_off` is accepted afterwards. A failure part way through an operation
/// leaves the display `Powered`, which requires `initialize` again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Power line has not been driven yet
    #[default]
    Unpowered,
    /// Panel has power but no valid configuration
    Powered,
    /// Controller registers are at their reset defaults
    Reset,
    /// Address window and counters are programmed
    Configured,
    /// Ready to accept a frame
    Idle,
    /// A frame is being transmitted or refreshed
    Busy,
    /// In deep sleep, only a hardware reset wakes it
    Sleeping,
    /// Lines driven low, session ended
    PoweredOff,
}

impl State {
    /// Whether the controller accepts commands in this state
    pub fn is_awake(self) -> bool {
        matches!(
            self,
            Self::Powered | Self::Reset | Self::Configured | Self::Idle | Self::Busy
        )
    }

    /// Whether a frame can be shown in this state
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Configured | Self::Idle)
    }

    /// Whether `initialize` may run in this state
    ///
    /// A configured, awake session must not be initialized again, and a
    /// powered-off session is over.
    pub fn can_initialize(self) -> bool {
        !matches!(
            self,
            Self::Configured | Self::Idle | Self::Busy | Self::PoweredOff
        )
    }
}

/// Operations every e-paper panel variant provides
///
/// All operations block until the bus and pins have completed. Only
/// `busy_wait` suspends, and only until the controller releases BUSY or the
/// interface timeout expires.
pub trait EpaperDisplay {
    /// Single error type for every operation
    type Error;

    /// Geometry of the attached panel
    fn geometry(&self) -> &DisplayGeometry;

    /// Current session state
    fn state(&self) -> State;

    /// Power up, reset and configure the controller
    ///
    /// Runs once per power-on session.
    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Pulse the reset line, then wait for BUSY to clear
    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Send the software reset command, then wait for BUSY to clear
    fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Wait for the controller to release BUSY
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Transmit every plane and refresh the panel
    fn show<B, D>(&mut self, buffer: &PlaneBuffer<B>, delay: &mut D) -> Result<(), Self::Error>
    where
        B: AsRef<[u8]>,
        D: DelayNs;

    /// Show a blank frame
    fn clear_display<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Enter deep sleep
    fn sleep(&mut self) -> Result<(), Self::Error>;

    /// Drive power, DC and reset low
    ///
    /// Idempotent and valid from any state. Ends the session: `initialize` is
    /// rejected afterwards.
    fn power_off(&mut self) -> Result<(), Self::Error>;

    /// Send one command byte
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send data bytes following a command
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}
