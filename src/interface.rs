//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to the controller over SPI.
//!
//! ## Hardware Requirements
//!
//! - SPI bus (MOSI + SCK, CS handled by the [`SpiDevice`])
//! - 4 GPIO pins:
//!   - **DC**: Data/Command select (output, low = command, high = data)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, active high)
//!   - **PWR**: Panel power enable (output, active high)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use epd2in66b::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin, MockPin);
//!
//! let _ = interface.power_on();
//! let _ = interface.hard_reset(&mut delay);
//! let _ = interface.send_command(0x12); // Soft reset
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the hardware interface to the controller
///
/// Abstracts over SPI + GPIO so the display driver can be tested without
/// hardware. For most cases, use the provided [`Interface`] struct.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send one command byte
    ///
    /// Sets DC low, then transfers exactly one byte.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes
    ///
    /// Sets DC high, then transfers the bytes.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Drive the power enable line high
    fn power_on(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Drive power, DC and RST low
    ///
    /// Must be safe to call repeatedly.
    fn power_off(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line
    ///
    /// RST low, hold, RST high, hold. Each hold must be at least 200ns.
    /// Waiting for BUSY afterwards is up to the caller.
    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Wait until the busy line reports idle
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] if BUSY stays asserted for longer
    /// than the implementation-specific timeout.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Bus, pin or busy-timeout failure
///
/// Carries the HAL's own SPI and GPIO error values unchanged.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI transfer failed
    Spi(SpiErr),
    /// Reading or driving a pin failed
    Pin(PinErr),
    /// BUSY stayed asserted past the configured timeout
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI transfer failed: {e:?}"),
            Self::Pin(e) => write!(f, "GPIO failed: {e:?}"),
            Self::Timeout => write!(f, "Busy line did not clear before the timeout"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Default timeout for busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;

/// Default interval between busy pin reads in nanoseconds
pub const DEFAULT_BUSY_POLL_INTERVAL_NS: u32 = 1_000;

/// Default hold time on each reset edge in nanoseconds
pub const DEFAULT_RESET_HOLD_NS: u32 = 1_000_000;

/// Shortest reset hold the controller accepts in nanoseconds
pub const MIN_RESET_HOLD_NS: u32 = 200;

/// Hardware interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
/// * `PWR` - Power enable pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST, BUSY, PWR> {
    spi: SPI,
    /// Low for command bytes, high for data bytes
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    busy: BUSY,
    /// Power enable pin
    pwr: PWR,
    /// Timeout for busy-wait in milliseconds, 0 disables it
    busy_timeout_ms: u32,
    /// Delay between busy pin reads in nanoseconds
    busy_poll_interval_ns: u32,
    /// Level the busy line reads while the controller is busy
    busy_active_high: bool,
    /// Hold time on each reset edge in nanoseconds
    reset_hold_ns: u32,
}

impl<SPI, DC, RST, BUSY, PWR> Interface<SPI, DC, RST, BUSY, PWR>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    PWR: OutputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input, active high)
    /// * `pwr` - Power enable pin (output, active high)
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY, pwr: PWR) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            pwr,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_poll_interval_ns: DEFAULT_BUSY_POLL_INTERVAL_NS,
            busy_active_high: true,
            reset_hold_ns: DEFAULT_RESET_HOLD_NS,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to disable timeout.
    ///
    /// Only time spent in [`DelayNs::delay_ns`] between busy reads is counted,
    /// so this is a lower bound on the real wait. Where a pin read costs much
    /// more than the poll interval (a Linux GPIO character device read takes
    /// tens of microseconds against the 1µs default), wall-clock time can be
    /// many times longer; raise the poll interval or lower the timeout there.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set the delay between busy pin reads in nanoseconds
    ///
    /// Default is 1µs. Values below 1ns are raised to 1ns so the timeout stays
    /// meaningful. Pick an interval close to the cost of one busy read to keep
    /// the [timeout](Self::set_busy_timeout) near wall-clock time.
    pub fn set_busy_poll_interval(&mut self, interval_ns: u32) -> &mut Self {
        self.busy_poll_interval_ns = interval_ns.max(1);
        self
    }

    /// Get the delay between busy pin reads in nanoseconds
    pub fn busy_poll_interval(&self) -> u32 {
        self.busy_poll_interval_ns
    }

    /// Set busy pin polarity
    ///
    /// Default is active-high. Set to false for active-low panels.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Set the hold time on each reset edge in nanoseconds
    ///
    /// Default is 1ms. Values below 200ns are raised to 200ns.
    pub fn set_reset_hold(&mut self, hold_ns: u32) -> &mut Self {
        self.reset_hold_ns = hold_ns.max(MIN_RESET_HOLD_NS);
        self
    }

    /// Get the hold time on each reset edge in nanoseconds
    pub fn reset_hold(&self) -> u32 {
        self.reset_hold_ns
    }

    /// Release the SPI device and pins
    ///
    /// Call [`DisplayInterface::power_off`] first to leave the lines low.
    pub fn release(self) -> (SPI, DC, RST, BUSY, PWR) {
        (self.spi, self.dc, self.rst, self.busy, self.pwr)
    }
}

impl<SPI, DC, RST, BUSY, PWR, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY, PWR>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PWR: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn power_on(&mut self) -> InterfaceResult<(), Self::Error> {
        self.pwr.set_high().map_err(InterfaceError::Pin)
    }

    fn power_off(&mut self) -> InterfaceResult<(), Self::Error> {
        self.pwr.set_low().map_err(InterfaceError::Pin)?;
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ns(self.reset_hold_ns);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ns(self.reset_hold_ns);
        Ok(())
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        // Only the time spent in `delay` is counted, so the real timeout is never shorter.
        let timeout_ns = u64::from(self.busy_timeout_ms) * 1_000_000;
        let mut waited_ns = 0u64;

        loop {
            let is_busy = if self.busy_active_high {
                self.busy.is_high()
            } else {
                self.busy.is_low()
            };

            if !is_busy.map_err(InterfaceError::Pin)? {
                return Ok(());
            }

            if timeout_ns > 0 && waited_ns >= timeout_ns {
                return Err(InterfaceError::Timeout);
            }

            delay.delay_ns(self.busy_poll_interval_ns);
            waited_ns += u64::from(self.busy_poll_interval_ns);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::{ErrorType as SpiErrorType, Operation};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        High(&'static str),
        Low(&'static str),
        Spi(Vec<u8>),
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    #[derive(Debug)]
    struct MockSpi {
        log: Log,
    }

    impl SpiErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), MockError> {
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    self.log.borrow_mut().push(Event::Spi(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    /// Output pins log every edge; as an input the pin reports busy for
    /// `busy_reads` reads, then idle.
    #[derive(Debug)]
    struct MockPin {
        name: &'static str,
        log: Log,
        busy_reads: u32,
        fail: bool,
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::Low(self.name));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::High(self.name));
            Ok(())
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, MockError> {
            if self.busy_reads > 0 {
                self.busy_reads -= 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }

        fn is_low(&mut self) -> Result<bool, MockError> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns));
        }
    }

    type TestInterface = Interface<MockSpi, MockPin, MockPin, MockPin, MockPin>;

    fn pin(name: &'static str, log: &Log) -> MockPin {
        MockPin {
            name,
            log: log.clone(),
            busy_reads: 0,
            fail: false,
        }
    }

    fn test_interface(busy_reads: u32) -> (TestInterface, MockDelay, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut busy = pin("busy", &log);
        busy.busy_reads = busy_reads;
        let interface = Interface::new(
            MockSpi { log: log.clone() },
            pin("dc", &log),
            pin("rst", &log),
            busy,
            pin("pwr", &log),
        );
        let delay = MockDelay { log: log.clone() };
        (interface, delay, log)
    }

    #[test]
    fn test_default_settings() {
        let (interface, _, _) = test_interface(0);
        assert_eq!(interface.busy_timeout(), DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(interface.busy_poll_interval(), DEFAULT_BUSY_POLL_INTERVAL_NS);
        assert_eq!(interface.reset_hold(), DEFAULT_RESET_HOLD_NS);
        assert!(interface.busy_active_high());
    }

    #[test]
    fn test_setters_clamp_to_minimums() {
        let (mut interface, _, _) = test_interface(0);
        interface.set_busy_timeout(5_000).set_busy_poll_interval(0).set_reset_hold(10);
        assert_eq!(interface.busy_timeout(), 5_000);
        assert_eq!(interface.busy_poll_interval(), 1);
        assert_eq!(interface.reset_hold(), MIN_RESET_HOLD_NS);
    }

    #[test]
    fn test_command_is_one_byte_with_dc_low() {
        let (mut interface, _, log) = test_interface(0);
        interface.send_command(0x12).unwrap();
        assert_eq!(
            *log.borrow(),
            [Event::Low("dc"), Event::Spi(alloc::vec![0x12])]
        );
    }

    #[test]
    fn test_data_is_sent_with_dc_high() {
        let (mut interface, _, log) = test_interface(0);
        interface.send_data(&[0x00, 0x80]).unwrap();
        assert_eq!(
            *log.borrow(),
            [Event::High("dc"), Event::Spi(alloc::vec![0x00, 0x80])]
        );
    }

    #[test]
    fn test_hard_reset_pulses_low_then_high() {
        let (mut interface, mut delay, log) = test_interface(0);
        interface.hard_reset(&mut delay).unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::Low("rst"),
                Event::Delay(DEFAULT_RESET_HOLD_NS),
                Event::High("rst"),
                Event::Delay(DEFAULT_RESET_HOLD_NS),
            ]
        );
    }

    #[test]
    fn test_busy_wait_polls_finely_until_idle() {
        let (mut interface, mut delay, log) = test_interface(3);
        interface.busy_wait(&mut delay).unwrap();
        let delays: Vec<u32> = log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::Delay(ns) => Some(*ns),
                _ => None,
            })
            .collect();
        assert_eq!(delays, [1_000, 1_000, 1_000]);
    }

    #[test]
    fn test_busy_wait_returns_immediately_when_idle() {
        let (mut interface, mut delay, log) = test_interface(0);
        interface.busy_wait(&mut delay).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_busy_wait_times_out() {
        let (mut interface, mut delay, log) = test_interface(u32::MAX);
        interface
            .set_busy_timeout(1)
            .set_busy_poll_interval(100_000);
        let result = interface.busy_wait(&mut delay);
        assert!(matches!(result, Err(InterfaceError::Timeout)));
        assert_eq!(log.borrow().len(), 10);
    }

    #[test]
    fn test_busy_timeout_counts_delay_time_only() {
        let (mut interface, mut delay, log) = test_interface(u32::MAX);
        interface.set_busy_timeout(1).set_busy_poll_interval(30_000);
        let result = interface.busy_wait(&mut delay);
        assert!(matches!(result, Err(InterfaceError::Timeout)));

        let delayed: u64 = log
            .borrow()
            .iter()
            .map(|event| match event {
                Event::Delay(ns) => u64::from(*ns),
                _ => 0,
            })
            .sum();
        assert_eq!(log.borrow().len(), 34);
        assert!(delayed >= 1_000_000);
        assert!(delayed < 1_000_000 + 30_000);
    }

    #[test]
    fn test_busy_wait_active_low() {
        let (mut interface, mut delay, _) = test_interface(0);
        interface.set_busy_active_high(false).set_busy_timeout(1);
        // Pin reads low forever, which now means busy
        let result = interface.busy_wait(&mut delay);
        assert!(matches!(result, Err(InterfaceError::Timeout)));
    }

    #[test]
    fn test_power_off_is_idempotent() {
        let (mut interface, _, log) = test_interface(0);
        interface.power_on().unwrap();
        interface.power_off().unwrap();
        interface.power_off().unwrap();
        assert_eq!(
            *log.borrow(),
            [
                Event::High("pwr"),
                Event::Low("pwr"),
                Event::Low("dc"),
                Event::Low("rst"),
                Event::Low("pwr"),
                Event::Low("dc"),
                Event::Low("rst"),
            ]
        );
    }

    #[test]
    fn test_pin_error_is_propagated() {
        let (interface, _, log) = test_interface(0);
        let (spi, mut dc, rst, busy, pwr) = interface.release();
        dc.fail = true;
        let mut interface = Interface::new(spi, dc, rst, busy, pwr);
        let result = interface.send_command(0x12);
        assert!(matches!(result, Err(InterfaceError::Pin(MockError))));
        assert!(log.borrow().is_empty());
    }
}
