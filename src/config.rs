//! Display configuration types and builder

use crate::geometry::{DisplayGeometry, EPD_2IN66B, Orientation};

/// Deep sleep mode sent with the sleep command
///
/// Waking from either mode requires a hardware reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DeepSleepMode {
    /// Deep sleep mode 1, RAM content is preserved
    #[default]
    Mode1 = 0x01,
    /// Deep sleep mode 2, RAM content is not preserved
    Mode2 = 0x03,
}

/// Display configuration
///
/// Use [`Builder`] to create a Config, or `Config::default()` for the
/// 2.66inch (B) module.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Panel geometry
    pub geometry: DisplayGeometry,
    /// Canvas orientation used by [`Epd2in66b::graphic_buffer`](crate::Epd2in66b::graphic_buffer)
    pub orientation: Orientation,
    /// Argument sent with the deep sleep command
    pub deep_sleep_mode: DeepSleepMode,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use epd2in66b::{Builder, DeepSleepMode, Orientation, EPD_2IN66B};
///
/// let config = Builder::new()
///     .geometry(EPD_2IN66B)
///     .orientation(Orientation::Landscape)
///     .deep_sleep_mode(DeepSleepMode::Mode2)
///     .build();
/// assert_eq!(config.geometry.width(), 152);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    geometry: Option<DisplayGeometry>,
    orientation: Orientation,
    deep_sleep_mode: DeepSleepMode,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel geometry (defaults to the 2.66inch (B) module)
    pub fn geometry(mut self, geometry: DisplayGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Set canvas orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set deep sleep mode
    pub fn deep_sleep_mode(mut self, mode: DeepSleepMode) -> Self {
        self.deep_sleep_mode = mode;
        self
    }

    /// Build the configuration
    ///
    /// Geometries are validated when they are created, so building cannot fail.
    pub fn build(self) -> Config {
        Config {
            geometry: self.geometry.unwrap_or(EPD_2IN66B),
            orientation: self.orientation,
            deep_sleep_mode: self.deep_sleep_mode,
        }
    }
}
