//! Elapsed-time measurement for log messages
//!
//! Without the `std` feature there is no portable clock, so a [`Stopwatch`]
//! reports its elapsed time as unavailable.

use core::fmt;
use core::time::Duration;

/// Measures how long an operation took
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    #[cfg(feature = "std")]
    started: std::time::Instant,
}

impl Stopwatch {
    /// Start measuring now
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            started: std::time::Instant::now(),
        }
    }

    /// Time since [`start`](Self::start), if a clock is available
    pub fn elapsed(&self) -> Option<Duration> {
        #[cfg(feature = "std")]
        {
            Some(self.started.elapsed())
        }
        #[cfg(not(feature = "std"))]
        {
            None
        }
    }

    /// Elapsed time formatted for logging
    pub fn took(&self) -> Elapsed {
        Elapsed(self.elapsed())
    }
}

/// Optional duration that renders as `n/a` when no clock is available
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Elapsed(pub Option<Duration>);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(duration) => fmt::Display::fmt(&FormattedDuration(duration), f),
            None => f.write_str("n/a"),
        }
    }
}

/// Renders a duration as `1min, 2s, 3ms`
///
/// Leading zero units are skipped. Durations under a millisecond are shown in
/// microseconds.
///
/// ```
/// use core::time::Duration;
/// use epd2in66b::timing::FormattedDuration;
///
/// let text = format!("{}", FormattedDuration(Duration::from_millis(62_003)));
/// assert_eq!(text, "1min, 2s, 3ms");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormattedDuration(pub Duration);

impl fmt::Display for FormattedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        let millis = self.0.subsec_millis();

        if minutes == 0 && seconds == 0 && millis == 0 {
            return write!(f, "{}us", self.0.subsec_micros());
        }

        let mut started = false;
        if minutes > 0 {
            write!(f, "{minutes}min")?;
            started = true;
        }
        if seconds > 0 || started {
            if started {
                f.write_str(", ")?;
            }
            write!(f, "{seconds}s")?;
            started = true;
        }
        if started {
            f.write_str(", ")?;
        }
        write!(f, "{millis}ms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn render(duration: Duration) -> alloc::string::String {
        FormattedDuration(duration).to_string()
    }

    #[test]
    fn test_minutes_seconds_millis() {
        assert_eq!(render(Duration::from_millis(62_003)), "1min, 2s, 3ms");
    }

    #[test]
    fn test_zero_units_after_first_are_kept() {
        assert_eq!(render(Duration::from_secs(120)), "2min, 0s, 0ms");
        assert_eq!(render(Duration::from_millis(5_000)), "5s, 0ms");
    }

    #[test]
    fn test_millis_only() {
        assert_eq!(render(Duration::from_millis(17)), "17ms");
    }

    #[test]
    fn test_sub_millisecond_uses_micros() {
        assert_eq!(render(Duration::from_micros(250)), "250us");
        assert_eq!(render(Duration::ZERO), "0us");
    }

    #[test]
    fn test_elapsed_without_clock() {
        assert_eq!(Elapsed(None).to_string(), "n/a");
        assert_eq!(Elapsed(Some(Duration::from_millis(3))).to_string(), "3ms");
    }

    #[cfg(not(feature = "std"))]
    #[test]
    fn test_stopwatch_reports_unavailable() {
        assert_eq!(Stopwatch::start().elapsed(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_stopwatch_measures() {
        assert!(Stopwatch::start().elapsed().is_some());
    }
}
