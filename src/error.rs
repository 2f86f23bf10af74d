//! Error taxonomy for the rotary driver.
//!
//! Nothing in this crate panics or aborts on a hardware problem. Faults end up
//! in [`RotaryStatus::Error`](crate::RotaryStatus::Error) and the reason is kept
//! as a [`RotaryFault`] for diagnostics.
//!
//! | Error | Raised by | Effect on status |
//! |-------|-----------|------------------|
//! | [`ConfigError`] | `init_rotary()` validation | `Error` |
//! | [`SampleError`] at init | initial pin read | `Error` |
//! | [`SampleError`] at runtime | `poll()` | `Success` → `Error` |
//!
//! Invalid quadrature transitions are not errors. They are counted by the
//! [`PositionRegister`](crate::PositionRegister) and otherwise ignored.

use core::fmt;

/// Configuration problems detected before the hardware is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Channel A and channel B are mapped to the same GPIO.
    SamePins {
        /// The duplicated pin number.
        pin: i32,
    },
    /// A pin number is negative.
    NegativePin {
        /// The offending pin number.
        pin: i32,
    },
    /// The debounce filter needs at least one stable sample.
    ZeroSettleSamples,
    /// Only 1, 2 and 4 transitions per detent are supported.
    UnsupportedDetent(u8),
    /// The poll interval is zero.
    ZeroPollInterval,
    /// The sample rate is below twice the maximum expected edge rate.
    Undersampled {
        /// Configured sample rate.
        sample_rate_hz: u32,
        /// Configured maximum edge rate.
        max_edge_rate_hz: u32,
    },
    /// The debounce settle window is longer than the fastest expected edge period.
    SettleTooSlow {
        /// Total settle window in microseconds.
        settle_us: u32,
        /// Shortest edge period in microseconds.
        edge_period_us: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SamePins { pin } => {
                write!(f, "channel A and B both mapped to pin {}", pin)
            }
            ConfigError::NegativePin { pin } => write!(f, "invalid pin number {}", pin),
            ConfigError::ZeroSettleSamples => write!(f, "settle_samples must be at least 1"),
            ConfigError::UnsupportedDetent(n) => {
                write!(f, "unsupported ticks_per_detent {} (expected 1, 2 or 4)", n)
            }
            ConfigError::ZeroPollInterval => write!(f, "poll interval must be non-zero"),
            ConfigError::Undersampled {
                sample_rate_hz,
                max_edge_rate_hz,
            } => write!(
                f,
                "sample rate {}Hz is below twice the max edge rate {}Hz",
                sample_rate_hz, max_edge_rate_hz
            ),
            ConfigError::SettleTooSlow {
                settle_us,
                edge_period_us,
            } => write!(
                f,
                "debounce window {}us exceeds edge period {}us",
                settle_us, edge_period_us
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// A failed read of the quadrature pins.
///
/// Distinct from a "no change" sample, which is not an error at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleError {
    /// The pin driver reported a read failure.
    ReadFault,
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::ReadFault => write!(f, "quadrature pin read failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SampleError {}

/// Why a driver ended up in [`RotaryStatus::Error`](crate::RotaryStatus::Error).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotaryFault {
    /// Initialization rejected the configuration.
    InvalidConfig(ConfigError),
    /// The initial sample could not be taken.
    Unreachable(SampleError),
    /// Sampling failed after a successful initialization.
    Runtime(SampleError),
    /// Another driver already writes to the same shared state.
    WriterBusy,
}

impl fmt::Display for RotaryFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotaryFault::InvalidConfig(e) => write!(f, "invalid configuration: {}", e),
            RotaryFault::Unreachable(e) => write!(f, "hardware unreachable: {}", e),
            RotaryFault::Runtime(e) => write!(f, "runtime fault: {}", e),
            RotaryFault::WriterBusy => write!(f, "shared state already has a driver"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RotaryFault {}

impl From<ConfigError> for RotaryFault {
    fn from(e: ConfigError) -> Self {
        RotaryFault::InvalidConfig(e)
    }
}
