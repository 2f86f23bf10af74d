//! Rotary channel configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::config::{Config, DebounceConfig, RotaryChannel, RotaryConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert!(config.validate().is_ok());
//!
//! // Or customize
//! let config = Config::default().with_rotary(
//!     RotaryConfig::default()
//!         .with_channel(RotaryChannel::new(12, 13).with_swap(true))
//!         .with_debounce(DebounceConfig::default().with_settle_samples(4))
//!         .with_ticks_per_detent(4),
//! );
//! assert!(config.validate().is_ok());
//! ```

use heapless::String as HString;

use crate::error::ConfigError;

/// Maximum length for config strings (labels, board names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete configuration for one rotary input.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Board identification
    pub device: DeviceConfig,
    /// Channel wiring, debounce and read policy
    pub rotary: RotaryConfig,
    /// Decode loop timing
    pub sampling: SamplingConfig,
}

impl Config {
    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set rotary configuration
    pub fn with_rotary(mut self, rotary: RotaryConfig) -> Self {
        self.rotary = rotary;
        self
    }

    /// Set sampling configuration
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Checks everything `init_rotary()` checks before touching hardware.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rotary.validate()?;
        self.sampling.validate(&self.rotary.debounce)
    }
}

// ============================================================================
// Channel
// ============================================================================

/// Physical wiring of one quadrature input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotaryChannel {
    /// Human-readable label used in log output
    pub label: ShortString,
    /// GPIO number of channel A
    pub pin_a: i32,
    /// GPIO number of channel B
    pub pin_b: i32,
    /// Invert channel A (active-low wiring)
    pub invert_a: bool,
    /// Invert channel B (active-low wiring)
    pub invert_b: bool,
    /// Swap A and B, reversing the counting direction
    pub swap_ab: bool,
}

impl Default for RotaryChannel {
    fn default() -> Self {
        Self {
            label: short_string("rotary1"),
            pin_a: 6,
            pin_b: 7,
            invert_a: false,
            invert_b: false,
            swap_ab: false,
        }
    }
}

impl RotaryChannel {
    /// Channel on the given A/B pins with default polarity.
    pub fn new(pin_a: i32, pin_b: i32) -> Self {
        Self {
            pin_a,
            pin_b,
            ..Self::default()
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = short_string(label);
        self
    }

    /// Set per-channel inversion
    pub fn with_inversion(mut self, invert_a: bool, invert_b: bool) -> Self {
        self.invert_a = invert_a;
        self.invert_b = invert_b;
        self
    }

    /// Set A/B swap
    pub fn with_swap(mut self, swap: bool) -> Self {
        self.swap_ab = swap;
        self
    }

    /// Check the pin map
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pin in [self.pin_a, self.pin_b] {
            if pin < 0 {
                return Err(ConfigError::NegativePin { pin });
            }
        }
        if self.pin_a == self.pin_b {
            return Err(ConfigError::SamePins { pin: self.pin_a });
        }
        Ok(())
    }
}

// ============================================================================
// Debounce Config
// ============================================================================

/// Settle criteria for the debounce filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebounceConfig {
    /// Consecutive identical samples required (minimum 1)
    pub settle_samples: u8,
    /// Minimum time a new state must be held, in microseconds (0 = off)
    pub settle_us: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            settle_samples: 2,
            settle_us: 0,
        }
    }
}

impl DebounceConfig {
    /// Accept every change on first sight
    pub const fn passthrough() -> Self {
        Self {
            settle_samples: 1,
            settle_us: 0,
        }
    }

    /// Set the consecutive sample count
    pub fn with_settle_samples(mut self, samples: u8) -> Self {
        self.settle_samples = samples;
        self
    }

    /// Set the minimum settle time
    pub fn with_settle_us(mut self, us: u32) -> Self {
        self.settle_us = us;
        self
    }
}

// ============================================================================
// Rotary Config
// ============================================================================

/// What `rotary_value()` reports while the driver is not running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackPolicy {
    /// Report a fixed value.
    Constant(i32),
    /// Report whatever the counter last held.
    LastKnown,
}

impl FallbackPolicy {
    /// Default fallback: a constant zero.
    pub const DEFAULT: Self = FallbackPolicy::Constant(0);
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decoder-side configuration of one rotary input.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotaryConfig {
    /// Pin wiring
    pub channel: RotaryChannel,
    /// Debounce settle criteria
    pub debounce: DebounceConfig,
    /// Valid transitions per reported tick (1, 2 or 4)
    pub ticks_per_detent: u8,
    /// Value reported when status is not `Success`
    pub fallback: FallbackPolicy,
}

impl Default for RotaryConfig {
    fn default() -> Self {
        Self {
            channel: RotaryChannel::default(),
            debounce: DebounceConfig::default(),
            ticks_per_detent: 1,
            fallback: FallbackPolicy::DEFAULT,
        }
    }
}

impl RotaryConfig {
    /// Set the channel wiring
    pub fn with_channel(mut self, channel: RotaryChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Set the debounce criteria
    pub fn with_debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set transitions per tick
    pub fn with_ticks_per_detent(mut self, ticks: u8) -> Self {
        self.ticks_per_detent = ticks;
        self
    }

    /// Set the fallback policy
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Check channel, debounce and detent settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.channel.validate()?;
        if self.debounce.settle_samples == 0 {
            return Err(ConfigError::ZeroSettleSamples);
        }
        if !matches!(self.ticks_per_detent, 1 | 2 | 4) {
            return Err(ConfigError::UnsupportedDetent(self.ticks_per_detent));
        }
        Ok(())
    }
}

// ============================================================================
// Sampling Config
// ============================================================================

/// Timing of the decode loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    /// Interval between `poll()` calls in microseconds
    pub poll_interval_us: u32,
    /// Fastest expected edge rate on either channel (0 = unchecked)
    pub max_edge_rate_hz: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            poll_interval_us: 250,
            max_edge_rate_hz: 1_000,
        }
    }
}

impl SamplingConfig {
    /// Set the poll interval
    pub fn with_poll_interval_us(mut self, us: u32) -> Self {
        self.poll_interval_us = us;
        self
    }

    /// Set the maximum expected edge rate
    pub fn with_max_edge_rate_hz(mut self, hz: u32) -> Self {
        self.max_edge_rate_hz = hz;
        self
    }

    /// Samples per second implied by the poll interval
    pub fn sample_rate_hz(&self) -> u32 {
        if self.poll_interval_us == 0 {
            0
        } else {
            1_000_000 / self.poll_interval_us
        }
    }

    /// Interval between `poll()` calls, for arming a periodic timer
    pub fn poll_period(&self) -> core::time::Duration {
        core::time::Duration::from_micros(self.poll_interval_us as u64)
    }

    /// Check the sample rate against the edge rate, and the debounce window
    /// against the edge period.
    pub fn validate(&self, debounce: &DebounceConfig) -> Result<(), ConfigError> {
        if self.poll_interval_us == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.max_edge_rate_hz == 0 {
            return Ok(());
        }

        let sample_rate_hz = self.sample_rate_hz();
        if (sample_rate_hz as u64) < 2 * self.max_edge_rate_hz as u64 {
            return Err(ConfigError::Undersampled {
                sample_rate_hz,
                max_edge_rate_hz: self.max_edge_rate_hz,
            });
        }

        // The first sample of a new state counts, so the window spans
        // settle_samples - 1 further intervals.
        let settle_us = (debounce.settle_samples.saturating_sub(1) as u32)
            .saturating_mul(self.poll_interval_us)
            .max(debounce.settle_us);
        let edge_period_us = 1_000_000 / self.max_edge_rate_hz;
        if settle_us >= edge_period_us {
            return Err(ConfigError::SettleTooSlow {
                settle_us,
                edge_period_us,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Board identification
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable board name
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("jvs-io"),
        }
    }
}

impl DeviceConfig {
    /// Set the board name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
