//! Hardware abstraction traits for quadrature pin input and timekeeping.
//!
//! This module defines the hardware seams that let the rotary driver run on
//! a JVS I/O board (ESP32) and on a desktop test harness alike.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`QuadraturePins`] | Raw A/B level reads for one rotary channel |
//! | [`Clock`] | Monotonic microsecond time source |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::traits::QuadraturePins;
//! use jvs_rotary::hal::MockPins;
//!
//! let mut pins = MockPins::new();
//! pins.set_levels(true, false);
//! assert_eq!(pins.read_levels(), Ok((true, false)));
//! ```

/// Raw level reads of a quadrature input pair.
///
/// Implementations only read electrical levels (`true` = high). Polarity,
/// A/B swapping and debouncing are applied above this trait.
///
/// # Implementation Notes
///
/// - `read_levels()` may run in interrupt context: no blocking, no allocation
/// - Both levels should be read as close together as the hardware allows
/// - Return an error only for a genuine read fault, never for "no change"
///
/// # Example Implementation
///
/// ```rust,ignore
/// use jvs_rotary::traits::QuadraturePins;
///
/// struct MyPins { /* GPIO handles */ }
///
/// impl QuadraturePins for MyPins {
///     type Error = ();
///
///     fn read_levels(&mut self) -> Result<(bool, bool), ()> {
///         let port = read_gpio_port();
///         Ok((port & (1 << 6) != 0, port & (1 << 7) != 0))
///     }
/// }
/// ```
pub trait QuadraturePins {
    /// Error type for pin reads.
    type Error: core::fmt::Debug;

    /// Reads the current levels of channel A and channel B.
    fn read_levels(&mut self) -> Result<(bool, bool), Self::Error>;
}

impl<P: QuadraturePins + ?Sized> QuadraturePins for &mut P {
    type Error = P::Error;

    fn read_levels(&mut self) -> Result<(bool, bool), Self::Error> {
        (**self).read_levels()
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in microseconds for debounce timing.
/// On desktop, this can wrap `std::time::Instant`. On embedded,
/// use a hardware timer.
///
/// # Example
///
/// ```rust
/// use jvs_rotary::traits::Clock;
/// use jvs_rotary::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_us(), 0);
///
/// clock.advance_us(1500);
/// assert_eq!(clock.now_us(), 1500);
/// ```
pub trait Clock {
    /// Returns current time in microseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_us(&self) -> u64;
}
