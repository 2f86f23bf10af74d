//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the hardware traits, enabling
//! development and testing on desktop without a JVS board.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPins`] | [`QuadraturePins`] | Held or scripted A/B levels, fault injection |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::{Config, RotaryDriver, RotaryShared, RotaryStatus};
//! use jvs_rotary::config::{DebounceConfig, RotaryConfig};
//! use jvs_rotary::hal::{MockClock, MockPins};
//! use jvs_rotary::quadrature::QuadratureState as Q;
//!
//! let shared = RotaryShared::new();
//! let config = Config::default()
//!     .with_rotary(RotaryConfig::default().with_debounce(DebounceConfig::passthrough()));
//!
//! let mut pins = MockPins::new();
//! pins.queue_states(&[Q::S00, Q::S01, Q::S11, Q::S10]);
//!
//! let mut clock = MockClock::new();
//! let mut driver = RotaryDriver::new(pins, &shared, &config);
//! assert_eq!(driver.init_with(&clock), RotaryStatus::Success);
//!
//! for _ in 0..3 {
//!     clock.advance_us(250);
//!     driver.poll_with(&clock);
//! }
//! assert_eq!(driver.rotary_value(), 3);
//! ```
//!
//! [`QuadraturePins`]: crate::traits::QuadraturePins
//! [`Clock`]: crate::traits::Clock

use alloc::collections::VecDeque;

use crate::quadrature::QuadratureState;
use crate::traits::{Clock, QuadraturePins};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Error returned by [`MockPins`] while a fault is injected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockPinError;

/// Mock quadrature pin pair for testing.
///
/// Holds a current level pair that every read returns. Scripted states
/// queued with [`queue_states`](Self::queue_states) are consumed one per read
/// (FIFO) and the last one is then held.
///
/// # Example
///
/// ```rust
/// use jvs_rotary::hal::MockPins;
/// use jvs_rotary::quadrature::QuadratureState;
/// use jvs_rotary::traits::QuadraturePins;
///
/// let mut pins = MockPins::new();
/// pins.queue_states(&[QuadratureState::S01, QuadratureState::S11]);
///
/// assert_eq!(pins.read_levels(), Ok((false, true)));
/// assert_eq!(pins.read_levels(), Ok((true, true)));
/// assert_eq!(pins.read_levels(), Ok((true, true))); // held
///
/// pins.set_fault(true);
/// assert!(pins.read_levels().is_err());
/// assert_eq!(pins.read_count, 4);
/// ```
#[derive(Debug, Default)]
pub struct MockPins {
    /// Levels returned when the script is empty.
    pub state: QuadratureState,
    /// Whether reads currently fail.
    pub fault: bool,
    /// Number of `read_levels` calls, including failed ones.
    pub read_count: usize,
    script: VecDeque<QuadratureState>,
}

impl MockPins {
    /// Creates mock pins holding `00` with no fault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates mock pins whose every read fails.
    pub fn unreachable() -> Self {
        Self {
            fault: true,
            ..Self::default()
        }
    }

    /// Holds the given levels.
    pub fn set_levels(&mut self, a: bool, b: bool) {
        self.state = QuadratureState::from_levels(a, b);
    }

    /// Holds the given state.
    pub fn set_state(&mut self, state: QuadratureState) {
        self.state = state;
    }

    /// Queue states to be returned by subsequent reads
    pub fn queue_states(&mut self, states: &[QuadratureState]) {
        self.script.extend(states.iter().copied());
    }

    /// Number of queued states not yet read.
    pub fn pending(&self) -> usize {
        self.script.len()
    }

    /// Makes reads fail (or succeed again).
    pub fn set_fault(&mut self, fault: bool) {
        self.fault = fault;
    }
}

impl QuadraturePins for MockPins {
    type Error = MockPinError;

    fn read_levels(&mut self) -> Result<(bool, bool), MockPinError> {
        self.read_count += 1;
        if self.fault {
            return Err(MockPinError);
        }
        if let Some(next) = self.script.pop_front() {
            self.state = next;
        }
        Ok((self.state.a(), self.state.b()))
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use jvs_rotary::hal::MockClock;
/// use jvs_rotary::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_us(), 0);
///
/// clock.set_us(1000);
/// assert_eq!(clock.now_us(), 1000);
///
/// clock.advance_ms(2);
/// assert_eq!(clock.now_us(), 3000);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_us: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0us.
    pub fn new() -> Self {
        Self { current_us: 0 }
    }

    /// Sets the current time in microseconds.
    pub fn set_us(&mut self, us: u64) {
        self.current_us = us;
    }

    /// Advances the clock by the given number of microseconds.
    pub fn advance_us(&mut self, us: u64) {
        self.current_us += us;
    }

    /// Advances the clock by the given number of milliseconds.
    pub fn advance_ms(&mut self, ms: u64) {
        self.current_us += ms * 1_000;
    }
}

impl Clock for MockClock {
    fn now_us(&self) -> u64 {
        self.current_us
    }
}
