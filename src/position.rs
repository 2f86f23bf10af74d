//! Wrap-aware position register shared between the decode path and readers.
//!
//! The decode path is the only writer; any number of contexts may read. Every
//! access is a single atomic operation, so a reader can never observe a
//! partially written value and the writer never waits.
//!
//! The counter is an `i32` and wraps with two's-complement arithmetic:
//! one tick forward from `i32::MAX` reads `i32::MIN`.
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::position::PositionRegister;
//! use jvs_rotary::quadrature::Step;
//!
//! let register = PositionRegister::new();
//! register.apply(Step::Forward);
//! register.apply(Step::Forward);
//! register.apply(Step::Backward);
//! register.apply(Step::Invalid);
//!
//! assert_eq!(register.read(), 1);
//! assert_eq!(register.invalid_transitions(), 1);
//! ```

use portable_atomic::{AtomicI32, AtomicU32, Ordering};

use crate::quadrature::Step;

/// Atomic tick counter with diagnostic counters.
#[derive(Debug)]
pub struct PositionRegister {
    value: AtomicI32,
    accepted: AtomicU32,
    invalid: AtomicU32,
}

impl PositionRegister {
    /// Creates a zeroed register. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            value: AtomicI32::new(0),
            accepted: AtomicU32::new(0),
            invalid: AtomicU32::new(0),
        }
    }

    /// Current tick count.
    #[inline]
    pub fn read(&self) -> i32 {
        self.value.load(Ordering::Acquire)
    }

    /// Folds one decoded step into the register.
    ///
    /// Movement steps add ±1 with wraparound, invalid steps only bump the
    /// invalid counter, and [`Step::None`] is ignored.
    #[inline]
    pub fn apply(&self, step: Step) {
        match step {
            Step::Forward | Step::Backward => {
                // fetch_add wraps on overflow
                self.value.fetch_add(step.delta(), Ordering::Release);
                self.accepted.fetch_add(1, Ordering::Relaxed);
            }
            Step::Invalid => {
                self.invalid.fetch_add(1, Ordering::Relaxed);
            }
            Step::None => {}
        }
    }

    /// Zeroes the counter and the diagnostics.
    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.invalid.store(0, Ordering::Relaxed);
        self.value.store(0, Ordering::Release);
    }

    /// Number of movement steps applied since the last reset (wrapping).
    #[inline]
    pub fn accepted_steps(&self) -> u32 {
        self.accepted.load(Ordering::Relaxed)
    }

    /// Number of invalid transitions seen since the last reset (wrapping).
    #[inline]
    pub fn invalid_transitions(&self) -> u32 {
        self.invalid.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) fn preset(&self, value: i32) {
        self.value.store(value, Ordering::Release);
    }
}

impl Default for PositionRegister {
    fn default() -> Self {
        Self::new()
    }
}
