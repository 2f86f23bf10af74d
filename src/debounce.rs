//! Debounce filter for raw quadrature samples.
//!
//! Mechanical spinners chatter around every edge and optical ones pick up
//! noise on long cabinet harnesses. A raw state is only passed on to the
//! decoder once it has been seen for `settle_samples` consecutive samples and
//! for at least `settle_us` microseconds since it first appeared.
//!
//! A bounce resets the stability count but nothing is dropped for good: if
//! the signal then holds steady it is accepted on a later sample.
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::config::DebounceConfig;
//! use jvs_rotary::debounce::DebounceFilter;
//! use jvs_rotary::quadrature::QuadratureState as Q;
//!
//! let mut filter = DebounceFilter::new(DebounceConfig::default().with_settle_samples(3));
//!
//! // Needs three consecutive samples of the new state
//! assert_eq!(filter.filter(Q::S01, Q::S00, 0), None);
//! assert_eq!(filter.filter(Q::S01, Q::S00, 100), None);
//! assert_eq!(filter.filter(Q::S01, Q::S00, 200), Some(Q::S01));
//! ```

use crate::config::DebounceConfig;
use crate::quadrature::QuadratureState;

/// Consecutive-sample plus minimum-time stability filter.
#[derive(Clone, Debug)]
pub struct DebounceFilter {
    settle_samples: u16,
    settle_us: u32,
    candidate: Option<QuadratureState>,
    stable_count: u16,
    first_seen_us: u64,
}

impl DebounceFilter {
    /// Creates a filter with the given settle criteria.
    ///
    /// A `settle_samples` of zero behaves like one.
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            settle_samples: config.settle_samples.max(1) as u16,
            settle_us: config.settle_us,
            candidate: None,
            stable_count: 0,
            first_seen_us: 0,
        }
    }

    /// Creates a filter that accepts every change immediately.
    pub fn passthrough() -> Self {
        Self::new(DebounceConfig::passthrough())
    }

    /// Drops any pending candidate.
    pub fn reset(&mut self) {
        self.candidate = None;
        self.stable_count = 0;
    }

    /// The state currently waiting to settle, if any.
    #[inline]
    pub fn candidate(&self) -> Option<QuadratureState> {
        self.candidate
    }

    /// Checks one raw sample against the last accepted state.
    ///
    /// Returns the new state exactly once, on the sample where it has met
    /// both settle criteria. Returns `None` for unchanged input and for
    /// anything still settling.
    pub fn filter(
        &mut self,
        raw: QuadratureState,
        accepted: QuadratureState,
        now_us: u64,
    ) -> Option<QuadratureState> {
        if raw == accepted {
            self.reset();
            return None;
        }

        if self.candidate == Some(raw) {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.candidate = Some(raw);
            self.stable_count = 1;
            self.first_seen_us = now_us;
        }

        let elapsed_us = now_us.saturating_sub(self.first_seen_us);
        if self.stable_count >= self.settle_samples && elapsed_us >= self.settle_us as u64 {
            self.reset();
            Some(raw)
        } else {
            None
        }
    }
}

impl Default for DebounceFilter {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}
