//! Driver lifecycle status.
//!
//! ```text
//!            init_rotary() ok
//!   Unused ─────────────────────▶ Success
//!     │                              │
//!     │ init_rotary() failed         │ sampling fault
//!     ▼                              ▼
//!   Error ◀──────────────────────────┘
//!     │
//!     └── init_rotary() ok ──▶ Success
//! ```
//!
//! There is no automatic way back to `Success`; only an explicit
//! `init_rotary()` re-arms a faulted driver.

use portable_atomic::{AtomicU8, Ordering};

/// Lifecycle state of a rotary driver.
///
/// The discriminants match the JVS board firmware's status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum RotaryStatus {
    /// `init_rotary()` has never been called.
    #[default]
    Unused = 0,
    /// Initialization failed or a hardware fault occurred.
    Error = 1,
    /// Sampling is active and the counter is trustworthy.
    Success = 2,
}

impl RotaryStatus {
    /// Returns the status as a lowercase string.
    ///
    /// ```
    /// use jvs_rotary::RotaryStatus;
    ///
    /// assert_eq!(RotaryStatus::Unused.as_str(), "unused");
    /// assert_eq!(RotaryStatus::Error.as_str(), "error");
    /// assert_eq!(RotaryStatus::Success.as_str(), "success");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RotaryStatus::Unused => "unused",
            RotaryStatus::Error => "error",
            RotaryStatus::Success => "success",
        }
    }

    /// Returns true if the driver is running.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, RotaryStatus::Success)
    }

    /// Decodes a stored discriminant. Unknown codes read as `Error`.
    #[inline]
    pub const fn from_u8(code: u8) -> Self {
        match code {
            0 => RotaryStatus::Unused,
            2 => RotaryStatus::Success,
            _ => RotaryStatus::Error,
        }
    }
}

/// Lock-free holder of the current [`RotaryStatus`].
#[derive(Debug)]
pub struct StatusTracker {
    status: AtomicU8,
}

impl StatusTracker {
    /// Creates a tracker in [`RotaryStatus::Unused`]. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            status: AtomicU8::new(RotaryStatus::Unused as u8),
        }
    }

    /// Current status.
    #[inline]
    pub fn get(&self) -> RotaryStatus {
        RotaryStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Records the outcome of an initialization attempt.
    ///
    /// `Unused` is not a valid outcome and is recorded as `Error`.
    pub fn set_init_result(&self, status: RotaryStatus) {
        let status = match status {
            RotaryStatus::Success => RotaryStatus::Success,
            _ => RotaryStatus::Error,
        };
        self.status.store(status as u8, Ordering::Release);
    }

    /// Moves a running driver to `Error`.
    ///
    /// Returns true if the status changed. Has no effect unless the current
    /// status is `Success`.
    pub fn fault(&self) -> bool {
        self.status
            .compare_exchange(
                RotaryStatus::Success as u8,
                RotaryStatus::Error as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_default_is_unused() {
        assert_eq!(RotaryStatus::default(), RotaryStatus::Unused);
    }

    #[test]
    fn status_discriminants() {
        assert_eq!(RotaryStatus::Unused as u8, 0);
        assert_eq!(RotaryStatus::Error as u8, 1);
        assert_eq!(RotaryStatus::Success as u8, 2);
    }

    #[test]
    fn status_from_u8() {
        assert_eq!(RotaryStatus::from_u8(0), RotaryStatus::Unused);
        assert_eq!(RotaryStatus::from_u8(1), RotaryStatus::Error);
        assert_eq!(RotaryStatus::from_u8(2), RotaryStatus::Success);
        assert_eq!(RotaryStatus::from_u8(7), RotaryStatus::Error);
    }

    #[test]
    fn status_debug() {
        assert_eq!(format!("{:?}", RotaryStatus::Success), "Success");
    }

    #[test]
    fn tracker_starts_unused() {
        let tracker = StatusTracker::new();
        assert_eq!(tracker.get(), RotaryStatus::Unused);
    }

    #[test]
    fn tracker_records_init_result() {
        let tracker = StatusTracker::new();
        tracker.set_init_result(RotaryStatus::Success);
        assert_eq!(tracker.get(), RotaryStatus::Success);
        tracker.set_init_result(RotaryStatus::Error);
        assert_eq!(tracker.get(), RotaryStatus::Error);
    }

    #[test]
    fn tracker_never_stores_unused_from_init() {
        let tracker = StatusTracker::new();
        tracker.set_init_result(RotaryStatus::Unused);
        assert_eq!(tracker.get(), RotaryStatus::Error);
    }

    #[test]
    fn fault_only_from_success() {
        let tracker = StatusTracker::new();
        assert!(!tracker.fault());
        assert_eq!(tracker.get(), RotaryStatus::Unused);

        tracker.set_init_result(RotaryStatus::Success);
        assert!(tracker.fault());
        assert_eq!(tracker.get(), RotaryStatus::Error);

        // Already faulted
        assert!(!tracker.fault());
    }
}
