//! ESP32 clock implementation using the ESP-IDF high-resolution timer.

use crate::traits::Clock;

/// ESP32 clock using the hardware timer.
///
/// Provides microsecond-resolution timing using the ESP-IDF
/// `esp_timer_get_time()` function, which returns microseconds since boot.
///
/// # Example
///
/// ```ignore
/// use jvs_rotary::hal::esp32::Esp32Clock;
/// use jvs_rotary::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let start = clock.now_us();
/// // ... do work ...
/// let elapsed = clock.now_us() - start;
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_us(&self) -> u64 {
        // Safe: plain read of the esp_timer counter, no side effects
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        micros.max(0) as u64
    }
}
