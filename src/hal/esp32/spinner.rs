//! Quadrature spinner input on ESP32 GPIOs.
//!
//! Arcade spinners (optical) and dials (mechanical) have open-collector or
//! open-drain A/B outputs, so both inputs get the internal pull-up.
//!
//! # Wiring
//!
//! - A → GPIO6
//! - B → GPIO7
//! - VCC → 3.3V (or 5V through a level shifter)
//! - GND → GND

use core::convert::Infallible;

use crate::traits::QuadraturePins;
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// A/B input pair for ESP32.
///
/// Reads are plain GPIO level reads and cannot fail once the pins are
/// configured, so the error type is [`Infallible`]. Configuration errors
/// surface from [`new()`](Self::new).
///
/// # Example
///
/// ```ignore
/// use jvs_rotary::hal::esp32::Esp32QuadraturePins;
///
/// let peripherals = Peripherals::take()?;
/// let pins = Esp32QuadraturePins::new(
///     peripherals.pins.gpio6, // A
///     peripherals.pins.gpio7, // B
/// )?;
/// let mut driver = RotaryDriver::new(pins, &SPINNER, &config);
/// ```
pub struct Esp32QuadraturePins<'d, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    /// Channel A input
    pin_a: PinDriver<'d, A, Input>,
    /// Channel B input
    pin_b: PinDriver<'d, B, Input>,
}

impl<'d, A, B> Esp32QuadraturePins<'d, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    /// Configures both GPIOs as inputs with internal pull-ups.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(
        pin_a: impl Peripheral<P = A> + 'd,
        pin_b: impl Peripheral<P = B> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin_a = PinDriver::input(pin_a)?;
        let mut pin_b = PinDriver::input(pin_b)?;

        pin_a.set_pull(Pull::Up)?;
        pin_b.set_pull(Pull::Up)?;

        Ok(Self { pin_a, pin_b })
    }
}

impl<A, B> QuadraturePins for Esp32QuadraturePins<'_, A, B>
where
    A: InputPin + OutputPin,
    B: InputPin + OutputPin,
{
    type Error = Infallible;

    #[inline]
    fn read_levels(&mut self) -> Result<(bool, bool), Infallible> {
        Ok((self.pin_a.is_high(), self.pin_b.is_high()))
    }
}
