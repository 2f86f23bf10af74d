//! [`QuadraturePins`] for any pair of embedded-hal 1.0 input pins.
//!
//! Lets the driver run on any HAL that implements
//! [`embedded_hal::digital::InputPin`] (rp2040, stm32, esp-idf, ...).
//!
//! # Example
//!
//! ```ignore
//! use jvs_rotary::hal::InputPinPair;
//!
//! let pins = InputPinPair::new(gpio_a, gpio_b);
//! let mut driver = RotaryDriver::new(pins, &SPINNER, &config);
//! ```

use embedded_hal::digital::{ErrorType, InputPin};

use crate::traits::QuadraturePins;

/// Error from either input pin.
#[derive(Debug)]
pub enum InputPinPairError<EA, EB> {
    /// Channel A read failed.
    A(EA),
    /// Channel B read failed.
    B(EB),
}

/// Two embedded-hal input pins read as a quadrature pair.
#[derive(Debug)]
pub struct InputPinPair<A, B> {
    pin_a: A,
    pin_b: B,
}

impl<A: InputPin, B: InputPin> InputPinPair<A, B> {
    /// Wraps already-configured input pins (pull-ups set by the caller).
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self { pin_a, pin_b }
    }

    /// Returns the wrapped pins.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}

impl<A: InputPin, B: InputPin> QuadraturePins for InputPinPair<A, B> {
    type Error = InputPinPairError<<A as ErrorType>::Error, <B as ErrorType>::Error>;

    fn read_levels(&mut self) -> Result<(bool, bool), Self::Error> {
        let a = self.pin_a.is_high().map_err(InputPinPairError::A)?;
        let b = self.pin_b.is_high().map_err(InputPinPairError::B)?;
        Ok((a, b))
    }
}
