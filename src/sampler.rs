//! Pin sampler: raw pin levels to a channel-corrected [`QuadratureState`].

use crate::config::RotaryChannel;
use crate::error::SampleError;
use crate::quadrature::QuadratureState;
use crate::traits::QuadraturePins;

/// Reads a [`QuadraturePins`] pair and applies the channel's polarity and
/// A/B swap.
///
/// Sampling has no effect on decode state and never blocks.
///
/// # Example
///
/// ```rust
/// use jvs_rotary::config::RotaryChannel;
/// use jvs_rotary::hal::MockPins;
/// use jvs_rotary::quadrature::QuadratureState;
/// use jvs_rotary::sampler::PinSampler;
///
/// let mut pins = MockPins::new();
/// pins.set_levels(true, false);
///
/// let channel = RotaryChannel::new(6, 7).with_swap(true);
/// let mut sampler = PinSampler::new(pins, &channel);
/// assert_eq!(sampler.sample(), Ok(QuadratureState::S01));
/// ```
#[derive(Debug)]
pub struct PinSampler<P> {
    pins: P,
    invert_a: bool,
    invert_b: bool,
    swap_ab: bool,
}

impl<P: QuadraturePins> PinSampler<P> {
    /// Wraps a pin pair with the polarity settings of `channel`.
    pub fn new(pins: P, channel: &RotaryChannel) -> Self {
        Self {
            pins,
            invert_a: channel.invert_a,
            invert_b: channel.invert_b,
            swap_ab: channel.swap_ab,
        }
    }

    /// Takes one sample.
    pub fn sample(&mut self) -> Result<QuadratureState, SampleError> {
        let (a, b) = self.pins.read_levels().map_err(|e| {
            log::trace!("pin read failed: {:?}", e);
            SampleError::ReadFault
        })?;
        let a = a ^ self.invert_a;
        let b = b ^ self.invert_b;
        Ok(if self.swap_ab {
            QuadratureState::from_levels(b, a)
        } else {
            QuadratureState::from_levels(a, b)
        })
    }

    /// Borrow the underlying pins.
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Mutably borrow the underlying pins.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Returns the underlying pins.
    pub fn into_pins(self) -> P {
        self.pins
    }
}
