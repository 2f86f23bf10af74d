//! Quadrature state machine.
//!
//! A spinner's A/B outputs walk through the Gray-code cycle
//! `00 → 01 → 11 → 10 → 00` when turned forward and the reverse when turned
//! backward. Exactly one bit changes per valid transition; a transition that
//! flips both bits means an edge was missed and the direction is unknown.
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::quadrature::{QuadratureDecoder, QuadratureState, Step};
//!
//! let mut decoder = QuadratureDecoder::new(1);
//!
//! // First sample only establishes the baseline
//! assert_eq!(decoder.advance(QuadratureState::S00), Step::None);
//!
//! assert_eq!(decoder.advance(QuadratureState::S01), Step::Forward);
//! assert_eq!(decoder.advance(QuadratureState::S11), Step::Forward);
//! assert_eq!(decoder.advance(QuadratureState::S01), Step::Backward);
//!
//! // Both bits flipped: direction unknown
//! assert_eq!(decoder.advance(QuadratureState::S10), Step::Invalid);
//! ```

/// Current logic levels of channels A and B as a 2-bit code.
///
/// Bit 1 is channel A, bit 0 is channel B.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct QuadratureState(u8);

impl QuadratureState {
    /// A low, B low.
    pub const S00: Self = Self(0b00);
    /// A low, B high.
    pub const S01: Self = Self(0b01);
    /// A high, B high.
    pub const S11: Self = Self(0b11);
    /// A high, B low.
    pub const S10: Self = Self(0b10);

    /// The forward cycle, in order.
    pub const FORWARD_CYCLE: [Self; 4] = [Self::S00, Self::S01, Self::S11, Self::S10];

    /// Builds a state from channel levels (`true` = high).
    #[inline]
    pub const fn from_levels(a: bool, b: bool) -> Self {
        Self(((a as u8) << 1) | b as u8)
    }

    /// Builds a state from raw bits; anything above bit 1 is discarded.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Returns the 2-bit code.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Level of channel A.
    #[inline]
    pub const fn a(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Level of channel B.
    #[inline]
    pub const fn b(self) -> bool {
        self.0 & 0b01 != 0
    }

    /// Position of this state in [`FORWARD_CYCLE`](Self::FORWARD_CYCLE).
    #[inline]
    const fn phase(self) -> u8 {
        // Gray code to binary: 00→0, 01→1, 11→2, 10→3
        match self.0 {
            0b00 => 0,
            0b01 => 1,
            0b11 => 2,
            _ => 3,
        }
    }

    /// The state one step forward in the cycle.
    #[inline]
    pub const fn next(self) -> Self {
        Self::FORWARD_CYCLE[((self.phase() + 1) & 0b11) as usize]
    }

    /// The state one step backward in the cycle.
    #[inline]
    pub const fn prev(self) -> Self {
        Self::FORWARD_CYCLE[((self.phase() + 3) & 0b11) as usize]
    }
}

/// Outcome of decoding one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Step {
    /// No movement (no change, baseline sample, or a partial detent).
    #[default]
    None,
    /// One tick forward (+1).
    Forward,
    /// One tick backward (-1).
    Backward,
    /// Both bits changed at once; the counter must not move.
    Invalid,
}

impl Step {
    /// Signed contribution to the position counter.
    #[inline]
    pub const fn delta(self) -> i32 {
        match self {
            Step::Forward => 1,
            Step::Backward => -1,
            Step::None | Step::Invalid => 0,
        }
    }

    /// Returns true for [`Forward`](Self::Forward) and [`Backward`](Self::Backward).
    #[inline]
    pub const fn is_movement(self) -> bool {
        matches!(self, Step::Forward | Step::Backward)
    }
}

/// A pair of consecutive accepted states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionEvent {
    /// State before the transition.
    pub from: QuadratureState,
    /// State after the transition.
    pub to: QuadratureState,
}

impl TransitionEvent {
    /// Creates a transition event.
    #[inline]
    pub const fn new(from: QuadratureState, to: QuadratureState) -> Self {
        Self { from, to }
    }

    /// Classifies the transition against the Gray-code cycle.
    ///
    /// ```rust
    /// use jvs_rotary::quadrature::{QuadratureState as Q, Step, TransitionEvent};
    ///
    /// assert_eq!(TransitionEvent::new(Q::S00, Q::S01).decode(), Step::Forward);
    /// assert_eq!(TransitionEvent::new(Q::S00, Q::S10).decode(), Step::Backward);
    /// assert_eq!(TransitionEvent::new(Q::S00, Q::S11).decode(), Step::Invalid);
    /// assert_eq!(TransitionEvent::new(Q::S11, Q::S11).decode(), Step::None);
    /// ```
    #[inline]
    pub const fn decode(self) -> Step {
        match (self.to.phase().wrapping_sub(self.from.phase())) & 0b11 {
            0 => Step::None,
            1 => Step::Forward,
            3 => Step::Backward,
            _ => Step::Invalid,
        }
    }
}

/// Gray-code decoder with optional detent accumulation.
///
/// With `ticks_per_detent == 1` every valid transition produces a step. With
/// 2 or 4 the decoder emits one step per full detent and reversals inside a
/// detent cancel out.
#[derive(Clone, Debug)]
pub struct QuadratureDecoder {
    state: Option<QuadratureState>,
    sub_steps: i8,
    ticks_per_detent: i8,
}

impl QuadratureDecoder {
    /// Creates an unseeded decoder.
    ///
    /// `ticks_per_detent` is clamped to at least 1; configuration validation
    /// rejects values other than 1, 2 and 4 before a driver gets here.
    pub const fn new(ticks_per_detent: u8) -> Self {
        let tpd = if ticks_per_detent == 0 {
            1
        } else if ticks_per_detent > 4 {
            4
        } else {
            ticks_per_detent as i8
        };
        Self {
            state: None,
            sub_steps: 0,
            ticks_per_detent: tpd,
        }
    }

    /// Sets the baseline state without producing a step.
    pub fn seed(&mut self, state: QuadratureState) {
        self.state = Some(state);
        self.sub_steps = 0;
    }

    /// Forgets the baseline. The next [`advance`](Self::advance) re-seeds.
    pub fn reset(&mut self) {
        self.state = None;
        self.sub_steps = 0;
    }

    /// Last accepted state, if seeded.
    #[inline]
    pub fn state(&self) -> Option<QuadratureState> {
        self.state
    }

    /// Feeds the next accepted state and returns the resulting step.
    ///
    /// An unseeded decoder treats the state as its baseline and returns
    /// [`Step::None`].
    pub fn advance(&mut self, to: QuadratureState) -> Step {
        let Some(from) = self.state else {
            self.seed(to);
            return Step::None;
        };
        self.state = Some(to);

        match TransitionEvent::new(from, to).decode() {
            Step::None => Step::None,
            Step::Invalid => {
                self.sub_steps = 0;
                Step::Invalid
            }
            step => self.accumulate(step.delta() as i8),
        }
    }

    fn accumulate(&mut self, delta: i8) -> Step {
        self.sub_steps += delta;
        if self.sub_steps >= self.ticks_per_detent {
            self.sub_steps = 0;
            Step::Forward
        } else if self.sub_steps <= -self.ticks_per_detent {
            self.sub_steps = 0;
            Step::Backward
        } else {
            Step::None
        }
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // QuadratureState Tests
    // =========================================================================

    #[test]
    fn state_from_levels() {
        assert_eq!(QuadratureState::from_levels(false, false), QuadratureState::S00);
        assert_eq!(QuadratureState::from_levels(false, true), QuadratureState::S01);
        assert_eq!(QuadratureState::from_levels(true, true), QuadratureState::S11);
        assert_eq!(QuadratureState::from_levels(true, false), QuadratureState::S10);
    }

    #[test]
    fn state_from_bits_masks_high_bits() {
        assert_eq!(QuadratureState::from_bits(0b1111_1101), QuadratureState::S01);
        assert_eq!(QuadratureState::from_bits(0b100), QuadratureState::S00);
    }

    #[test]
    fn state_channel_accessors() {
        let s = QuadratureState::S10;
        assert!(s.a());
        assert!(!s.b());
    }

    #[test]
    fn next_and_prev_walk_the_cycle() {
        let mut s = QuadratureState::S00;
        for expected in [
            QuadratureState::S01,
            QuadratureState::S11,
            QuadratureState::S10,
            QuadratureState::S00,
        ] {
            s = s.next();
            assert_eq!(s, expected);
        }
        for state in QuadratureState::FORWARD_CYCLE {
            assert_eq!(state.next().prev(), state);
        }
    }

    // =========================================================================
    // Transition Table Tests
    // =========================================================================

    #[test]
    fn every_forward_transition_is_plus_one() {
        for from in QuadratureState::FORWARD_CYCLE {
            let step = TransitionEvent::new(from, from.next()).decode();
            assert_eq!(step, Step::Forward, "{:?} -> {:?}", from, from.next());
        }
    }

    #[test]
    fn every_backward_transition_is_minus_one() {
        for from in QuadratureState::FORWARD_CYCLE {
            let step = TransitionEvent::new(from, from.prev()).decode();
            assert_eq!(step, Step::Backward);
        }
    }

    #[test]
    fn double_bit_flip_is_invalid() {
        for from in QuadratureState::FORWARD_CYCLE {
            let to = QuadratureState::from_bits(from.bits() ^ 0b11);
            assert_eq!(TransitionEvent::new(from, to).decode(), Step::Invalid);
        }
    }

    #[test]
    fn step_delta() {
        assert_eq!(Step::Forward.delta(), 1);
        assert_eq!(Step::Backward.delta(), -1);
        assert_eq!(Step::Invalid.delta(), 0);
        assert_eq!(Step::None.delta(), 0);
        assert!(Step::Forward.is_movement());
        assert!(!Step::Invalid.is_movement());
    }

    // =========================================================================
    // Decoder Tests
    // =========================================================================

    #[test]
    fn first_sample_is_baseline_only() {
        let mut decoder = QuadratureDecoder::new(1);
        assert_eq!(decoder.state(), None);
        assert_eq!(decoder.advance(QuadratureState::S11), Step::None);
        assert_eq!(decoder.state(), Some(QuadratureState::S11));
    }

    #[test]
    fn scenario_forward_sequence() {
        let mut decoder = QuadratureDecoder::new(1);
        decoder.seed(QuadratureState::S00);
        let steps: Vec<Step> = [
            QuadratureState::S01,
            QuadratureState::S11,
            QuadratureState::S10,
            QuadratureState::S00,
            QuadratureState::S01,
        ]
        .into_iter()
        .map(|s| decoder.advance(s))
        .collect();
        assert_eq!(steps, vec![Step::Forward; 5]);
    }

    #[test]
    fn invalid_transition_still_moves_baseline() {
        let mut decoder = QuadratureDecoder::new(1);
        decoder.seed(QuadratureState::S00);
        assert_eq!(decoder.advance(QuadratureState::S11), Step::Invalid);
        // Subsequent decoding continues from the new state
        assert_eq!(decoder.advance(QuadratureState::S10), Step::Forward);
    }

    #[test]
    fn four_ticks_per_detent() {
        let mut decoder = QuadratureDecoder::new(4);
        decoder.seed(QuadratureState::S00);
        assert_eq!(decoder.advance(QuadratureState::S01), Step::None);
        assert_eq!(decoder.advance(QuadratureState::S11), Step::None);
        assert_eq!(decoder.advance(QuadratureState::S10), Step::None);
        assert_eq!(decoder.advance(QuadratureState::S00), Step::Forward);
    }

    #[test]
    fn reversal_inside_detent_cancels() {
        let mut decoder = QuadratureDecoder::new(4);
        decoder.seed(QuadratureState::S00);
        decoder.advance(QuadratureState::S01);
        decoder.advance(QuadratureState::S11);
        decoder.advance(QuadratureState::S01);
        decoder.advance(QuadratureState::S00);
        // Back at the starting detent, no tick emitted in either direction
        assert_eq!(decoder.advance(QuadratureState::S10), Step::None);
    }

    #[test]
    fn invalid_clears_partial_detent() {
        let mut decoder = QuadratureDecoder::new(2);
        decoder.seed(QuadratureState::S00);
        assert_eq!(decoder.advance(QuadratureState::S01), Step::None);
        assert_eq!(decoder.advance(QuadratureState::S10), Step::Invalid);
        assert_eq!(decoder.advance(QuadratureState::S00), Step::None);
        assert_eq!(decoder.advance(QuadratureState::S01), Step::Forward);
    }

    #[test]
    fn detent_is_clamped() {
        let mut decoder = QuadratureDecoder::new(0);
        decoder.seed(QuadratureState::S00);
        assert_eq!(decoder.advance(QuadratureState::S01), Step::Forward);
    }

    #[test]
    fn reset_forgets_baseline() {
        let mut decoder = QuadratureDecoder::default();
        decoder.seed(QuadratureState::S00);
        decoder.reset();
        assert_eq!(decoder.advance(QuadratureState::S01), Step::None);
    }
}
