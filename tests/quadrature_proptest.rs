//! Property-based tests for quadrature decoding.
//! Verifies counting laws hold for ALL sequences, not just fixed examples.

use jvs_rotary::{
    hal::MockPins, Config, DebounceConfig, PositionRegister, QuadratureDecoder,
    QuadratureState as Q, RotaryConfig, RotaryDriver, RotaryShared, Step,
};
use proptest::prelude::*;

fn state_strategy() -> impl Strategy<Value = Q> {
    (0u8..4).prop_map(Q::from_bits)
}

fn passthrough() -> Config {
    Config::default().with_rotary(RotaryConfig::default().with_debounce(DebounceConfig::passthrough()))
}

proptest! {
    /// N forward transitions from any start add exactly N.
    #[test]
    fn forward_cycle_adds_n(start in state_strategy(), n in 0usize..500) {
        let mut decoder = QuadratureDecoder::new(1);
        decoder.seed(start);
        let register = PositionRegister::new();

        let mut state = start;
        for _ in 0..n {
            state = state.next();
            register.apply(decoder.advance(state));
        }
        prop_assert_eq!(register.read(), n as i32);
    }

    /// N backward transitions from any start subtract exactly N.
    #[test]
    fn backward_cycle_subtracts_n(start in state_strategy(), n in 0usize..500) {
        let mut decoder = QuadratureDecoder::new(1);
        decoder.seed(start);
        let register = PositionRegister::new();

        let mut state = start;
        for _ in 0..n {
            state = state.prev();
            register.apply(decoder.advance(state));
        }
        prop_assert_eq!(register.read(), -(n as i32));
    }

    /// Any sequence: the counter equals (#forward - #backward) and each
    /// invalid step leaves it unchanged.
    #[test]
    fn counter_matches_step_tally(states in proptest::collection::vec(state_strategy(), 1..300)) {
        let mut decoder = QuadratureDecoder::new(1);
        let register = PositionRegister::new();
        let mut expected = 0i32;
        let mut invalid = 0u32;

        for s in states {
            let before = register.read();
            let step = decoder.advance(s);
            register.apply(step);
            match step {
                Step::Forward => expected += 1,
                Step::Backward => expected -= 1,
                Step::Invalid => {
                    invalid += 1;
                    prop_assert_eq!(register.read(), before);
                }
                Step::None => prop_assert_eq!(register.read(), before),
            }
        }
        prop_assert_eq!(register.read(), expected);
        prop_assert_eq!(register.invalid_transitions(), invalid);
    }

    /// The counter changes by at most one per accepted state.
    #[test]
    fn counter_moves_at_most_one_per_sample(states in proptest::collection::vec(state_strategy(), 1..300)) {
        let shared = RotaryShared::new();
        let mut driver = RotaryDriver::new(MockPins::new(), &shared, &passthrough());
        driver.init_rotary(0);

        for (i, s) in states.into_iter().enumerate() {
            let before = driver.rotary_value();
            driver.pins_mut().set_state(s);
            driver.poll(i as u64 * 250);
            let after = driver.rotary_value();
            prop_assert!(after.wrapping_sub(before).abs() <= 1);
        }
    }

    /// A reversal cancels the ticks it retraces, crossing zero included.
    #[test]
    fn reversal_nets_out(offset in 0i32..64, extra in 1i32..64) {
        let register = PositionRegister::new();
        let mut decoder = QuadratureDecoder::new(1);
        decoder.seed(Q::S00);

        // Walk backward from zero by `offset`, then forward by offset + extra
        let mut state = Q::S00;
        for _ in 0..offset {
            state = state.prev();
            register.apply(decoder.advance(state));
        }
        for _ in 0..(offset + extra) {
            state = state.next();
            register.apply(decoder.advance(state));
        }
        prop_assert_eq!(register.read(), extra);
    }

    /// Detent accumulation: N full detents forward add N.
    #[test]
    fn detents_count_full_clicks(ticks in prop_oneof![Just(1u8), Just(2u8), Just(4u8)], clicks in 0usize..100) {
        let mut decoder = QuadratureDecoder::new(ticks);
        decoder.seed(Q::S00);
        let register = PositionRegister::new();

        let mut state = Q::S00;
        for _ in 0..(clicks * ticks as usize) {
            state = state.next();
            register.apply(decoder.advance(state));
        }
        prop_assert_eq!(register.read(), clicks as i32);
    }
}
