//! The rotary driver: lifecycle, decode step and the public read API.
//!
//! This module provides [`RotaryDriver`], the single writer for one rotary
//! channel, and [`RotaryReader`], a cheap read handle for the context that
//! reports the position to the host.
//!
//! # Overview
//!
//! - [`RotaryDriver::init_rotary`] validates configuration and hardware,
//!   seeds the decoder, zeroes the counter and records the status
//! - [`RotaryDriver::poll`] runs one sample → debounce → decode step; call it
//!   from a timer tick or from the A/B edge interrupt
//! - [`RotaryReader::rotary_value`] returns the counter (or the configured
//!   fallback while the driver is not running) without ever blocking
//!
//! Both sides share a [`RotaryShared`] made only of atomics, so it can live in
//! a `static` and be touched from interrupt context.
//!
//! # Example
//!
//! ```rust
//! use jvs_rotary::{Config, RotaryDriver, RotaryShared, RotaryStatus};
//! use jvs_rotary::config::{DebounceConfig, RotaryConfig};
//! use jvs_rotary::hal::MockPins;
//! use jvs_rotary::quadrature::QuadratureState;
//!
//! static SPINNER: RotaryShared = RotaryShared::new();
//!
//! let config = Config::default()
//!     .with_rotary(RotaryConfig::default().with_debounce(DebounceConfig::passthrough()));
//! let mut driver = RotaryDriver::new(MockPins::new(), &SPINNER, &config);
//! let reader = driver.reader();
//!
//! assert_eq!(reader.status(), RotaryStatus::Unused);
//! assert_eq!(driver.init_rotary(0), RotaryStatus::Success);
//! assert_eq!(reader.rotary_value(), 0);
//!
//! // Turn one step forward
//! driver.pins_mut().set_state(QuadratureState::S01);
//! driver.poll(250);
//! assert_eq!(reader.rotary_value(), 1);
//! ```
//!
//! # Re-initialization
//!
//! Calling `init_rotary()` on a running driver returns `Success` and leaves
//! the decoder and counter untouched. Calling it after a fault re-validates
//! the hardware and, on success, re-arms with a zeroed counter.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::{Config, FallbackPolicy, RotaryChannel};
use crate::debounce::DebounceFilter;
use crate::error::RotaryFault;
use crate::position::PositionRegister;
use crate::quadrature::{QuadratureDecoder, Step};
use crate::sampler::PinSampler;
use crate::status::{RotaryStatus, StatusTracker};
use crate::traits::{Clock, QuadraturePins};

// ============================================================================
// Shared State
// ============================================================================

/// State shared between the decode context and reader contexts.
///
/// Holds only atomics. Create one per rotary channel, typically as a
/// `static`. The first [`RotaryDriver`] to initialize against it becomes the
/// only writer until that driver is dropped.
#[derive(Debug)]
pub struct RotaryShared {
    position: PositionRegister,
    status: StatusTracker,
    generation: AtomicU32,
    writer: AtomicBool,
}

impl RotaryShared {
    /// Creates shared state in [`RotaryStatus::Unused`] with a zero counter.
    pub const fn new() -> Self {
        Self {
            position: PositionRegister::new(),
            status: StatusTracker::new(),
            generation: AtomicU32::new(0),
            writer: AtomicBool::new(false),
        }
    }

    /// Current lifecycle status.
    #[inline]
    pub fn status(&self) -> RotaryStatus {
        self.status.get()
    }

    /// The underlying position register.
    #[inline]
    pub fn position(&self) -> &PositionRegister {
        &self.position
    }

    /// Position under the given fallback policy.
    ///
    /// Returns the counter while `Success`, otherwise the policy's value.
    #[inline]
    pub fn rotary_value(&self, fallback: FallbackPolicy) -> i32 {
        if self.status().is_success() {
            return self.position.read();
        }
        match fallback {
            FallbackPolicy::Constant(value) => value,
            FallbackPolicy::LastKnown => self.position.read(),
        }
    }

    /// Creates a read handle with the given fallback policy.
    pub fn reader(&self, fallback: FallbackPolicy) -> RotaryReader<'_> {
        RotaryReader::new(self, fallback)
    }

    /// Number of successful initializations so far (wrapping).
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether a driver currently owns the write side.
    #[inline]
    pub fn has_writer(&self) -> bool {
        self.writer.load(Ordering::Acquire)
    }

    fn arm(&self) {
        self.position.reset();
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.status.set_init_result(RotaryStatus::Success);
    }
}

impl Default for RotaryShared {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Reader
// ============================================================================

/// Read-only handle for the host-communication context.
///
/// Never blocks and never writes shared state. Cloning is cheap; each clone
/// tracks its own [`read_delta`](Self::read_delta) baseline.
#[derive(Clone, Debug)]
pub struct RotaryReader<'a> {
    shared: &'a RotaryShared,
    fallback: FallbackPolicy,
    last_value: i32,
    generation: u32,
}

impl<'a> RotaryReader<'a> {
    /// Creates a reader over `shared`.
    pub fn new(shared: &'a RotaryShared, fallback: FallbackPolicy) -> Self {
        Self {
            shared,
            fallback,
            last_value: shared.position.read(),
            generation: shared.generation(),
        }
    }

    /// Current lifecycle status.
    #[inline]
    pub fn status(&self) -> RotaryStatus {
        self.shared.status()
    }

    /// Current position, or the fallback value when not `Success`.
    #[inline]
    pub fn rotary_value(&self) -> i32 {
        self.shared.rotary_value(self.fallback)
    }

    /// Ticks moved since the previous call on this reader.
    ///
    /// Wrap-aware: crossing `i32::MAX` forward reads as a small positive
    /// delta. Returns 0 while the driver is not running. After a
    /// re-initialization the baseline restarts from the zeroed counter.
    pub fn read_delta(&mut self) -> i32 {
        if !self.shared.status().is_success() {
            return 0;
        }
        let generation = self.shared.generation();
        if generation != self.generation {
            self.generation = generation;
            self.last_value = 0;
        }
        let value = self.shared.position.read();
        let delta = value.wrapping_sub(self.last_value);
        self.last_value = value;
        delta
    }

    /// Invalid transitions seen since the last initialization.
    #[inline]
    pub fn invalid_transitions(&self) -> u32 {
        self.shared.position.invalid_transitions()
    }

    /// The fallback policy in use.
    #[inline]
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Write ownership of a [`RotaryShared`], released on drop.
#[derive(Debug)]
struct WriterClaim<'a> {
    shared: &'a RotaryShared,
    held: bool,
}

impl<'a> WriterClaim<'a> {
    const fn new(shared: &'a RotaryShared) -> Self {
        Self { shared, held: false }
    }

    fn acquire(&mut self) -> bool {
        if !self.held {
            self.held = self
                .shared
                .writer
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok();
        }
        self.held
    }
}

impl Drop for WriterClaim<'_> {
    fn drop(&mut self) {
        if self.held {
            self.shared.writer.store(false, Ordering::Release);
        }
    }
}

/// Single-writer driver for one rotary channel.
///
/// # Type Parameter
///
/// - `P`: The pin pair implementation ([`QuadraturePins`] trait)
///
/// # Thread Safety
///
/// The driver itself is meant to live in one context (the polling thread or
/// the interrupt handler). Readers in other contexts use [`RotaryReader`].
/// Only one driver writes to a given [`RotaryShared`]: a second driver's
/// `init_rotary()` returns `Error` with [`RotaryFault::WriterBusy`] and its
/// `poll()` does nothing.
pub struct RotaryDriver<'a, P: QuadraturePins> {
    sampler: PinSampler<P>,
    debounce: DebounceFilter,
    decoder: QuadratureDecoder,
    shared: &'a RotaryShared,
    claim: WriterClaim<'a>,
    config: Config,
    last_fault: Option<RotaryFault>,
}

impl<'a, P: QuadraturePins> RotaryDriver<'a, P> {
    /// Creates a driver. Hardware is not touched until
    /// [`init_rotary`](Self::init_rotary).
    pub fn new(pins: P, shared: &'a RotaryShared, config: &Config) -> Self {
        Self {
            sampler: PinSampler::new(pins, &config.rotary.channel),
            debounce: DebounceFilter::new(config.rotary.debounce),
            decoder: QuadratureDecoder::new(config.rotary.ticks_per_detent),
            shared,
            claim: WriterClaim::new(shared),
            config: config.clone(),
            last_fault: None,
        }
    }

    /// Validates configuration and hardware and starts decoding.
    ///
    /// Returns [`RotaryStatus::Success`] or [`RotaryStatus::Error`], never
    /// `Unused`. On success the first sample becomes the decoder baseline and
    /// the counter reads 0.
    ///
    /// If another driver already owns `shared`, returns `Error` without
    /// touching the shared status.
    pub fn init_rotary(&mut self, now_us: u64) -> RotaryStatus {
        let label = self.config.rotary.channel.label.clone();
        if !self.claim.acquire() {
            log::warn!("{}: shared state already has a driver", label);
            self.last_fault = Some(RotaryFault::WriterBusy);
            return RotaryStatus::Error;
        }

        if let Err(e) = self.config.validate() {
            return self.fail_init(RotaryFault::InvalidConfig(e));
        }

        match self.shared.status() {
            RotaryStatus::Success => {
                log::warn!("{}: already initialized, keeping running decoder", label);
                return RotaryStatus::Success;
            }
            RotaryStatus::Error => {
                log::info!("{}: re-initializing after fault", label);
            }
            RotaryStatus::Unused => {}
        }

        let baseline = match self.sampler.sample() {
            Ok(state) => state,
            Err(e) => return self.fail_init(RotaryFault::Unreachable(e)),
        };

        self.decoder.seed(baseline);
        self.debounce.reset();
        self.last_fault = None;
        self.shared.arm();

        log::info!(
            "{}: rotary ready on pins A={} B={} (baseline {:02b}, t={}us)",
            label,
            self.config.rotary.channel.pin_a,
            self.config.rotary.channel.pin_b,
            baseline.bits(),
            now_us
        );
        RotaryStatus::Success
    }

    /// [`init_rotary`](Self::init_rotary) using a [`Clock`] for the timestamp.
    pub fn init_with<C: Clock>(&mut self, clock: &C) -> RotaryStatus {
        self.init_rotary(clock.now_us())
    }

    /// Runs one decode step.
    ///
    /// Does nothing unless this driver owns the shared state and the status
    /// is `Success`. A pin read fault moves the status to `Error`. Returns
    /// the decoded step, which is [`Step::None`] for unchanged, settling or
    /// partial-detent samples.
    pub fn poll(&mut self, now_us: u64) -> Step {
        if !self.claim.held || !self.shared.status().is_success() {
            return Step::None;
        }

        let raw = match self.sampler.sample() {
            Ok(state) => state,
            Err(e) => {
                self.last_fault = Some(RotaryFault::Runtime(e));
                if self.shared.status.fault() {
                    log::error!(
                        "{}: sampling fault, rotary disabled: {}",
                        self.config.rotary.channel.label,
                        e
                    );
                }
                return Step::None;
            }
        };

        let Some(accepted) = self.decoder.state() else {
            self.decoder.seed(raw);
            return Step::None;
        };

        let Some(next) = self.debounce.filter(raw, accepted, now_us) else {
            return Step::None;
        };

        let step = self.decoder.advance(next);
        if step == Step::Invalid {
            log::trace!(
                "{}: invalid transition {:02b} -> {:02b}",
                self.config.rotary.channel.label,
                accepted.bits(),
                next.bits()
            );
        }
        self.shared.position.apply(step);
        step
    }

    /// [`poll`](Self::poll) using a [`Clock`] for the timestamp.
    pub fn poll_with<C: Clock>(&mut self, clock: &C) -> Step {
        self.poll(clock.now_us())
    }

    /// Current lifecycle status.
    #[inline]
    pub fn status(&self) -> RotaryStatus {
        self.shared.status()
    }

    /// Current position, or the configured fallback when not `Success`.
    #[inline]
    pub fn rotary_value(&self) -> i32 {
        self.shared.rotary_value(self.config.rotary.fallback)
    }

    /// A reader using this driver's fallback policy.
    pub fn reader(&self) -> RotaryReader<'a> {
        RotaryReader::new(self.shared, self.config.rotary.fallback)
    }

    /// The reason for the most recent `Error`, if any.
    #[inline]
    pub fn last_fault(&self) -> Option<RotaryFault> {
        self.last_fault
    }

    /// Invalid transitions seen since the last initialization.
    #[inline]
    pub fn invalid_transitions(&self) -> u32 {
        self.shared.position.invalid_transitions()
    }

    /// The configuration this driver was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The channel wiring.
    pub fn channel(&self) -> &RotaryChannel {
        &self.config.rotary.channel
    }

    /// Mutably borrow the pins (e.g. to drive a mock).
    pub fn pins_mut(&mut self) -> &mut P {
        self.sampler.pins_mut()
    }

    /// Consumes the driver and returns the pins. The status is left as is.
    pub fn into_pins(self) -> P {
        self.sampler.into_pins()
    }

    fn fail_init(&mut self, fault: RotaryFault) -> RotaryStatus {
        log::warn!(
            "{}: rotary init failed: {}",
            self.config.rotary.channel.label,
            fault
        );
        self.last_fault = Some(fault);
        self.shared.status.set_init_result(RotaryStatus::Error);
        RotaryStatus::Error
    }
}
