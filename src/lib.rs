//! # jvs-rotary
//!
//! Quadrature rotary input (spinner/dial) driver for JVS arcade I/O boards.
//!
//! ## Features
//!
//! - **Quadrature decoding**: Gray-code state machine, ±1 per valid transition,
//!   invalid double-bit transitions counted but never applied
//! - **Debouncing**: consecutive-sample and minimum-time settle criteria
//! - **Lock-free sharing**: the decode path and the host-report path share
//!   only atomics; reads never block and never tear
//! - **Lifecycle status**: `Unused` / `Error` / `Success`, with a defined,
//!   configurable value reported in every state
//! - **Hardware abstraction**: mock pins for testing, embedded-hal and ESP32
//!   implementations for boards
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Pin and clock abstractions
//! - `quadrature` - Gray-code state machine
//! - `debounce` - Settle filter for raw samples
//! - `position` - Atomic wrap-aware tick counter
//! - `status` - Lifecycle status
//! - `sampler` - Pin reads with polarity and A/B swap
//! - `driver` - `init_rotary()` / `poll()` / `rotary_value()`
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use jvs_rotary::{
//!     Config, RotaryDriver, RotaryShared, RotaryStatus,
//!     hal::MockPins,
//!     quadrature::QuadratureState,
//! };
//!
//! static SPINNER: RotaryShared = RotaryShared::new();
//!
//! // Board bring-up
//! let mut driver = RotaryDriver::new(MockPins::new(), &SPINNER, &Config::default());
//! assert_eq!(driver.init_rotary(0), RotaryStatus::Success);
//!
//! // Host-report context keeps a reader
//! let reader = driver.reader();
//!
//! // Decode context: call poll() from a timer or edge interrupt
//! driver.pins_mut().set_state(QuadratureState::S01);
//! driver.poll(250);
//! driver.poll(500); // default debounce wants two samples
//!
//! assert_eq!(reader.rotary_value(), 1);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Configuration for channel wiring, debounce, sampling and fallback.
pub mod config;
/// Debounce filter for raw quadrature samples.
pub mod debounce;
/// Rotary driver, shared state and read handles.
pub mod driver;
/// Error types.
pub mod error;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Atomic tick counter.
pub mod position;
/// Gray-code quadrature state machine.
pub mod quadrature;
/// Pin sampler applying channel polarity.
pub mod sampler;
/// Driver lifecycle status.
pub mod status;
/// Core traits for hardware abstraction.
pub mod traits;

// Re-exports for convenience
pub use config::{
    Config, DebounceConfig, DeviceConfig, FallbackPolicy, RotaryChannel, RotaryConfig,
    SamplingConfig,
};
pub use debounce::DebounceFilter;
pub use driver::{RotaryDriver, RotaryReader, RotaryShared};
pub use error::{ConfigError, RotaryFault, SampleError};
pub use position::PositionRegister;
pub use quadrature::{QuadratureDecoder, QuadratureState, Step, TransitionEvent};
pub use sampler::PinSampler;
pub use status::{RotaryStatus, StatusTracker};
pub use traits::{Clock, QuadraturePins};
