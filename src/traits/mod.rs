//! Trait definitions for hardware abstraction.
//!
//! This module defines the seams that allow jvs-rotary to run on different
//! boards (ESP32, any embedded-hal target, desktop mocks).
//!
//! # Hardware Abstraction
//!
//! - [`QuadraturePins`]: A/B level reads for one rotary channel
//! - [`Clock`]: Microsecond time source for debounce timing

pub mod hardware;

pub use hardware::*;
