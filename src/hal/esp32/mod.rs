//! ESP32 hardware abstraction layer for a JVS I/O board rotary input.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 (RISC-V 160MHz)
//! - **Input**: quadrature spinner or dial on two GPIOs
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod clock;
mod spinner;

pub use clock::Esp32Clock;
pub use spinner::Esp32QuadraturePins;

/// Pin assignments for the rotary input.
pub mod pins {
    /// Spinner channel A
    pub const ROTARY_A: i32 = 6;

    /// Spinner channel B
    pub const ROTARY_B: i32 = 7;
}
