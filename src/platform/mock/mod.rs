//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for unit testing without requiring actual hardware.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod pwm;
mod spi;
mod timer;
mod uart;

pub use gpio::MockGpio;
pub use pwm::MockPwm;
pub use spi::MockSpi;
pub use timer::MockTimer;
pub use uart::MockUart;
