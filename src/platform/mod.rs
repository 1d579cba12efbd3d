//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the buses and peripherals
//! the tracker link uses: SPI (radio), UART (GPS), PWM (servos), GPIO
//! (chip select / reset lines) and a monotonic timer. All hardware-specific
//! code is isolated behind these traits.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2_w")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{GpioInterface, PwmInterface, SpiInterface, TimerInterface, UartInterface};
