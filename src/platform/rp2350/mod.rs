//! RP2350 platform implementation for Raspberry Pi Pico 2 W
//!
//! This module provides concrete implementations of the platform abstraction
//! traits for the RP2350 microcontroller using the `rp235x-hal` crate.
//!
//! # Feature Gate
//!
//! This module is only available when the `pico2_w` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! lora-tracker = { version = "0.1", features = ["pico2_w"] }
//! ```

mod gpio;
mod pwm;
mod spi;
mod timer;
mod uart;

pub use gpio::Rp2350Gpio;
pub use pwm::Rp2350Pwm;
pub use spi::Rp2350Spi;
pub use timer::Rp2350Timer;
pub use uart::Rp2350Uart;
