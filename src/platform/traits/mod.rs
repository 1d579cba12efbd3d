//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod gpio;
pub mod pwm;
pub mod spi;
pub mod timer;
pub mod uart;

// Re-export trait interfaces
pub use gpio::GpioInterface;
pub use pwm::{PwmConfig, PwmInterface};
pub use spi::{SpiConfig, SpiInterface, SpiMode};
pub use timer::TimerInterface;
pub use uart::{UartConfig, UartInterface, UartParity, UartStopBits};
