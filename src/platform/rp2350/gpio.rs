//! RP2350 GPIO implementation
//!
//! This module provides GPIO support for RP2350 using the `rp235x-hal` crate.

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::GpioInterface,
    Result,
};
use rp235x_hal::gpio::{FunctionSioOutput, Pin, PinId, PullType};

/// RP2350 GPIO output implementation
///
/// Wraps a `rp235x-hal` push-pull output pin to implement the
/// `GpioInterface` trait. The tracker link drives the radio chip-select and
/// reset lines through this type.
pub struct Rp2350Gpio<I: PinId, P: PullType> {
    pin: Pin<I, FunctionSioOutput, P>,
}

impl<I: PinId, P: PullType> Rp2350Gpio<I, P> {
    /// Create a new RP2350 GPIO instance from a pin already configured as a
    /// push-pull output
    pub fn new(pin: Pin<I, FunctionSioOutput, P>) -> Self {
        Self { pin }
    }
}

impl<I: PinId, P: PullType> GpioInterface for Rp2350Gpio<I, P> {
    fn set_high(&mut self) -> Result<()> {
        use embedded_hal::digital::v2::OutputPin;
        self.pin
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn set_low(&mut self) -> Result<()> {
        use embedded_hal::digital::v2::OutputPin;
        self.pin
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))
    }

    fn read(&self) -> bool {
        use embedded_hal::digital::v2::InputPin;
        self.pin.is_high().unwrap_or(false)
    }
}
