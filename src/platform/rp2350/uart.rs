//! RP2350 UART implementation
//!
//! This module provides UART support for RP2350 using the `rp235x-hal` crate.

use crate::platform::{
    error::{PlatformError, UartError},
    traits::{UartConfig, UartInterface},
    Result,
};
use rp235x_hal::uart::UartPeripheral;

/// RP2350 UART implementation
///
/// Wraps the `rp235x-hal` UART peripheral to implement the `UartInterface`
/// trait.
///
/// # Note
///
/// UART configuration (baud rate, framing) is applied during the HAL's
/// `enable()` call; the peripheral must already be enabled with the desired
/// configuration before being passed to this constructor.
pub struct Rp2350Uart<D, P>
where
    D: rp235x_hal::uart::UartDevice,
    P: rp235x_hal::uart::ValidUartPinout<D>,
{
    uart: UartPeripheral<rp235x_hal::uart::Enabled, D, P>,
}

impl<D, P> Rp2350Uart<D, P>
where
    D: rp235x_hal::uart::UartDevice,
    P: rp235x_hal::uart::ValidUartPinout<D>,
{
    /// Create a new RP2350 UART instance from an already-enabled peripheral
    pub fn new(uart: UartPeripheral<rp235x_hal::uart::Enabled, D, P>, _config: UartConfig) -> Self {
        Self { uart }
    }
}

impl<D, P> UartInterface for Rp2350Uart<D, P>
where
    D: rp235x_hal::uart::UartDevice,
    P: rp235x_hal::uart::ValidUartPinout<D>,
{
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.uart.write_full_blocking(data);
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        // read_raw() returns the bytes currently in the RX FIFO without
        // waiting for more
        match self.uart.read_raw(buffer) {
            Ok(read_count) => Ok(read_count),
            Err(nb::Error::WouldBlock) => Ok(0),
            Err(nb::Error::Other(_)) => Err(PlatformError::Uart(UartError::ReadFailed)),
        }
    }

    fn available(&self) -> bool {
        self.uart.uart_is_readable()
    }
}
