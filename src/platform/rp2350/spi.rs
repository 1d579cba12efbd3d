//! RP2350 SPI implementation
//!
//! This module provides SPI support for RP2350 using the `rp235x-hal` crate.

use crate::platform::{
    error::{PlatformError, SpiError},
    traits::{SpiConfig, SpiInterface},
    Result,
};
use rp235x_hal::spi::Spi;

/// RP2350 SPI implementation
///
/// Wraps the `rp235x-hal` SPI peripheral to implement the `SpiInterface`
/// trait.
///
/// # Note
///
/// Chip select (CS) management is separate and done via GPIO, as the radio
/// driver holds CS low across the address and data phases of a register
/// access.
pub struct Rp2350Spi<D, P>
where
    D: rp235x_hal::spi::SpiDevice,
    P: rp235x_hal::spi::ValidSpiPinout<D>,
{
    spi: Spi<rp235x_hal::spi::Enabled, D, P, 8>,
}

impl<D, P> Rp2350Spi<D, P>
where
    D: rp235x_hal::spi::SpiDevice,
    P: rp235x_hal::spi::ValidSpiPinout<D>,
{
    /// Create a new RP2350 SPI instance
    ///
    /// Mode and frequency are set when the HAL peripheral is enabled; the
    /// config argument is kept for interface symmetry with the mock.
    pub fn new(spi: Spi<rp235x_hal::spi::Enabled, D, P, 8>, _config: SpiConfig) -> Self {
        Self { spi }
    }
}

impl<D, P> SpiInterface for Rp2350Spi<D, P>
where
    D: rp235x_hal::spi::SpiDevice,
    P: rp235x_hal::spi::ValidSpiPinout<D>,
{
    fn write(&mut self, data: &[u8]) -> Result<()> {
        use embedded_hal::blocking::spi::Write;

        self.spi
            .write(data)
            .map_err(|_| PlatformError::Spi(SpiError::TransferFailed))
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        use embedded_hal::blocking::spi::Transfer;

        for byte in buffer.iter_mut() {
            *byte = 0x00;
        }

        self.spi
            .transfer(buffer)
            .map_err(|_| PlatformError::Spi(SpiError::TransferFailed))?;

        Ok(())
    }
}
