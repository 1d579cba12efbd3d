//! GPS receiver driver (NMEA protocol)
//!
//! Reads the serial byte stream from a uBlox-style receiver through the
//! platform UART trait and runs it through the incremental NMEA parser.
//! Call `update()` every loop iteration; it drains whatever bytes are
//! pending and never blocks.

use crate::platform::{traits::UartInterface, Result};

pub mod nmea;

pub use nmea::NmeaParser;

/// Most recent GPS fix, overwritten in place as sentences arrive
///
/// `valid` is only set by a sentence whose own status/quality field
/// indicated a usable fix; rejected sentences leave the stored coordinates
/// from the last good fix untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsFix {
    /// Latitude in decimal degrees, south negative
    pub latitude: f64,
    /// Longitude in decimal degrees, west negative
    pub longitude: f64,
    /// Altitude in meters (from GGA)
    pub altitude: f32,
    /// Ground speed in knots (from RMC)
    pub speed_knots: f32,
    /// Course over ground in degrees (from RMC)
    pub course: f32,
    /// Satellites used in the fix (from GGA)
    pub satellites: u8,
    /// Fix quality code: 0 = invalid, 1 = GPS, 2 = DGPS, ...
    pub fix_quality: u8,
    /// Whether the stored coordinates come from a usable fix
    pub valid: bool,
}

/// GPS device driver
///
/// Generic over any `UartInterface`, so it runs against the mock UART on
/// the host.
pub struct GpsDriver<U: UartInterface> {
    uart: U,
    parser: NmeaParser,
}

impl<U: UartInterface> GpsDriver<U> {
    /// Create a new GPS driver
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            parser: NmeaParser::new(),
        }
    }

    /// Drain pending receiver bytes through the parser
    ///
    /// Returns `true` if at least one sentence updated the fix during this
    /// call.
    ///
    /// # Errors
    ///
    /// Returns an error if UART communication fails; parse failures are not
    /// errors and leave the fix unchanged.
    pub fn update(&mut self) -> Result<bool> {
        let mut updated = false;
        let mut buf = [0u8; 64];
        while self.uart.available() {
            let count = self.uart.read(&mut buf)?;
            if count == 0 {
                break;
            }
            for &byte in &buf[..count] {
                if self.parser.feed(byte) {
                    updated = true;
                }
            }
        }
        Ok(updated)
    }

    /// Latest fix state
    pub fn fix(&self) -> &GpsFix {
        self.parser.fix()
    }

    /// Mutable access to the UART, for vendor-specific setup commands
    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }
}
