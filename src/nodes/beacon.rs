//! Remote beacon node
//!
//! Keeps the NMEA parser fed and, on a fixed cadence, packs the current fix
//! into the telemetry wire format and hands it to the radio. A transmit
//! timeout skips the cycle rather than failing the loop; the next interval
//! simply tries again with a fresher fix.

use crate::communication::telemetry::PositionPacket;
use crate::devices::gps::{GpsDriver, GpsFix};
use crate::devices::sx127x::{RadioError, Sx127x};
use crate::log_debug;
use crate::log_warn;
use crate::platform::{GpioInterface, SpiInterface, TimerInterface, UartInterface};

use super::NodeError;

/// Beacon pacing configuration
#[derive(Debug, Clone, Copy)]
pub struct BeaconConfig {
    /// Time between position transmissions in milliseconds
    pub tx_interval_ms: u32,
    /// Per-transmission timeout handed to the radio driver
    pub tx_timeout_ms: u32,
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            tx_interval_ms: 1000,
            tx_timeout_ms: 5000,
        }
    }
}

/// Outcome of one beacon loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeaconEvent {
    /// Interval not yet elapsed; parser kept fed
    Idle,
    /// Interval elapsed but no valid fix to report
    NoFix,
    /// Position packet transmitted
    Sent { sequence: u32 },
    /// Transmission timed out; cycle skipped
    TxTimedOut,
}

/// Remote node: GPS in, radio out
pub struct BeaconNode<U, SPI, CS, RST, T>
where
    U: UartInterface,
    SPI: SpiInterface,
    CS: GpioInterface,
    RST: GpioInterface,
    T: TimerInterface,
{
    gps: GpsDriver<U>,
    radio: Sx127x<SPI, CS, RST, T>,
    config: BeaconConfig,
    sequence: u32,
    last_tx_ms: Option<u64>,
}

impl<U, SPI, CS, RST, T> BeaconNode<U, SPI, CS, RST, T>
where
    U: UartInterface,
    SPI: SpiInterface,
    CS: GpioInterface,
    RST: GpioInterface,
    T: TimerInterface,
{
    pub fn new(gps: GpsDriver<U>, radio: Sx127x<SPI, CS, RST, T>, config: BeaconConfig) -> Self {
        Self {
            gps,
            radio,
            config,
            sequence: 0,
            last_tx_ms: None,
        }
    }

    /// Whether the GPS currently holds a usable fix
    pub fn has_fix(&self) -> bool {
        self.gps.fix().valid
    }

    /// Latest fix state
    pub fn fix(&self) -> &GpsFix {
        self.gps.fix()
    }

    /// Next sequence number to be transmitted
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Run one loop iteration at the given monotonic timestamp
    ///
    /// Always drains the GPS stream; transmits when the configured interval
    /// has elapsed and the fix is valid. Never blocks beyond the radio's
    /// transmit window.
    ///
    /// # Errors
    ///
    /// Bus and driver failures propagate; a transmit timeout is reported as
    /// `BeaconEvent::TxTimedOut`, not an error.
    pub fn step(&mut self, now_ms: u64) -> Result<BeaconEvent, NodeError> {
        self.gps.update()?;

        if let Some(last) = self.last_tx_ms {
            if now_ms.saturating_sub(last) < self.config.tx_interval_ms as u64 {
                return Ok(BeaconEvent::Idle);
            }
        }

        let fix = self.gps.fix();
        if !fix.valid {
            self.last_tx_ms = Some(now_ms);
            log_debug!("beacon: no fix, skipping cycle");
            return Ok(BeaconEvent::NoFix);
        }

        let packet = PositionPacket {
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude as f64,
            sequence: self.sequence,
        };
        let line = packet.encode()?;

        match self.radio.send(line.as_bytes(), self.config.tx_timeout_ms) {
            Ok(()) => {
                let sequence = self.sequence;
                self.sequence = self.sequence.wrapping_add(1);
                self.last_tx_ms = Some(now_ms);
                log_debug!("beacon: sent packet {}", sequence);
                Ok(BeaconEvent::Sent { sequence })
            }
            Err(RadioError::TxTimeout) => {
                self.last_tx_ms = Some(now_ms);
                log_warn!("beacon: TX timed out, skipping cycle");
                Ok(BeaconEvent::TxTimedOut)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Put the radio to sleep, e.g. on shutdown
    pub fn shutdown(&mut self) -> Result<(), NodeError> {
        self.radio.sleep()?;
        Ok(())
    }
}
