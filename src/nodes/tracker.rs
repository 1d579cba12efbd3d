//! Ground tracker node
//!
//! Listens in continuous receive mode, decodes beacon position packets and
//! drives the two-axis gimbal so the antenna follows the beacon. Malformed
//! payloads are dropped and counted; the loop itself only fails on genuine
//! bus errors.

use crate::communication::telemetry::PositionPacket;
use crate::devices::sx127x::{LinkQuality, Sx127x};
use crate::libraries::servo::ServoChannel;
use crate::log_debug;
use crate::log_warn;
use crate::platform::{GpioInterface, PwmInterface, SpiInterface, TimerInterface};
use crate::subsystems::tracking::{gimbal_angles, GimbalAngles, Position};

use super::NodeError;

/// Ground-station configuration
///
/// The station position is surveyed once at deployment; `heading_offset` is
/// the compass bearing the gimbal faces at its centered azimuth position.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerConfig {
    pub station: Position,
    pub heading_offset: f64,
}

/// Outcome of one tracker loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackerEvent {
    /// No packet pending
    Idle,
    /// A frame arrived but did not decode as a position packet
    Dropped,
    /// Gimbal re-pointed at the beacon
    Pointed { sequence: u32 },
}

/// Details of the most recent successfully decoded beacon packet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Beacon position as reported
    pub position: Position,
    /// Beacon sequence number
    pub sequence: u32,
    /// Signal strength of the carrying frame in dBm
    pub rssi_dbm: i16,
    /// Signal-to-noise ratio of the carrying frame in dB
    pub snr_db: f32,
    /// Servo angles commanded in response
    pub angles: GimbalAngles,
}

/// Ground node: radio in, gimbal out
pub struct TrackerNode<SPI, CS, RST, T, AZ, EL>
where
    SPI: SpiInterface,
    CS: GpioInterface,
    RST: GpioInterface,
    T: TimerInterface,
    AZ: PwmInterface,
    EL: PwmInterface,
{
    radio: Sx127x<SPI, CS, RST, T>,
    azimuth: ServoChannel<AZ>,
    elevation: ServoChannel<EL>,
    config: TrackerConfig,
    last_contact: Option<Contact>,
    dropped_packets: u32,
}

impl<SPI, CS, RST, T, AZ, EL> TrackerNode<SPI, CS, RST, T, AZ, EL>
where
    SPI: SpiInterface,
    CS: GpioInterface,
    RST: GpioInterface,
    T: TimerInterface,
    AZ: PwmInterface,
    EL: PwmInterface,
{
    pub fn new(
        radio: Sx127x<SPI, CS, RST, T>,
        azimuth: ServoChannel<AZ>,
        elevation: ServoChannel<EL>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            radio,
            azimuth,
            elevation,
            config,
            last_contact: None,
            dropped_packets: 0,
        }
    }

    /// Enter continuous receive; call once before stepping
    pub fn start(&mut self) -> Result<(), NodeError> {
        self.radio.receive_continuous()?;
        Ok(())
    }

    /// Run one non-blocking loop iteration
    ///
    /// Polls the radio once; on a decoded packet, recomputes the gimbal
    /// angles against the fixed station position and commands both servos.
    ///
    /// # Errors
    ///
    /// Bus and driver failures propagate; undecodable payloads are counted
    /// and reported as `TrackerEvent::Dropped`.
    pub fn step(&mut self) -> Result<TrackerEvent, NodeError> {
        let packet = match self.radio.poll_receive()? {
            Some(packet) => packet,
            None => return Ok(TrackerEvent::Idle),
        };

        let report = match PositionPacket::decode(&packet.payload) {
            Ok(report) => report,
            Err(_) => {
                self.dropped_packets = self.dropped_packets.wrapping_add(1);
                log_warn!("tracker: undecodable payload dropped");
                return Ok(TrackerEvent::Dropped);
            }
        };

        let target = Position::new(report.latitude, report.longitude, report.altitude);
        let angles = gimbal_angles(&self.config.station, &target, self.config.heading_offset);
        self.azimuth.set_angle(angles.azimuth)?;
        self.elevation.set_angle(angles.elevation)?;

        self.last_contact = Some(Contact {
            position: target,
            sequence: report.sequence,
            rssi_dbm: packet.rssi_dbm,
            snr_db: packet.snr_db,
            angles,
        });
        log_debug!("tracker: pointed at packet {}", report.sequence);

        Ok(TrackerEvent::Pointed {
            sequence: report.sequence,
        })
    }

    /// Most recent successfully decoded packet and its pointing solution
    pub fn last_contact(&self) -> Option<&Contact> {
        self.last_contact.as_ref()
    }

    /// Frames that arrived but failed to decode
    pub fn dropped_packets(&self) -> u32 {
        self.dropped_packets
    }

    /// Currently commanded azimuth-servo angle
    pub fn azimuth_angle(&self) -> f32 {
        self.azimuth.angle()
    }

    /// Currently commanded elevation-servo angle
    pub fn elevation_angle(&self) -> f32 {
        self.elevation.angle()
    }

    /// Link-quality metrics from the radio's diagnostic registers
    pub fn link_quality(&mut self) -> Result<LinkQuality, NodeError> {
        Ok(self.radio.link_quality()?)
    }

    /// Park the gimbal at center and release both servo outputs
    ///
    /// Zeroes the duty cycles so no stale position is held after control
    /// ends; the radio is put to sleep.
    pub fn shutdown(mut self) -> Result<(), NodeError> {
        self.azimuth.set_angle(90.0)?;
        self.elevation.set_angle(90.0)?;
        self.azimuth.release()?;
        self.elevation.release()?;
        self.radio.sleep()?;
        Ok(())
    }
}
