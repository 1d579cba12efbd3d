//! Per-node orchestration loops
//!
//! Thin, poll-driven sequencing of the drivers below them; all real work
//! happens in the radio, GPS, tracking and servo modules. Each node exposes
//! a non-blocking `step()` intended to be called from a single-threaded run
//! loop whose cadence the caller owns.
//!
//! ## Modules
//!
//! - `beacon`: remote node, streams GPS fixes over the radio
//! - `tracker`: ground node, points the antenna gimbal at the beacon

use crate::communication::telemetry::PacketError;
use crate::devices::sx127x::RadioError;
use crate::platform::PlatformError;
use core::fmt;

pub mod beacon;
pub mod tracker;

pub use beacon::{BeaconConfig, BeaconEvent, BeaconNode};
pub use tracker::{Contact, TrackerConfig, TrackerEvent, TrackerNode};

/// Errors surfaced by a node loop iteration
///
/// Expected link conditions (no packet, CRC drop, TX timeout, malformed
/// payload) are reported as events, not errors; this type carries only
/// genuine bus/driver failures the loop cannot absorb.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError {
    /// Radio driver failure
    Radio(RadioError),
    /// Platform bus or pin failure
    Platform(PlatformError),
    /// Packet encoding failure
    Packet(PacketError),
}

impl From<RadioError> for NodeError {
    fn from(e: RadioError) -> Self {
        NodeError::Radio(e)
    }
}

impl From<PlatformError> for NodeError {
    fn from(e: PlatformError) -> Self {
        NodeError::Platform(e)
    }
}

impl From<PacketError> for NodeError {
    fn from(e: PacketError) -> Self {
        NodeError::Packet(e)
    }
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Radio(e) => write!(f, "radio: {}", e),
            NodeError::Platform(e) => write!(f, "platform: {}", e),
            NodeError::Packet(e) => write!(f, "packet: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::gps::GpsDriver;
    use crate::devices::sx127x::{mock::MockChip, RadioConfig, Sx127x};
    use crate::libraries::servo::{ServoChannel, ServoConfig};
    use crate::platform::mock::{MockGpio, MockPwm, MockTimer, MockUart};
    use crate::platform::traits::{PwmConfig, UartConfig};
    use crate::subsystems::tracking::Position;

    const RMC: &[u8] =
        b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
    const GGA: &[u8] =
        b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    fn radio(chip: MockChip) -> Sx127x<MockChip, MockGpio, MockGpio, MockTimer> {
        Sx127x::new(
            chip,
            MockGpio::new(),
            MockGpio::new(),
            MockTimer::new(),
            RadioConfig::default(),
        )
        .unwrap()
    }

    fn servo() -> ServoChannel<MockPwm> {
        ServoChannel::new(MockPwm::new(PwmConfig::default()), ServoConfig::default()).unwrap()
    }

    #[test]
    fn test_beacon_to_tracker_end_to_end() {
        let (chip_a, chip_b) = MockChip::pair();

        // Remote node: GPS with a valid fix, radio beacon
        let mut uart = MockUart::new(UartConfig::default());
        uart.inject_rx_data(RMC);
        uart.inject_rx_data(GGA);
        let mut beacon = BeaconNode::new(
            GpsDriver::new(uart),
            radio(chip_a),
            BeaconConfig::default(),
        );

        // Ground node ~1.1 km south of the beacon, gimbal facing north
        let station = Position::new(48.1073, 11.5167, 520.0);
        let mut tracker = TrackerNode::new(
            radio(chip_b),
            servo(),
            servo(),
            TrackerConfig {
                station,
                heading_offset: 0.0,
            },
        );
        tracker.start().unwrap();

        assert_eq!(beacon.step(0).unwrap(), BeaconEvent::Sent { sequence: 0 });

        let event = tracker.step().unwrap();
        assert_eq!(event, TrackerEvent::Pointed { sequence: 0 });

        let contact = tracker.last_contact().expect("contact expected");
        assert_eq!(contact.sequence, 0);
        assert_eq!(contact.rssi_dbm, -60);
        assert!((contact.position.latitude - 48.1173).abs() < 1e-5);
        // Beacon due north of a north-facing gimbal: azimuth centered,
        // elevation slightly above level (beacon altitude 545.4 m vs 520 m)
        assert!((contact.angles.azimuth - 90.0).abs() < 0.5);
        assert!(contact.angles.elevation > 90.0);
        assert!(contact.angles.elevation < 95.0);
        assert_eq!(tracker.azimuth_angle(), contact.angles.azimuth);
    }

    #[test]
    fn test_beacon_paces_transmissions() {
        let mut uart = MockUart::new(UartConfig::default());
        uart.inject_rx_data(RMC);
        let mut beacon = BeaconNode::new(
            GpsDriver::new(uart),
            radio(MockChip::new()),
            BeaconConfig::default(),
        );

        assert_eq!(beacon.step(0).unwrap(), BeaconEvent::Sent { sequence: 0 });
        // Interval not yet elapsed
        assert_eq!(beacon.step(400).unwrap(), BeaconEvent::Idle);
        // Stored fix is still valid; next interval sends the next sequence
        assert_eq!(
            beacon.step(1001).unwrap(),
            BeaconEvent::Sent { sequence: 1 }
        );
    }

    #[test]
    fn test_beacon_without_fix() {
        let mut beacon = BeaconNode::new(
            GpsDriver::new(MockUart::new(UartConfig::default())),
            radio(MockChip::new()),
            BeaconConfig::default(),
        );

        assert!(!beacon.has_fix());
        assert_eq!(beacon.step(0).unwrap(), BeaconEvent::NoFix);
    }

    #[test]
    fn test_tracker_drops_malformed_payload() {
        let (_, chip_b) = MockChip::pair();
        let probe = chip_b.clone();
        let mut tracker = TrackerNode::new(
            radio(chip_b),
            servo(),
            servo(),
            TrackerConfig {
                station: Position::new(48.1073, 11.5167, 520.0),
                heading_offset: 0.0,
            },
        );
        tracker.start().unwrap();

        probe.inject_frame(b"not,a,packet");
        assert_eq!(tracker.step().unwrap(), TrackerEvent::Dropped);
        assert_eq!(tracker.dropped_packets(), 1);
        assert!(tracker.last_contact().is_none());
    }

    #[test]
    fn test_tracker_idle_without_traffic() {
        let mut tracker = TrackerNode::new(
            radio(MockChip::new()),
            servo(),
            servo(),
            TrackerConfig {
                station: Position::default(),
                heading_offset: 0.0,
            },
        );
        tracker.start().unwrap();
        assert_eq!(tracker.step().unwrap(), TrackerEvent::Idle);
    }
}
