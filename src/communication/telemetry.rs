//! Position packet wire format
//!
//! The beacon broadcasts its fix as a compact ASCII line:
//!
//! ```text
//! lat,lon,alt,seq\n
//! ```
//!
//! with latitude/longitude at six decimal places (~11 cm), altitude at one,
//! and a monotonically increasing sequence counter. The radio adds no
//! framing of its own beyond the chip's preamble/sync-word/CRC.

use core::fmt::{self, Write};
use heapless::String;

/// Encoded packet capacity; a worst-case line is well under this
pub const MAX_PACKET_LEN: usize = 64;

/// One beacon position report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPacket {
    /// Latitude in decimal degrees, south negative
    pub latitude: f64,
    /// Longitude in decimal degrees, west negative
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: f64,
    /// Transmission sequence number
    pub sequence: u32,
}

/// Packet decode/encode failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload is not valid UTF-8/ASCII text
    NotText,
    /// Fewer than four comma-separated fields
    Truncated,
    /// More fields than the format defines
    TrailingData,
    /// A numeric field failed to parse
    BadNumber,
    /// Encoded representation exceeded the buffer
    Overflow,
}

impl fmt::Display for PacketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketError::NotText => write!(f, "payload is not text"),
            PacketError::Truncated => write!(f, "missing fields"),
            PacketError::TrailingData => write!(f, "unexpected trailing fields"),
            PacketError::BadNumber => write!(f, "malformed numeric field"),
            PacketError::Overflow => write!(f, "encode buffer overflow"),
        }
    }
}

impl PositionPacket {
    /// Encode into the ASCII wire representation
    pub fn encode(&self) -> Result<String<MAX_PACKET_LEN>, PacketError> {
        let mut line = String::new();
        writeln!(
            line,
            "{:.6},{:.6},{:.1},{}",
            self.latitude, self.longitude, self.altitude, self.sequence
        )
        .map_err(|_| PacketError::Overflow)?;
        Ok(line)
    }

    /// Parse a received payload back into a packet
    ///
    /// The symmetric inverse of `encode`; structurally or numerically
    /// malformed payloads are rejected, never panicked on.
    pub fn decode(payload: &[u8]) -> Result<Self, PacketError> {
        let text = core::str::from_utf8(payload).map_err(|_| PacketError::NotText)?;
        let text = text.trim_end_matches(|c| c == '\n' || c == '\r');

        let mut fields = text.split(',');
        let latitude = parse_field(fields.next())?;
        let longitude = parse_field(fields.next())?;
        let altitude = parse_field(fields.next())?;
        let sequence = fields
            .next()
            .ok_or(PacketError::Truncated)?
            .parse()
            .map_err(|_| PacketError::BadNumber)?;

        if fields.next().is_some() {
            return Err(PacketError::TrailingData);
        }

        Ok(Self {
            latitude,
            longitude,
            altitude,
            sequence,
        })
    }
}

fn parse_field(field: Option<&str>) -> Result<f64, PacketError> {
    field
        .ok_or(PacketError::Truncated)?
        .parse()
        .map_err(|_| PacketError::BadNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_format() {
        let packet = PositionPacket {
            latitude: 48.1173,
            longitude: 11.516667,
            altitude: 545.4,
            sequence: 17,
        };
        let line = packet.encode().unwrap();
        assert_eq!(line.as_str(), "48.117300,11.516667,545.4,17\n");
    }

    #[test]
    fn test_round_trip_preserves_precision() {
        let packet = PositionPacket {
            latitude: -33.856785,
            longitude: -151.215295,
            altitude: 12.3,
            sequence: 4_294_967_295,
        };
        let line = packet.encode().unwrap();
        let decoded = PositionPacket::decode(line.as_bytes()).unwrap();

        assert!((decoded.latitude - packet.latitude).abs() < 5e-7);
        assert!((decoded.longitude - packet.longitude).abs() < 5e-7);
        assert!((decoded.altitude - packet.altitude).abs() < 5e-2);
        assert_eq!(decoded.sequence, packet.sequence);
    }

    #[test]
    fn test_decode_without_newline() {
        let decoded = PositionPacket::decode(b"48.117300,11.516667,545.4,3").unwrap();
        assert_eq!(decoded.sequence, 3);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert_eq!(
            PositionPacket::decode(b"48.1173,11.5167,545.4"),
            Err(PacketError::Truncated)
        );
        assert_eq!(
            PositionPacket::decode(b"48.1173,eleven,545.4,1"),
            Err(PacketError::BadNumber)
        );
        assert_eq!(
            PositionPacket::decode(b"48.1,11.5,545.4,1,extra"),
            Err(PacketError::TrailingData)
        );
        assert_eq!(
            PositionPacket::decode(&[0xFF, 0xFE, 0x00]),
            Err(PacketError::NotText)
        );
    }

    #[test]
    fn test_decode_rejects_bad_sequence() {
        assert_eq!(
            PositionPacket::decode(b"48.1,11.5,545.4,-1"),
            Err(PacketError::BadNumber)
        );
    }
}
