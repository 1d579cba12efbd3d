//! Incremental NMEA-0183 sentence parser
//!
//! Feeds one byte at a time, accumulating a line until LF, then dispatches
//! recognized sentences ($..RMC, $..GGA) into the fix. Unknown talkers,
//! short sentences, malformed numbers and garbage between lines are all
//! dropped without touching the stored fix.

use super::GpsFix;
use heapless::{String, Vec};

/// Longest sensible NMEA line; anything beyond this without a terminator is
/// treated as noise and discarded.
const MAX_LINE_LEN: usize = 120;

/// Most fields in a supported sentence (GGA has 15 plus margin)
const MAX_FIELDS: usize = 20;

/// Incremental NMEA parser holding the latest fix
#[derive(Debug, Default)]
pub struct NmeaParser {
    line: String<MAX_LINE_LEN>,
    fix: GpsFix,
}

impl NmeaParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest fix state
    pub fn fix(&self) -> &GpsFix {
        &self.fix
    }

    /// Consume one byte from the receiver stream
    ///
    /// Returns `true` when the byte completed a sentence that updated the
    /// fix.
    pub fn feed(&mut self, byte: u8) -> bool {
        match byte {
            b'\r' => false,
            b'\n' => {
                let line = core::mem::take(&mut self.line);
                if line.starts_with('$') {
                    self.parse_sentence(&line)
                } else {
                    false
                }
            }
            _ => {
                if !byte.is_ascii() {
                    return false;
                }
                if self.line.push(byte as char).is_err() {
                    // Guard against garbage flooding
                    self.line.clear();
                }
                false
            }
        }
    }

    /// Dispatch a complete line to the right sentence handler
    fn parse_sentence(&mut self, sentence: &str) -> bool {
        // Strip the checksum suffix for easier splitting
        let body = match sentence.find('*') {
            Some(index) => &sentence[..index],
            None => sentence,
        };

        let mut fields: Vec<&str, MAX_FIELDS> = Vec::new();
        for field in body.split(',') {
            if fields.push(field).is_err() {
                return false;
            }
        }
        if fields.len() < 2 {
            return false;
        }

        let talker = fields[0]; // e.g. $GPRMC, $GNRMC, $GPGGA
        if talker.len() < 4 {
            return false;
        }
        match &talker[talker.len() - 3..] {
            "RMC" => self.parse_rmc(&fields),
            "GGA" => self.parse_gga(&fields),
            _ => false,
        }
    }

    /// $GxRMC,time,status,lat,N/S,lon,E/W,speed,course,date,...
    fn parse_rmc(&mut self, fields: &[&str]) -> bool {
        if fields.len() < 10 {
            return false;
        }
        if fields[2] != "A" {
            self.fix.valid = false;
            return false;
        }
        let latitude = match nmea_to_decimal(fields[3], fields[4]) {
            Some(value) => value,
            None => return false,
        };
        let longitude = match nmea_to_decimal(fields[5], fields[6]) {
            Some(value) => value,
            None => return false,
        };
        self.fix.latitude = latitude;
        self.fix.longitude = longitude;
        self.fix.speed_knots = float_or_zero(fields[7]);
        self.fix.course = float_or_zero(fields[8]);
        self.fix.valid = true;
        true
    }

    /// $GxGGA,time,lat,N/S,lon,E/W,quality,sats,hdop,alt,M,...
    fn parse_gga(&mut self, fields: &[&str]) -> bool {
        if fields.len() < 11 {
            return false;
        }
        let quality = int_or_zero(fields[6]);
        if quality == 0 {
            return false;
        }
        let latitude = match nmea_to_decimal(fields[2], fields[3]) {
            Some(value) => value,
            None => return false,
        };
        let longitude = match nmea_to_decimal(fields[4], fields[5]) {
            Some(value) => value,
            None => return false,
        };
        self.fix.latitude = latitude;
        self.fix.longitude = longitude;
        self.fix.fix_quality = quality;
        self.fix.satellites = int_or_zero(fields[7]);
        self.fix.altitude = float_or_zero(fields[9]);
        self.fix.valid = true;
        true
    }
}

/// Convert NMEA ddmm.mmmm / dddmm.mmmm plus hemisphere to decimal degrees
fn nmea_to_decimal(raw: &str, hemisphere: &str) -> Option<f64> {
    let dot = raw.find('.')?;
    if dot < 2 {
        return None;
    }
    let degrees: f64 = raw[..dot - 2].parse().ok()?;
    let minutes: f64 = raw[dot - 2..].parse().ok()?;
    let decimal = degrees + minutes / 60.0;
    if hemisphere == "S" || hemisphere == "W" {
        Some(-decimal)
    } else {
        Some(decimal)
    }
}

fn float_or_zero(field: &str) -> f32 {
    field.parse().unwrap_or(0.0)
}

fn int_or_zero(field: &str) -> u8 {
    field.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_line(parser: &mut NmeaParser, line: &str) -> bool {
        let mut updated = false;
        for &byte in line.as_bytes() {
            if parser.feed(byte) {
                updated = true;
            }
        }
        updated
    }

    const GOOD_RMC: &str =
        "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

    #[test]
    fn test_rmc_good_fix() {
        let mut parser = NmeaParser::new();
        assert!(feed_line(&mut parser, GOOD_RMC));

        let fix = parser.fix();
        assert!(fix.valid);
        assert!((fix.latitude - 48.1173).abs() < 1e-6);
        assert!((fix.longitude - 11.516_666_7).abs() < 1e-6);
        assert!((fix.speed_knots - 22.4).abs() < 1e-3);
        assert!((fix.course - 84.4).abs() < 1e-3);
    }

    #[test]
    fn test_rmc_void_status_preserves_coordinates() {
        let mut parser = NmeaParser::new();
        assert!(feed_line(&mut parser, GOOD_RMC));

        let void = GOOD_RMC.replace(",A,", ",V,");
        assert!(!feed_line(&mut parser, &void));

        let fix = parser.fix();
        assert!(!fix.valid);
        // Prior coordinates untouched
        assert!((fix.latitude - 48.1173).abs() < 1e-6);
        assert!((fix.longitude - 11.516_666_7).abs() < 1e-6);
    }

    #[test]
    fn test_gga_good_fix() {
        let mut parser = NmeaParser::new();
        let gga = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
        assert!(feed_line(&mut parser, gga));

        let fix = parser.fix();
        assert!(fix.valid);
        assert!((fix.latitude - 48.1173).abs() < 1e-6);
        assert_eq!(fix.fix_quality, 1);
        assert_eq!(fix.satellites, 8);
        assert!((fix.altitude - 545.4).abs() < 1e-3);
    }

    #[test]
    fn test_gga_quality_zero_rejected() {
        let mut parser = NmeaParser::new();
        assert!(feed_line(&mut parser, GOOD_RMC));

        let no_fix = "$GPGGA,123519,5555.000,N,02222.000,E,0,00,99.9,0.0,M,0.0,M,,*4E\r\n";
        assert!(!feed_line(&mut parser, no_fix));

        let fix = parser.fix();
        // Fix untouched by the rejected sentence
        assert!(fix.valid);
        assert!((fix.latitude - 48.1173).abs() < 1e-6);
        assert_eq!(fix.altitude, 0.0);
    }

    #[test]
    fn test_southern_western_hemispheres() {
        let mut parser = NmeaParser::new();
        let rmc = "$GPRMC,123519,A,3351.000,S,15112.000,W,000.0,000.0,230394,,*6A\r\n";
        assert!(feed_line(&mut parser, rmc));

        let fix = parser.fix();
        assert!((fix.latitude - (-33.85)).abs() < 1e-6);
        assert!((fix.longitude - (-151.2)).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_sentence_ignored() {
        let mut parser = NmeaParser::new();
        assert!(!feed_line(
            &mut parser,
            "$GPGSV,3,1,11,03,03,111,00,04,15,270,00*74\r\n"
        ));
        assert!(!parser.fix().valid);
    }

    #[test]
    fn test_malformed_coordinate_rejected() {
        let mut parser = NmeaParser::new();
        let bad = "$GPRMC,123519,A,48o7.038,N,01131.000,E,022.4,084.4,230394,,*6A\r\n";
        assert!(!feed_line(&mut parser, bad));
        assert!(!parser.fix().valid);
    }

    #[test]
    fn test_truncated_rmc_rejected() {
        let mut parser = NmeaParser::new();
        assert!(!feed_line(&mut parser, "$GPRMC,123519,A\r\n"));
        assert!(!parser.fix().valid);
    }

    #[test]
    fn test_garbage_flood_guarded() {
        let mut parser = NmeaParser::new();
        // 1 KiB of line noise without a terminator must not wedge the parser
        for _ in 0..1024 {
            assert!(!parser.feed(b'U'));
        }
        assert!(feed_line(&mut parser, GOOD_RMC));
        assert!(parser.fix().valid);
    }

    #[test]
    fn test_fragmented_delivery() {
        let mut parser = NmeaParser::new();
        let (head, tail) = GOOD_RMC.split_at(20);
        assert!(!feed_line(&mut parser, head));
        assert!(feed_line(&mut parser, tail));
        assert!(parser.fix().valid);
    }

    #[test]
    fn test_nmea_to_decimal() {
        assert!((nmea_to_decimal("4807.038", "N").unwrap() - 48.1173).abs() < 1e-6);
        assert!((nmea_to_decimal("01131.000", "E").unwrap() - 11.516_666_7).abs() < 1e-6);
        assert!((nmea_to_decimal("4807.038", "S").unwrap() + 48.1173).abs() < 1e-6);
        assert_eq!(nmea_to_decimal("", "N"), None);
        assert_eq!(nmea_to_decimal("4807", "N"), None);
        assert_eq!(nmea_to_decimal(".5", "N"), None);
    }
}
