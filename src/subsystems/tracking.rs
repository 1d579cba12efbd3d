//! Geodetic pointing math for antenna-gimbal control
//!
//! Pure functions over a spherical-earth approximation; no hardware
//! dependencies. All angles in degrees unless noted.

use libm::{atan2, cos, sin, sqrt};

/// Mean Earth radius in meters (WGS-84)
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Below this great-circle distance the elevation angle is numerically
/// meaningless and reported as level.
const MIN_TRACKING_DISTANCE_M: f64 = 0.1;

/// A geodetic position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    /// Latitude in decimal degrees, south negative
    pub latitude: f64,
    /// Longitude in decimal degrees, west negative
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// Servo angles for the two-axis gimbal, both in the actuator's native
/// 0-180 degree range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GimbalAngles {
    pub azimuth: f32,
    pub elevation: f32,
}

/// Great-circle distance in meters between two positions (haversine)
pub fn calculate_distance(from: &Position, to: &Position) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let sin_dlat = sin(delta_lat / 2.0);
    let sin_dlon = sin(delta_lon / 2.0);
    let a = sin_dlat * sin_dlat + cos(lat1) * cos(lat2) * sin_dlon * sin_dlon;

    EARTH_RADIUS_M * 2.0 * atan2(sqrt(a), sqrt(1.0 - a))
}

/// Initial bearing from `from` to `to`, degrees clockwise from north,
/// normalized to [0, 360)
pub fn calculate_bearing(from: &Position, to: &Position) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let x = sin(delta_lon) * cos(lat2);
    let y = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(delta_lon);

    wrap_360(atan2(x, y).to_degrees())
}

/// Elevation angle from `from` to `to` in degrees, positive upward
///
/// Flat-earth approximation, fine for line-of-sight tracking distances.
/// Returns 0 when the two positions nearly coincide.
pub fn elevation_angle(from: &Position, to: &Position) -> f64 {
    let distance = calculate_distance(from, to);
    if distance < MIN_TRACKING_DISTANCE_M {
        return 0.0;
    }
    atan2(to.altitude - from.altitude, distance).to_degrees()
}

/// Compute the gimbal servo angles pointing `receiver` at `transmitter`
///
/// `heading_offset` is the compass bearing the gimbal's azimuth-90° rest
/// position physically faces; a deployment-time calibration constant. The
/// relative bearing is normalized into (-180, 180], recentered so that the
/// rest position maps to 90°, and clamped to the servo range; elevation is
/// mapped so that level is 90° and straight up is 180°.
pub fn gimbal_angles(
    receiver: &Position,
    transmitter: &Position,
    heading_offset: f64,
) -> GimbalAngles {
    let bearing = calculate_bearing(receiver, transmitter);
    let elevation = elevation_angle(receiver, transmitter);

    let relative = wrap_180(bearing - heading_offset);
    let azimuth = (relative + 90.0).clamp(0.0, 180.0);
    let elevation = (elevation + 90.0).clamp(0.0, 180.0);

    GimbalAngles {
        azimuth: azimuth as f32,
        elevation: elevation as f32,
    }
}

/// Normalize an angle in degrees to (-180, 180]
pub fn wrap_180(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Normalize an angle in degrees to [0, 360)
pub fn wrap_360(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
