//! Hobby-servo PWM channel
//!
//! Holds one PWM output representing a commanded gimbal angle. The angle is
//! clamped to the servo's 0-180 degree range, mapped linearly into the
//! configured pulse-width window and written as a duty fraction of the PWM
//! period.

use crate::platform::{error::PlatformError, traits::PwmInterface, Result};

/// Servo channel calibration
#[derive(Debug, Clone, Copy)]
pub struct ServoConfig {
    /// PWM frequency in Hz (50 Hz = 20 ms period for hobby servos)
    pub frequency_hz: u32,
    /// Pulse width commanding 0 degrees, in microseconds
    pub min_pulse_us: u16,
    /// Pulse width commanding 180 degrees, in microseconds
    pub max_pulse_us: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50,
            min_pulse_us: 500,
            max_pulse_us: 2500,
        }
    }
}

/// One servo on one PWM channel
///
/// Construction programs the PWM frequency, enables the output and centers
/// the servo at 90 degrees.
pub struct ServoChannel<P: PwmInterface> {
    pwm: P,
    config: ServoConfig,
    period_us: f32,
    angle: f32,
}

impl<P: PwmInterface> ServoChannel<P> {
    /// Create a servo channel and center it
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if the pulse bounds are
    /// inverted or the frequency is zero.
    pub fn new(mut pwm: P, config: ServoConfig) -> Result<Self> {
        if config.frequency_hz == 0 || config.min_pulse_us >= config.max_pulse_us {
            return Err(PlatformError::InvalidConfig);
        }

        pwm.set_frequency(config.frequency_hz)?;
        pwm.enable();

        let mut servo = Self {
            pwm,
            config,
            period_us: 1_000_000.0 / config.frequency_hz as f32,
            angle: 90.0,
        };
        servo.set_angle(90.0)?;
        Ok(servo)
    }

    /// Command a position in degrees, clamped to [0, 180]
    pub fn set_angle(&mut self, angle: f32) -> Result<()> {
        let angle = angle.clamp(0.0, 180.0);
        self.angle = angle;

        let span = (self.config.max_pulse_us - self.config.min_pulse_us) as f32;
        let pulse_us = self.config.min_pulse_us as f32 + angle / 180.0 * span;
        let duty = pulse_us / self.period_us;

        self.pwm.set_duty_cycle(duty)
    }

    /// Currently commanded angle in degrees
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Zero the output and disable the channel, handing the PWM back
    ///
    /// Prevents a stale commanded position from persisting after control
    /// ends.
    pub fn release(mut self) -> Result<P> {
        self.pwm.set_duty_cycle(0.0)?;
        self.pwm.disable();
        Ok(self.pwm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPwm;
    use crate::platform::traits::PwmConfig;

    fn servo() -> ServoChannel<MockPwm> {
        ServoChannel::new(MockPwm::new(PwmConfig::default()), ServoConfig::default()).unwrap()
    }

    #[test]
    fn test_construction_centers_at_ninety() {
        let servo = servo();
        assert_eq!(servo.angle(), 90.0);
        // 1500 us of a 20 ms period
        assert!((servo.pwm.duty_cycle() - 0.075).abs() < 1e-6);
        assert!(servo.pwm.is_enabled());
        assert_eq!(servo.pwm.frequency(), 50);
    }

    #[test]
    fn test_angle_extremes_map_to_pulse_bounds() {
        let mut servo = servo();

        servo.set_angle(0.0).unwrap();
        // 500 us / 20000 us
        assert!((servo.pwm.duty_cycle() - 0.025).abs() < 1e-6);

        servo.set_angle(180.0).unwrap();
        // 2500 us / 20000 us
        assert!((servo.pwm.duty_cycle() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_clamped() {
        let mut servo = servo();

        servo.set_angle(-45.0).unwrap();
        assert_eq!(servo.angle(), 0.0);
        assert!((servo.pwm.duty_cycle() - 0.025).abs() < 1e-6);

        servo.set_angle(270.0).unwrap();
        assert_eq!(servo.angle(), 180.0);
        assert!((servo.pwm.duty_cycle() - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_release_zeroes_output() {
        let servo = servo();
        let pwm = servo.release().unwrap();
        assert_eq!(pwm.duty_cycle(), 0.0);
        assert!(!pwm.is_enabled());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad_bounds = ServoConfig {
            frequency_hz: 50,
            min_pulse_us: 2500,
            max_pulse_us: 500,
        };
        assert!(ServoChannel::new(MockPwm::new(PwmConfig::default()), bad_bounds).is_err());

        let bad_freq = ServoConfig {
            frequency_hz: 0,
            ..ServoConfig::default()
        };
        assert!(ServoChannel::new(MockPwm::new(PwmConfig::default()), bad_freq).is_err());
    }
}
