//! RP2350 PWM implementation
//!
//! This module provides PWM support for RP2350 using the `rp235x-hal` crate.

use crate::platform::{
    error::{PlatformError, PwmError},
    traits::{PwmConfig, PwmInterface},
    Result,
};
use rp235x_hal::pwm::{FreeRunning, Slice, SliceId};

/// RP2350 PWM implementation
///
/// Wraps a `rp235x-hal` PWM slice to implement the `PwmInterface` trait,
/// driving the slice's B channel. The two gimbal servos sit on the B outputs
/// of two separate slices.
pub struct Rp2350Pwm<S: SliceId> {
    slice: Slice<S, FreeRunning>,
    duty_cycle: f32,
    frequency: u32,
    enabled: bool,
}

impl<S: SliceId> Rp2350Pwm<S> {
    /// Create a new RP2350 PWM instance
    pub fn new(slice: Slice<S, FreeRunning>, config: PwmConfig) -> Self {
        let mut pwm = Self {
            slice,
            duty_cycle: config.duty_cycle,
            frequency: config.frequency,
            enabled: false,
        };

        let _ = pwm.set_frequency(config.frequency);
        let _ = pwm.set_duty_cycle(config.duty_cycle);

        pwm
    }

    /// Calculate compare value from duty cycle
    fn duty_to_compare(&self, duty: f32) -> u16 {
        let top = self.slice.get_top();
        (duty * top as f32) as u16
    }
}

impl<S: SliceId> PwmInterface for Rp2350Pwm<S> {
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()> {
        use embedded_hal::PwmPin;

        if !(0.0..=1.0).contains(&duty_cycle) {
            return Err(PlatformError::Pwm(PwmError::InvalidDutyCycle));
        }

        self.duty_cycle = duty_cycle;
        let compare = self.duty_to_compare(duty_cycle);

        self.slice.channel_b.set_duty(compare);

        Ok(())
    }

    fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    fn set_frequency(&mut self, frequency: u32) -> Result<()> {
        use embedded_hal::PwmPin;

        if frequency == 0 {
            return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
        }

        self.frequency = frequency;

        // System clock is 150 MHz on the RP2350
        const SYS_CLOCK: u32 = 150_000_000;

        // PWM frequency = SYS_CLOCK / (DIV * (TOP + 1))
        // Fixed top for maximum resolution, integer divider derived from it
        let top: u16 = 65535;
        let divider = SYS_CLOCK / (frequency * (top as u32 + 1));

        if divider == 0 || divider > 255 {
            return Err(PlatformError::Pwm(PwmError::InvalidFrequency));
        }

        self.slice.set_div_int(divider as u8);
        self.slice.set_top(top);

        // Re-apply duty cycle with the new top value
        let compare = self.duty_to_compare(self.duty_cycle);
        self.slice.channel_b.set_duty(compare);

        Ok(())
    }

    fn frequency(&self) -> u32 {
        self.frequency
    }

    fn enable(&mut self) {
        self.slice.enable();
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.slice.disable();
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
