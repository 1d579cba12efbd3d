//! Mock GPIO implementation for testing

use crate::platform::{traits::GpioInterface, Result};

/// Mock GPIO implementation
///
/// Tracks pin state (high/low) for test verification.
#[derive(Debug, Default)]
pub struct MockGpio {
    state: bool,
}

impl MockGpio {
    /// Create a new mock GPIO, initially low
    pub fn new() -> Self {
        Self { state: false }
    }

    /// Set the pin state directly (for simulating external signals)
    pub fn set_state(&mut self, high: bool) {
        self.state = high;
    }
}

impl GpioInterface for MockGpio {
    fn set_high(&mut self) -> Result<()> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.state = false;
        Ok(())
    }

    fn read(&self) -> bool {
        self.state
    }
}
