//! Communication protocols
//!
//! ## Modules
//!
//! - `telemetry`: position packet wire format carried over the radio link

pub mod telemetry;
