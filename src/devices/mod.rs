//! Device drivers
//!
//! This module contains device drivers that use platform abstraction traits,
//! keeping them hardware-independent and testable on the host.
//!
//! ## Modules
//!
//! - `gps`: NMEA GPS receiver driver
//! - `sx127x`: SX1276/77/78/79 LoRa transceiver driver

pub mod gps;
pub mod sx127x;
