#![cfg_attr(not(test), no_std)]

//! lora_tracker - Two-node LoRa GPS telemetry and antenna-pointing link
//!
//! A remote beacon node streams GPS fixes over a LoRa radio link; a ground
//! tracker node receives them, computes bearing and elevation from its own
//! fixed position, and drives a two-axis servo gimbal to keep a directional
//! antenna pointed at the beacon.
//!
//! All drivers are generic over the platform abstraction traits so the whole
//! stack runs against mock hardware on the host.

#[cfg(feature = "mock")]
extern crate std;

// Platform abstraction layer (SPI, GPIO, PWM, UART, timer)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Core systems (logging)
pub mod core;

// Gimbal pointing math
pub mod subsystems;

// Reusable actuator building blocks
pub mod libraries;

// Telemetry wire format
pub mod communication;

// Per-node orchestration loops
pub mod nodes;
