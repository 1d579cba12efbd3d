//! Core systems
//!
//! ## Modules
//!
//! - `logging`: unified log macros across embedded and host targets

pub mod logging;
