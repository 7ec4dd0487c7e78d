//! Configuration
//!
//! Compile-time tunables and the persisted channel adjustment record.

pub mod calibration;
pub mod hardware;

pub use calibration::*;
pub use hardware::*;
