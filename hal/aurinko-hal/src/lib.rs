//! Aurinko Hardware Abstraction Layer
//!
//! Traits the charger application needs from a board, implemented by
//! chip-specific HALs.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  aurinko-firmware                       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  aurinko-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  aurinko-hal-rp2040                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`analog::AnalogFrontEnd`] - Raw measurement sweeps
//! - [`pwm::ChargeOutputs`] - Panel PWM duties
//! - [`flash::FlashStorage`] - Persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod flash;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogError, AnalogFrontEnd};
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use pwm::ChargeOutputs;
