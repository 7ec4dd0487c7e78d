//! RP2040-specific HAL for the charger firmware
//!
//! RP2040 implementations of the shared `aurinko-hal` traits:
//!
//! - Analog multiplexer front end on the single ADC input
//! - Panel PWM outputs on two PWM slices
//! - Flash storage driver (implements `aurinko_hal::FlashStorage`)

#![no_std]

pub mod analog;
pub mod flash;
pub mod pwm;

// Re-export shared traits from aurinko-hal for convenience
pub use aurinko_hal::{AnalogFrontEnd, ChargeOutputs, FlashStorage as FlashStorageTrait, StorageKey};
