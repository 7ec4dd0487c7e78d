//! Board-agnostic core logic for the Aurinko solar charger firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Menu state machine and live text formatting
//! - Measurement channels, sample averaging and unit conversion
//! - Two-point channel adjustment (linear calibration)
//! - Click detection for the single front-panel button
//! - Charge control law for the panel PWM outputs
//! - Configuration constants
//! - The per-cycle controller tying the above together

#![no_std]
#![deny(unsafe_code)]

pub mod charging;
pub mod config;
pub mod controller;
pub mod input;
pub mod measurement;
pub mod menu;
