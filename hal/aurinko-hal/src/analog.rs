//! Analog measurement front end
//!
//! The charger reads its panel and battery channels through one ADC.
//! A sweep samples every raw input once.

use core::future::Future;

/// Raw inputs per sweep
pub const SWEEP_LEN: usize = 15;

/// Errors from the analog front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogError {
    /// Conversion failed or timed out
    Conversion,
}

/// Source of raw measurement sweeps
pub trait AnalogFrontEnd {
    /// Sample all raw inputs, index 0 being the lowest input
    fn sweep(&mut self) -> impl Future<Output = Result<[u16; SWEEP_LEN], AnalogError>>;
}
