//! Analog multiplexer front end
//!
//! The 15 raw measurement inputs run through a 16:1 analog multiplexer
//! into ADC0 (GPIO26). Four select lines pick the multiplexer input.

use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;

use aurinko_hal::analog::{AnalogError, AnalogFrontEnd, SWEEP_LEN};

/// Time for the multiplexer output to settle after switching
const SETTLE_MICROS: u64 = 20;

/// Multiplexed ADC input
pub struct MuxAnalog<'d> {
    adc: Adc<'d, Async>,
    input: Channel<'d>,
    select: [Output<'d>; 4],
}

impl<'d> MuxAnalog<'d> {
    /// Create the front end from the ADC, its input channel and the select
    /// lines (S0 first)
    pub fn new(adc: Adc<'d, Async>, input: Channel<'d>, select: [Output<'d>; 4]) -> Self {
        Self { adc, input, select }
    }

    fn select(&mut self, input: usize) {
        for (bit, line) in self.select.iter_mut().enumerate() {
            line.set_level(Level::from(input & (1 << bit) != 0));
        }
    }
}

impl<'d> AnalogFrontEnd for MuxAnalog<'d> {
    async fn sweep(&mut self) -> Result<[u16; SWEEP_LEN], AnalogError> {
        let mut sweep = [0u16; SWEEP_LEN];
        for (input, sample) in sweep.iter_mut().enumerate() {
            self.select(input);
            Timer::after_micros(SETTLE_MICROS).await;
            *sample = self
                .adc
                .read(&mut self.input)
                .await
                .map_err(|_| AnalogError::Conversion)?;
        }
        Ok(sweep)
    }
}
